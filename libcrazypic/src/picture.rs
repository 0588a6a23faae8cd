//! Objects to manage pictures submitted to contests
use crate::{
    contest::Contest,
    entity::Entity,
    error::{Error, Result},
    update::{EntityForm, required_field},
};
use serde::{Deserialize, Serialize};

/// A picture, optionally submitted to a [Contest]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Picture {
    /// A unique ID assigned by the server. `None` until the picture is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    /// The image itself, either base64-encoded data or a link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photograph: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nb_votes: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<i64>,

    /// The contest this picture was submitted to. The server checks that it
    /// exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contest_id: Option<Contest>,
}

impl Entity for Picture {
    const RESOURCE: &'static str = "pictures";
    const NAME: &'static str = "picture";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Picture {
    /// Creates a new picture object with the given data. It will not have an id
    /// until it is created on the server.
    pub fn new(name: String, url: String, contest: Option<Contest>) -> Self {
        Self {
            name,
            url,
            contest_id: contest,
            ..Default::default()
        }
    }

    /// The name of the contest this picture belongs to, if any
    pub fn contest_name(&self) -> Option<&str> {
        self.contest_id.as_ref().map(|c| c.name.as_str())
    }
}

/// The editable state of a [Picture]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PictureForm {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub photograph: Option<String>,
    pub comment: Option<String>,
    pub nb_votes: Option<i32>,
    pub note: Option<i64>,
    /// The selected entry of the contest options
    pub contest_id: Option<Contest>,
}

impl EntityForm for PictureForm {
    type Entity = Picture;

    fn update_form(&mut self, picture: &Picture) -> Result<()> {
        *self = Self {
            id: picture.id,
            name: Some(picture.name.clone()),
            url: Some(picture.url.clone()),
            photograph: picture.photograph.clone(),
            comment: picture.comment.clone(),
            nb_votes: picture.nb_votes,
            note: picture.note,
            contest_id: picture.contest_id.clone(),
        };
        Ok(())
    }

    fn create_from_form(&self) -> Result<Picture> {
        let mut errors = Vec::new();
        let name = required_field(&self.name, "name", &mut errors);
        let url = required_field(&self.url, "url", &mut errors);
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }
        Ok(Picture {
            id: self.id,
            photograph: self.photograph.clone(),
            comment: self.comment.clone(),
            nb_votes: self.nb_votes,
            note: self.note,
            ..Picture::new(name, url, self.contest_id.clone())
        })
    }
}
