//! Objects to manage photo contests
use crate::{
    datetime::{format_form_datetime, local_offset, parse_form_datetime, start_of_today},
    entity::Entity,
    error::{Error, Result},
    picture::Picture,
    update::{EntityForm, required_field},
};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

/// A photo contest that pictures can be submitted to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contest {
    /// A unique ID assigned by the server. `None` until the contest is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// The name of the contest
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// When the contest opens
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<OffsetDateTime>,

    /// When the contest closes
    #[serde(with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<OffsetDateTime>,

    /// Where the contest is published
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    /// The user that organizes the contest
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,

    /// The pictures submitted to this contest. Only ever filled in by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pictures: Option<Vec<Picture>>,
}

impl Entity for Contest {
    const RESOURCE: &'static str = "contests";
    const NAME: &'static str = "contest";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Contest {
    /// Creates a new contest object with the given data. It will not have an id
    /// until it is created on the server.
    pub fn new(
        name: String,
        url: String,
        start_date: Option<OffsetDateTime>,
        end_date: Option<OffsetDateTime>,
        user_id: Option<i64>,
    ) -> Self {
        Self {
            id: None,
            name,
            start_date,
            end_date,
            url,
            user_id,
            pictures: None,
        }
    }
}

/// The editable state of a [Contest]. Timestamps are kept in their
/// `YYYY-MM-DDTHH:mm` form representation in the form's timezone.
#[derive(Debug, Clone, PartialEq)]
pub struct ContestForm {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub url: Option<String>,
    pub user_id: Option<i64>,
    offset: UtcOffset,
}

impl Default for ContestForm {
    fn default() -> Self {
        Self::with_offset(local_offset())
    }
}

impl ContestForm {
    /// An empty form that reads and writes timestamps in the given timezone
    pub fn with_offset(offset: UtcOffset) -> Self {
        Self {
            id: None,
            name: None,
            start_date: None,
            end_date: None,
            url: None,
            user_id: None,
            offset,
        }
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl EntityForm for ContestForm {
    type Entity = Contest;

    /// New contests start and end today
    fn prepare_new(&self, contest: &mut Contest) {
        let today = start_of_today(self.offset);
        contest.start_date = Some(today);
        contest.end_date = Some(today);
    }

    fn update_form(&mut self, contest: &Contest) -> Result<()> {
        let offset = self.offset;
        let fmt = |d: Option<OffsetDateTime>| d.map(|d| format_form_datetime(d, offset)).transpose();
        self.start_date = fmt(contest.start_date)?;
        self.end_date = fmt(contest.end_date)?;
        self.id = contest.id;
        self.name = Some(contest.name.clone());
        self.url = Some(contest.url.clone());
        self.user_id = contest.user_id;
        Ok(())
    }

    fn create_from_form(&self) -> Result<Contest> {
        let mut errors = Vec::new();
        let name = required_field(&self.name, "name", &mut errors);
        let url = required_field(&self.url, "url", &mut errors);
        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }
        let parse = |v: &Option<String>| match v {
            Some(s) => parse_form_datetime(s, self.offset),
            None => Ok(None),
        };
        Ok(Contest {
            id: self.id,
            start_date: parse(&self.start_date)?,
            end_date: parse(&self.end_date)?,
            user_id: self.user_id,
            ..Contest::new(name, url, None, None, None)
        })
    }
}
