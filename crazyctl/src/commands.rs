//! Handlers for the subcommands of `crazyctl`
use anyhow::Result;
use libcrazypic::{
    contest::Contest,
    entity::Entity,
    picture::Picture,
    service::{EntityService, QueryOptions, SortOrder},
    transport::HttpTransport,
    update::SaveOutcome,
};
use std::sync::Arc;

use crate::cli::PageOptions;

pub(crate) mod contests;
pub(crate) mod pictures;

/// The services for all resources of one server
pub(crate) struct Session {
    transport: Arc<HttpTransport>,
}

impl Session {
    pub(crate) fn new(server: &str) -> Result<Self> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new(server)?),
        })
    }

    pub(crate) fn server(&self) -> &str {
        self.transport.base_url().as_str()
    }

    pub(crate) fn contests(&self) -> EntityService<Contest, HttpTransport> {
        EntityService::new(self.transport.clone())
    }

    pub(crate) fn pictures(&self) -> EntityService<Picture, HttpTransport> {
        EntityService::new(self.transport.clone())
    }
}

impl PageOptions {
    pub(crate) fn to_query_options(&self) -> Result<QueryOptions> {
        let mut options = QueryOptions {
            page: self.page,
            size: self.size,
            ..Default::default()
        };
        for s in &self.sort {
            options = options.sort(s.parse::<SortOrder>()?);
        }
        Ok(options)
    }
}

/// Report the result of submitting a form. The library leaves a failed save on the
/// form without a message; on the command line it has to end the command.
pub(crate) fn report_save<E: Entity>(outcome: SaveOutcome<E>, verb: &str) -> Result<()> {
    match outcome {
        SaveOutcome::Saved(entity) => {
            println!(
                "{verb} {} {}",
                E::NAME,
                entity.id().map(|id| id.to_string()).unwrap_or_default()
            );
            Ok(())
        }
        SaveOutcome::Failed(e) => Err(anyhow::Error::from(e).context(format!("Unable to save {}", E::NAME))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libcrazypic::service::SortDirection;

    #[test]
    fn test_page_options() {
        let page = PageOptions {
            page: Some(1),
            size: None,
            sort: vec!["name,desc".to_string(), "id".to_string()],
        };
        let opts = page.to_query_options().expect("valid options");
        assert_eq!(opts.page, Some(1));
        assert_eq!(
            opts.sort,
            vec![
                SortOrder::new("name", SortDirection::Desc),
                SortOrder::new("id", SortDirection::Asc)
            ]
        );

        let bad = PageOptions {
            page: None,
            size: None,
            sort: vec!["name,up".to_string()],
        };
        assert!(bad.to_query_options().is_err());
    }

    #[test]
    fn test_report_save() {
        let saved = Contest {
            id: Some(3),
            ..Default::default()
        };
        assert!(report_save(SaveOutcome::Saved(saved), "Added").is_ok());
        let failed: SaveOutcome<Contest> =
            SaveOutcome::Failed(libcrazypic::Error::BadRequest("Invalid id".into()));
        let err = report_save(failed, "Added").expect_err("should fail");
        assert_eq!(err.to_string(), "Unable to save contest");
    }

    #[test]
    fn test_session_rejects_bad_url() {
        assert!(Session::new("nowhere").is_err());
        let session = Session::new("http://localhost:8080").expect("valid url");
        assert_eq!(session.server(), "http://localhost:8080/");
    }
}
