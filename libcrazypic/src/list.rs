//! Controller behind the list views
use crate::{
    delete::{Confirm, DeleteDialog, DialogClose},
    entity::Entity,
    service::{EntityService, QueryOptions},
    transport::Transport,
};
use tracing::{debug, warn};

/// Whether a list is waiting for the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ListState {
    Idle,
    Loading,
}

/// Lists all objects of type `E` and lets the user delete them
pub struct ListController<E, T> {
    service: EntityService<E, T>,
    options: QueryOptions,
    items: Option<Vec<E>>,
    state: ListState,
}

impl<E: Entity, T: Transport> ListController<E, T> {
    pub fn new(service: EntityService<E, T>) -> Self {
        Self::with_options(service, QueryOptions::default())
    }

    /// A list that passes `options` to every query
    pub fn with_options(service: EntityService<E, T>, options: QueryOptions) -> Self {
        Self {
            service,
            options,
            items: None,
            state: ListState::Idle,
        }
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == ListState::Loading
    }

    /// The objects from the last successful load, `None` before the first one
    pub fn items(&self) -> Option<&[E]> {
        self.items.as_deref()
    }

    pub fn service(&self) -> &EntityService<E, T> {
        &self.service
    }

    pub fn track_id(&self, entity: &E) -> Option<i64> {
        entity.id()
    }

    /// Fetch the list from the server. A failed load only resets the loading state;
    /// the previous items stay and no error is reported.
    pub async fn load_all(&mut self) {
        self.state = ListState::Loading;
        match self.service.query(&self.options).await {
            Ok(items) => {
                debug!(resource = E::RESOURCE, count = items.len(), "loaded");
                self.items = Some(items);
            }
            Err(e) => warn!(resource = E::RESOURCE, error = %e, "failed to load list"),
        }
        self.state = ListState::Idle;
    }

    /// Activating the view loads the list
    pub async fn activate(&mut self) {
        self.load_all().await
    }

    /// Open the delete dialog for `entity`. The list is reloaded only if the dialog
    /// reports that the object was deleted.
    pub async fn delete(&mut self, entity: &E, confirm: &mut dyn Confirm) -> DialogClose {
        let close = DeleteDialog::new(&self.service, confirm).open(entity).await;
        if close == DialogClose::Deleted {
            self.load_all().await;
        }
        close
    }
}
