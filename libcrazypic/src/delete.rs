//! Confirmation dialog for deleting an object
use crate::{entity::Entity, service::EntityService, transport::Transport};
use tracing::{info, warn};

/// How a delete dialog was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogClose {
    /// The user confirmed and the object was deleted
    Deleted,
    /// The user cancelled, or the deletion failed
    Dismissed,
}

/// Asks the user whether an object should really be deleted
pub trait Confirm {
    fn confirm_delete(&mut self, resource: &str, id: i64) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str, i64) -> bool,
{
    fn confirm_delete(&mut self, resource: &str, id: i64) -> bool {
        self(resource, id)
    }
}

/// A dialog that deletes an object after the user confirmed it
pub struct DeleteDialog<'s, 'c, E, T> {
    service: &'s EntityService<E, T>,
    confirm: &'c mut dyn Confirm,
}

impl<'s, 'c, E: Entity, T: Transport> DeleteDialog<'s, 'c, E, T> {
    pub fn new(service: &'s EntityService<E, T>, confirm: &'c mut dyn Confirm) -> Self {
        Self { service, confirm }
    }

    /// Show the dialog for `entity` and wait until it is closed
    pub async fn open(self, entity: &E) -> DialogClose {
        let Some(id) = entity.id() else {
            warn!(resource = E::RESOURCE, "cannot delete an object without an id");
            return DialogClose::Dismissed;
        };
        if !self.confirm.confirm_delete(E::NAME, id) {
            return DialogClose::Dismissed;
        }
        match self.service.delete(id).await {
            Ok(()) => {
                info!(resource = E::RESOURCE, id, "deleted");
                DialogClose::Deleted
            }
            Err(e) => {
                warn!(resource = E::RESOURCE, id, error = %e, "delete failed");
                DialogClose::Dismissed
            }
        }
    }
}
