//! Fetching the object for an edit view before the view is shown
use crate::{
    entity::Entity,
    error::{Error, Result},
    navigation::{NOT_FOUND_ROUTE, Navigator},
    service::EntityService,
    transport::Transport,
};
use tracing::debug;

/// Supplies an edit view with the object it should show
pub struct Resolver<E, T> {
    service: EntityService<E, T>,
}

impl<E: Entity, T: Transport> Resolver<E, T> {
    pub fn new(service: EntityService<E, T>) -> Self {
        Self { service }
    }

    /// Resolve the object for the route parameter `id`.
    ///
    /// Without an id this yields a blank object. If the object does not exist on
    /// the server the navigator is sent to the not-found route and `None` is
    /// returned, which cancels the navigation. Any other failure is returned as an
    /// error.
    pub async fn resolve(&self, id: Option<i64>, navigator: &mut dyn Navigator) -> Result<Option<E>> {
        let Some(id) = id else {
            return Ok(Some(E::default()));
        };
        match self.service.find(id).await {
            Ok(entity) => Ok(Some(entity)),
            Err(Error::NotFound { .. } | Error::EmptyResponse) => {
                debug!(resource = E::RESOURCE, id, "object not found, redirecting");
                navigator.navigate(NOT_FOUND_ROUTE);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
