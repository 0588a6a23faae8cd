//! The common interface shared by all objects managed through the REST api
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashSet;

/// A trait implemented by every object that is stored on the server as a REST resource
pub trait Entity:
    Clone + Default + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The collection name of the resource, e.g. `contests` for `/api/contests`
    const RESOURCE: &'static str;

    /// A human-readable singular name for the object
    const NAME: &'static str;

    /// The server-assigned identifier. `None` means the object has not been
    /// persisted yet.
    fn id(&self) -> Option<i64>;

    /// Whether the server has already assigned an id to this object
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

/// Adds the given candidates to `collection` unless an object with the same id is
/// already present.
///
/// Missing candidates and candidates without an id are skipped. Newly added objects
/// are placed before the existing ones, in the order they were given, and the
/// existing objects keep their order.
pub fn add_to_collection_if_missing<E, I>(collection: Vec<E>, candidates: I) -> Vec<E>
where
    E: Entity,
    I: IntoIterator<Item = Option<E>>,
{
    let mut seen: HashSet<i64> = collection.iter().filter_map(Entity::id).collect();
    let to_add: Vec<E> = candidates
        .into_iter()
        .flatten()
        .filter(|candidate| candidate.id().is_some_and(|id| seen.insert(id)))
        .collect();
    if to_add.is_empty() {
        return collection;
    }
    to_add.into_iter().chain(collection).collect()
}
