//! This is a library that provides objects and functionality to manage photo contests
//! and their pictures through the crazypic REST api.
//!
//! The [service::EntityService] wraps the REST calls for a single kind of object.
//! On top of it sit the controllers behind the views of a front end: the
//! [list::ListController], the [update::UpdateController] and the
//! [resolver::Resolver] that supplies an edit view with its object.

pub mod contest;
pub mod datetime;
pub mod delete;
pub mod entity;
pub mod error;
pub mod list;
pub mod navigation;
pub mod picture;
pub mod resolver;
pub mod service;
pub mod transport;
pub mod update;

pub use error::Error;
pub use error::Result;
