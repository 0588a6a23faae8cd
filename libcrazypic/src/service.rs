//! A typed client for the REST resource of a single kind of [Entity]
use crate::{
    entity::{self, Entity},
    error::{Error, Result},
    transport::{ApiRequest, ApiResponse, MERGE_PATCH_CONTENT_TYPE, Method, Transport},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{marker::PhantomData, str::FromStr, sync::Arc};
use tracing::debug;

/// The direction in which a list of objects is sorted
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display, strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort the results of a query by a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub field: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.field, self.direction)
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    /// Parses `field` or `field,asc|desc`
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(',') {
            None if !s.trim().is_empty() => Ok(Self::new(s.trim(), SortDirection::Asc)),
            Some((field, dir)) if !field.trim().is_empty() => SortDirection::from_str(dir.trim())
                .map(|direction| Self::new(field.trim(), direction))
                .map_err(|_| Error::InvalidOperation(format!("invalid sort direction '{dir}'"))),
            _ => Err(Error::InvalidOperation(format!("invalid sort order '{s}'"))),
        }
    }
}

/// Paging, sorting and filtering options for listing objects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Vec<SortOrder>,
    pub filters: Vec<(String, String)>,
}

impl QueryOptions {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn sort(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// The query string parameters for these options. Each sort order becomes its own
    /// `sort` parameter.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        pairs.extend(self.filters.iter().cloned());
        pairs.extend(self.sort.iter().map(|s| ("sort".to_string(), s.to_string())));
        pairs
    }
}

/// Wraps the create/read/update/delete calls for the resource of entity `E`.
///
/// Timestamps are sent as RFC 3339 strings and turned back into
/// [time::OffsetDateTime] values for every response. Failures are returned to the
/// caller as-is; nothing is retried or cached.
pub struct EntityService<E, T> {
    transport: Arc<T>,
    phantom: PhantomData<fn() -> E>,
}

impl<E, T> Clone for EntityService<E, T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            phantom: PhantomData,
        }
    }
}

impl<E: Entity, T: Transport> EntityService<E, T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            phantom: PhantomData,
        }
    }

    /// The path of the resource collection relative to the server
    pub fn resource_path() -> String {
        format!("api/{}", E::RESOURCE)
    }

    fn item_path(id: i64) -> String {
        format!("{}/{id}", Self::resource_path())
    }

    async fn send(&self, request: ApiRequest, id: Option<i64>) -> Result<ApiResponse> {
        let method = request.method;
        let response = self.transport.execute(request).await?;
        debug!(%method, resource = E::RESOURCE, ?id, status = response.status, "request finished");
        check_status(response, E::NAME, id)
    }

    /// Create a new object on the server and return it with its assigned id
    pub async fn create(&self, entity: &E) -> Result<E> {
        let request =
            ApiRequest::new(Method::Post, Self::resource_path()).with_body(serde_json::to_value(entity)?);
        decode_body(self.send(request, None).await?)
    }

    /// Replace the object on the server with `entity`
    pub async fn update(&self, entity: &E) -> Result<E> {
        let id = entity.id().ok_or(Error::MissingId)?;
        let request =
            ApiRequest::new(Method::Put, Self::item_path(id)).with_body(serde_json::to_value(entity)?);
        decode_body(self.send(request, Some(id)).await?)
    }

    /// Merge the fields that are set in `entity` into the object on the server
    pub async fn partial_update(&self, entity: &E) -> Result<E> {
        let id = entity.id().ok_or(Error::MissingId)?;
        let request = ApiRequest::new(Method::Patch, Self::item_path(id))
            .with_body(serde_json::to_value(entity)?)
            .with_content_type(MERGE_PATCH_CONTENT_TYPE);
        decode_body(self.send(request, Some(id)).await?)
    }

    /// Fetch a single object. Returns [Error::NotFound] if there is no object with
    /// this id.
    pub async fn find(&self, id: i64) -> Result<E> {
        let request = ApiRequest::new(Method::Get, Self::item_path(id));
        decode_body(self.send(request, Some(id)).await?)
    }

    /// List objects
    pub async fn query(&self, options: &QueryOptions) -> Result<Vec<E>> {
        let request =
            ApiRequest::new(Method::Get, Self::resource_path()).with_query(options.to_query_pairs());
        let response = self.send(request, None).await?;
        match response.body {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(body) => serde_json::from_value(body).map_err(Into::into),
        }
    }

    /// Delete an object from the server
    pub async fn delete(&self, id: i64) -> Result<()> {
        let request = ApiRequest::new(Method::Delete, Self::item_path(id));
        self.send(request, Some(id)).await.map(|_| ())
    }

    /// See [entity::add_to_collection_if_missing]
    pub fn add_to_collection_if_missing<I>(&self, collection: Vec<E>, candidates: I) -> Vec<E>
    where
        I: IntoIterator<Item = Option<E>>,
    {
        entity::add_to_collection_if_missing(collection, candidates)
    }
}

fn check_status(response: ApiResponse, resource: &'static str, id: Option<i64>) -> Result<ApiResponse> {
    match response.status {
        200..=299 => Ok(response),
        404 => match id {
            Some(id) => Err(Error::NotFound { resource, id }),
            None => Err(Error::Status {
                status: 404,
                message: response.error_message(),
            }),
        },
        400 => Err(Error::BadRequest(response.error_message())),
        status => Err(Error::Status {
            status,
            message: response.error_message(),
        }),
    }
}

fn decode_body<E: DeserializeOwned>(response: ApiResponse) -> Result<E> {
    match response.body {
        None | Some(Value::Null) => Err(Error::EmptyResponse),
        Some(body) => serde_json::from_value(body).map_err(Into::into),
    }
}
