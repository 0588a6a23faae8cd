//! Objects related to reporting errors from this library

/// A single field of an edit form that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The name of the form field
    pub field: &'static str,
    /// Why the field was rejected
    pub reason: &'static str,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A list of error types that can occur within this library
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unexpected response status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("can't update the object, no id was specified")]
    MissingId,

    #[error("invalid form: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("invalid server url '{0}'")]
    InvalidUrl(String),

    #[error("the server response did not contain a body")]
    EmptyResponse,
}

impl Error {
    /// Whether this error means the requested object does not exist on the server
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A convenience type alias for a [Result] with [Error] as its error type
pub type Result<T, E = Error> = std::result::Result<T, E>;
