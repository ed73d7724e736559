use thiserror::Error;

/// Errors surfaced by the typed API client.
///
/// There are no automatic retries anywhere: every error is reported once and
/// left to the caller (re-open the form, re-run the command).
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The backend answered with a non-success status. The message is the
    /// server's `error` field when it sent one.
    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Operation requires authentication; call login() first")]
    NotAuthenticated,
}

/// Errors from the dish authoring session (client-side form model).
#[derive(Error, Debug)]
pub enum AuthoringError {
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The scalar dish write itself failed; nothing was persisted.
    #[error("Dish could not be saved: {0}")]
    DishWrite(#[source] ApiError),
}
