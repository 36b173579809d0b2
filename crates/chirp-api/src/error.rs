use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, error};

/// Every way a service call can fail. Handlers return this directly and
/// axum turns it into a bare status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Blank username or too-short password on registration.
    #[error("invalid account details")]
    InvalidAccount,

    #[error("username already exists")]
    DuplicateUsername,

    /// Unknown username or wrong password on login.
    #[error("invalid username or password")]
    Unauthorized,

    /// Bad text or unknown poster on message submission.
    #[error("invalid message")]
    InvalidMessage,

    /// Body that is not JSON, lacks a JSON content type, or has fields of
    /// the wrong type.
    #[error("unreadable request body: {0}")]
    MalformedBody(#[from] JsonRejection),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidAccount | Self::InvalidMessage | Self::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::DuplicateUsername => StatusCode::CONFLICT,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Storage(e) => error!("Storage failure: {:#}", e),
            Self::MalformedBody(rejection) => debug!("Rejected request body: {}", rejection),
            _ => {}
        }
        // Error responses never carry a body
        self.status().into_response()
    }
}
