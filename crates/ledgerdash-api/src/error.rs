//! Error types for ledgerdash-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ledgerdash_core::error::{DefaultErrorLogger, ErrorContext, ErrorLogger};
use ledgerdash_core::{CoreError, ErrorCode, ErrorDetails};
use ledgerdash_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(e) => match e.code() {
                ErrorCode::TransactionNotFound
                | ErrorCode::CategoryNotFound
                | ErrorCode::AccountNotFound
                | ErrorCode::CompanyNotFound => StatusCode::NOT_FOUND,
                ErrorCode::ValidationError | ErrorCode::InvalidFormat => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::DuplicateEntry => StatusCode::CONFLICT,
                ErrorCode::IoError => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to the JSON body sent to clients
    pub fn to_details(&self) -> ErrorDetails {
        match self {
            ApiError::Core(e) => e.to_details(),
            ApiError::BadRequest { .. } => ErrorDetails::new(ErrorCode::InvalidFormat, self.to_string()),
            ApiError::Store(_) => ErrorDetails::new(ErrorCode::IoError, self.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Core(e) => {
                DefaultErrorLogger.log_error(e, &ErrorContext::new("api request").with_data("status", status.as_u16().into()))
            }
            ApiError::Store(_) => log::error!(target: "ledgerdash::api", "{}", self),
            ApiError::BadRequest { .. } => log::debug!(target: "ledgerdash::api", "{}", self),
        }
        (status, Json(self.to_details())).into_response()
    }
}

/// Result type with ApiError
pub type ApiResult<T> = Result<T, ApiError>;
