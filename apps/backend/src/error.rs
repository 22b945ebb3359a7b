use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::errors::ErrorCode;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl ErrorBody {
    pub fn for_code(code: ErrorCode) -> Self {
        Self {
            success: false,
            error: code.status().as_u16(),
            message: code.message().to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {detail}")]
    BadRequest { detail: String },
    #[error("Not found: {detail}")]
    NotFound { detail: String },
    #[error("Unprocessable entity: {detail}")]
    Unprocessable { detail: String },
    #[error("UnauthorizedMissingBearer")]
    UnauthorizedMissingBearer,
    #[error("UnauthorizedInvalidJwt")]
    UnauthorizedInvalidJwt,
    #[error("UnauthorizedExpiredJwt")]
    UnauthorizedExpiredJwt,
    #[error("UnauthorizedInvalidClaims: {detail}")]
    UnauthorizedInvalidClaims { detail: String },
    #[error("Forbidden: missing permission '{permission}'")]
    Forbidden { permission: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// The taxonomy member this error is reported as.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::BadRequest { .. } => ErrorCode::BadRequest,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::Unprocessable { .. } => ErrorCode::UnprocessableEntity,
            AppError::UnauthorizedMissingBearer
            | AppError::UnauthorizedInvalidJwt
            | AppError::UnauthorizedExpiredJwt
            | AppError::UnauthorizedInvalidClaims { .. } => ErrorCode::Unauthorized,
            AppError::Forbidden { .. } => ErrorCode::Forbidden,
            AppError::Db { .. } | AppError::Internal { .. } | AppError::Config { .. } => {
                ErrorCode::Internal
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        self.code().status()
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound {
            detail: detail.into(),
        }
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::Unprocessable {
            detail: detail.into(),
        }
    }

    pub fn unauthorized_missing_bearer() -> Self {
        Self::UnauthorizedMissingBearer
    }

    pub fn unauthorized_invalid_jwt() -> Self {
        Self::UnauthorizedInvalidJwt
    }

    pub fn unauthorized_expired_jwt() -> Self {
        Self::UnauthorizedExpiredJwt
    }

    pub fn unauthorized_invalid_claims(detail: impl Into<String>) -> Self {
        Self::UnauthorizedInvalidClaims {
            detail: detail.into(),
        }
    }

    pub fn forbidden(permission: impl Into<String>) -> Self {
        Self::Forbidden {
            permission: permission.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    /// Re-classify storage failures as 422, leaving every other error as is.
    /// Used by the write handlers, which report failed writes as unprocessable.
    pub fn db_as_unprocessable(self) -> Self {
        match self {
            AppError::Db { detail } => AppError::Unprocessable { detail },
            other => other,
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::db(format!("db error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let code = self.code();
        let status = code.status();

        // Details stay in the logs; clients only see the fixed message.
        if status.is_server_error() {
            error!(code = %code, error = %self, "request failed");
        } else {
            warn!(code = %code, error = %self, "request rejected");
        }

        let mut builder = HttpResponse::build(status);
        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        builder.json(ErrorBody::for_code(code))
    }
}
