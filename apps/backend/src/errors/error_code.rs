//! Error codes for the drinks API.
//!
//! Every failure a client can observe is one of these variants. Each maps to
//! exactly one HTTP status and one fixed message; add new codes here, never
//! build ad-hoc status/message pairs at call sites.

use core::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Request body or parameters are syntactically or semantically wrong
    BadRequest,
    /// Missing, malformed, expired or otherwise unverifiable credential
    Unauthorized,
    /// Valid credential without the permission the route requires
    Forbidden,
    /// No record with the requested identity
    NotFound,
    /// Well-formed request that could not be applied
    UnprocessableEntity,
    /// Anything else
    Internal,
}

impl ErrorCode {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The fixed, client-facing message for this code.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized access",
            Self::Forbidden => "Request Forbidden",
            Self::NotFound => "Resource not found",
            Self::UnprocessableEntity => "Unprocessable entity",
            Self::Internal => "Internal Server Error",
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            Self::Internal => "INTERNAL",
        }
    }

    pub const ALL: [ErrorCode; 6] = [
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::NotFound,
        Self::UnprocessableEntity,
        Self::Internal,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
