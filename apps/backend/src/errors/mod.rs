//! Error taxonomy for the drinks API.

pub mod error_code;

pub use error_code::ErrorCode;
