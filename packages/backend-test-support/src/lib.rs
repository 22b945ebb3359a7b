//! Test support shared by the backend's unit and integration tests:
//! idempotent logging setup and assertions on the JSON error shape.

pub mod error_body;
pub mod logging;
