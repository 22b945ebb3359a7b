//! Environment-driven configuration.

pub mod auth;
pub mod db;
