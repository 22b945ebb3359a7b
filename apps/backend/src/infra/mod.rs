//! Infrastructure: database connections and state construction.

pub mod db;
pub mod state;
