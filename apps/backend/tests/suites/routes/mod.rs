pub mod drinks_update;
