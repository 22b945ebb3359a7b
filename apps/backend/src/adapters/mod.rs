pub mod drinks_sea;
