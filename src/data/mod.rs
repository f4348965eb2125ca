pub mod config_store;
pub mod export;
pub mod function;
pub mod params;
