// Callsigns Library
// Re-export modules for use in main.rs

pub mod cache;
pub mod callsign;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod fcc;
pub mod history;
pub mod license;
pub mod lookup;
pub mod reference;

pub use error::{Error, Result};
