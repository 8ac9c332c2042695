//! # Cellar Common Library
//!
//! Shared code for the cellar tools including:
//! - Wine record model
//! - Database initialization and wine queries
//! - Configuration loading
//! - Error types and time helpers

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod models;
pub mod time;

pub use error::{Error, Result};
pub use models::WineRecord;
