//! # Deployboard Shared Library
//!
//! This crate contains the data layer used by the Deployboard API server.
//!
//! ## Module Organization
//!
//! - `db`: Connection pooling and migrations
//! - `models`: Database row types and the deployment write path
//! - `data`: Query service (search, pagination, aggregates, error translation)
//! - `format`: Currency and date formatting for display

pub mod data;
pub mod db;
pub mod format;
pub mod models;

/// Current version of the Deployboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
