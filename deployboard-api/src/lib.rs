//! # Deployboard API Server Library
//!
//! JSON endpoints for the deployments dashboard, backed by the query service in
//! `deployboard-shared`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `cache`: Cache-Control handling for read endpoints
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod routes;
