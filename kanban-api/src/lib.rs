//! # Kanban API Server Library
//!
//! HTTP surface of the kanban board service: cookie sessions, boards and
//! tasks served as JSON under `/api`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Body and path extractors that reject with `ApiError`
//! - `middleware`: Response layers
//! - `routes`: API route handlers
//! - `session`: Session cookie handling and the session gate

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod session;
