/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Register, login, logout and session check
/// - `boards`: Board listing, creation and lookup
/// - `tasks`: Task CRUD and column moves

pub mod auth;
pub mod boards;
pub mod health;
pub mod tasks;
