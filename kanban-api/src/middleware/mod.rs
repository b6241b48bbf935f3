/// Middleware modules for the API server
///
/// Session checking lives in [`crate::session`] because it needs the
/// application state; this module holds stateless response layers.

pub mod security;
