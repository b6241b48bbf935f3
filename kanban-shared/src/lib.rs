//! # Kanban Shared Library
//!
//! Domain types, persistence and authentication primitives used by the
//! kanban API server.
//!
//! ## Module Organization
//!
//! - `models`: Users, boards and tasks with their PostgreSQL queries
//! - `store`: The `KanbanStore` trait with PostgreSQL and in-memory backends
//! - `db`: Connection pool and embedded migrations
//! - `auth`: Password hashing and cookie session stores
//! - `redis`: Redis client used by the Redis session backend

pub mod auth;
pub mod db;
pub mod models;
pub mod redis;
pub mod store;
