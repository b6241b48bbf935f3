/// Database layer
///
/// - `pool`: PostgreSQL connection pool and health probe
/// - `migrations`: Embedded schema migrations
///
/// Models with their queries live in the `models` module at crate root.

pub mod migrations;
pub mod pool;
