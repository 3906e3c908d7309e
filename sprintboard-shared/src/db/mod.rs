//! Database utilities: connection pool, migration runner, seed routine.

pub mod migrations;
pub mod pool;
pub mod seed;
