//! Entity persistence: statement executor and the generic entity manager.

pub mod executor;
mod manager;
pub use executor::{map_row, map_rows, PgExecutor, StatementExecutor};
pub use manager::EntityManager;
