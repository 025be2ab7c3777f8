mod command;
mod date;

pub use command::*;
pub use date::*;

use ulid::Ulid;

/// Connection pools shared by every command and query of the workspace.
///
/// Built once at startup and handed to each component; nothing in the
/// workspace opens a pool on its own.
#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}

impl State {
    /// Use the same pool for reads and writes (CLI commands and tests).
    pub fn single(pool: sqlx::SqlitePool) -> Self {
        Self {
            read_db: pool.clone(),
            write_db: pool,
        }
    }
}

pub fn new_id() -> String {
    Ulid::new().to_string()
}
