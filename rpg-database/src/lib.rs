use sqlx::{PgPool, migrate::Migrator};

/// Compile-time discovered SQLx migrations for the `rpg-database` crate.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Shared database handle passed across crates.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a database handle from an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Expose the underlying pool for query modules.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Errors surfaced by the store modules.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error("item `{0}` does not exist")]
    ItemNotFound(String),
}

pub type Result<T, E = DatabaseError> = std::result::Result<T, E>;

/// Discord snowflakes always fit in a signed 64-bit column.
pub(crate) fn key(id: u64) -> i64 {
    id as i64
}

/// Character counts for the settings overview.
pub mod characters;
/// Per-guild settings record.
pub mod guilds;
/// Server-defined items.
pub mod items;
/// Row types shared by the store modules.
pub mod model;
/// Shop entries attached to items.
pub mod shop;
