mod category_repository;
mod models;
mod question_repository;

use crate::errors::Error;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use tracing::info;

pub use category_repository::*;
pub use models::*;
pub use question_repository::*;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Pragmas applied to every pooled SQLite connection
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

#[derive(Clone, Debug)]
pub struct Database {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl Database {
    /// Opens (or creates) the SQLite database at `db_path` and applies pending migrations
    pub fn open(db_path: &str) -> Result<Self, Error> {
        info!("Opening database at {}", db_path);
        Self::build(db_path, Pool::builder())
    }

    /// Opens a private in-memory database.
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool is
    /// capped at a single connection.
    pub fn open_in_memory() -> Result<Self, Error> {
        Self::build(":memory:", Pool::builder().max_size(1))
    }

    fn build(
        db_path: &str,
        builder: diesel::r2d2::Builder<ConnectionManager<SqliteConnection>>,
    ) -> Result<Self, Error> {
        let manager = ConnectionManager::<SqliteConnection>::new(db_path);
        let pool = builder
            .connection_customizer(Box::new(ConnectionOptions))
            .build(manager)?;

        let database = Database {
            pool: Arc::new(pool),
        };
        database.run_migrations()?;
        Ok(database)
    }

    fn run_migrations(&self) -> Result<(), Error> {
        let mut conn = self.get_conn()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| Error::MigrationError(e.to_string()))?;
        for version in applied {
            info!("Applied migration {}", version);
        }
        Ok(())
    }

    pub fn get_conn(&self) -> Result<DbConnection, Error> {
        Ok(self.pool.get()?)
    }
}
