//! Helpers for integration tests.

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use product_board::db::{DbPool, establish_connection_pool};
use product_board::domain::user::{NewUser, User};
use product_board::repository::UserWriter;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests. The backing file lives in
/// a [`TempDir`] and is removed when the value is dropped.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory.");
        let database_url = dir.path().join("test.db").to_string_lossy().into_owned();

        let pool = establish_connection_pool(&database_url)
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");

        TestDb { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

#[allow(dead_code)]
pub fn create_test_user<W: UserWriter>(repo: &W, email: &str) -> User {
    repo.create_user(&NewUser::new(
        email.to_string(),
        "not-a-real-hash".to_string(),
    ))
    .expect("Failed to create test user")
}
