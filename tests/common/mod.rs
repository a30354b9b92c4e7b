//! Shared helpers for integration tests backed by a temporary SQLite file.

use customer_mngt::db::{DbPool, establish_connection_pool, run_migrations};
use tempfile::TempDir;

pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("connection pool");

        let mut conn = pool.get().expect("pooled connection");
        run_migrations(&mut conn).expect("migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
