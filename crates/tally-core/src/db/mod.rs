//! On-disk ledger backed by SQLite
//!
//! The database is a plain key-value table: each ledger collection is one
//! row holding the whole collection as a JSON array. This keeps the storage
//! shape identical to the in-memory model (no relations, no foreign keys)
//! while still giving atomic read-modify-write per collection through
//! SQLite transactions.
//!
//! Keys:
//! - `transactions` - `Vec<Transaction>`
//! - `budgets` - `Vec<Budget>`
//! - `goals` - `Vec<SavingsGoal>`

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension, TransactionBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::ledger::LedgerStore;
use crate::models::{Budget, SavingsGoal, Transaction};


pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

pub const TRANSACTIONS_KEY: &str = "transactions";
pub const BUDGETS_KEY: &str = "budgets";
pub const GOALS_KEY: &str = "goals";

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) the database file at `path`
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        info!("Opened ledger database at {}", path);
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    ///
    /// Each SQLite `:memory:` connection is its own database, so the pool is
    /// capped at a single connection.
    pub fn in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager)?;

        let db = Self {
            pool,
            db_path: ":memory:".to_string(),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the single writer
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- One row per ledger collection, value is a JSON array
            CREATE TABLE IF NOT EXISTS collections (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;

        Ok(())
    }

    /// Load one collection; a missing key is an empty collection
    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let conn = self.conn()?;
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM collections WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Read, mutate and write back one collection inside an IMMEDIATE
    /// transaction, so the write lock is held from the first read
    fn modify_collection<T: Serialize + DeserializeOwned>(
        &self,
        key: &str,
        f: &mut dyn FnMut(&mut Vec<T>),
    ) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let raw: Option<String> = tx
            .query_row(
                "SELECT value FROM collections WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        let mut items: Vec<T> = match raw {
            Some(json) => serde_json::from_str(&json)?,
            None => Vec::new(),
        };

        f(&mut items);

        let json = serde_json::to_string(&items)?;
        tx.execute(
            r#"
            INSERT INTO collections (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP
            "#,
            rusqlite::params![key, json],
        )?;
        tx.commit()?;

        debug!(collection = key, len = items.len(), "Collection written");
        Ok(())
    }
}

impl LedgerStore for Database {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.read_collection(TRANSACTIONS_KEY)
    }

    fn list_budgets(&self) -> Result<Vec<Budget>> {
        self.read_collection(BUDGETS_KEY)
    }

    fn list_goals(&self) -> Result<Vec<SavingsGoal>> {
        self.read_collection(GOALS_KEY)
    }

    fn modify_transactions(&self, f: &mut dyn FnMut(&mut Vec<Transaction>)) -> Result<()> {
        self.modify_collection(TRANSACTIONS_KEY, f)
    }

    fn modify_budgets(&self, f: &mut dyn FnMut(&mut Vec<Budget>)) -> Result<()> {
        self.modify_collection(BUDGETS_KEY, f)
    }

    fn modify_goals(&self, f: &mut dyn FnMut(&mut Vec<SavingsGoal>)) -> Result<()> {
        self.modify_collection(GOALS_KEY, f)
    }
}
