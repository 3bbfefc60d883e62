//! Membership gate: who is allowed to submit slips.
//!
//! Membership is monotonic. A user becomes a member on `/join` or when they
//! follow the bot account and is never removed.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::core::error::AppResult;
use crate::storage::{get_connection, DbPool};

/// Answers "is this user a member" and records new members.
///
/// Implementations must never hold a lock past the end of a call, and
/// `add_member` must be idempotent.
#[async_trait]
pub trait MembershipOracle: Send + Sync {
    /// Returns `true` if the user has joined. Store failures read as `false`.
    async fn is_member(&self, user_id: &str) -> bool;

    /// Records the user as a member. Re-adding an existing member is a no-op.
    async fn add_member(&self, user_id: &str) -> AppResult<()>;
}

/// Process-local member set. Lost on restart.
#[derive(Clone, Default)]
pub struct InMemoryMembership {
    members: Arc<Mutex<HashSet<String>>>,
}

impl InMemoryMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct members currently recorded
    pub async fn len(&self) -> usize {
        self.members.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.lock().await.is_empty()
    }
}

#[async_trait]
impl MembershipOracle for InMemoryMembership {
    async fn is_member(&self, user_id: &str) -> bool {
        self.members.lock().await.contains(user_id)
    }

    async fn add_member(&self, user_id: &str) -> AppResult<()> {
        let inserted = self.members.lock().await.insert(user_id.to_string());
        if inserted {
            log::debug!("Added member {}", user_id);
        }
        Ok(())
    }
}

/// Member table in SQLite, one row per user id.
///
/// `add_member` is an `INSERT OR IGNORE` on the primary key, so concurrent
/// adds for the same id collapse into a single row.
#[derive(Clone)]
pub struct SqliteMembership {
    pool: Arc<DbPool>,
}

impl SqliteMembership {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Number of member rows in the store
    pub fn count_members(&self) -> AppResult<i64> {
        let conn = get_connection(&self.pool)?;
        let count = conn.query_row("SELECT COUNT(*) FROM members", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Runs a store call on the blocking pool; r2d2 and rusqlite block on
    /// the SQLite lock.
    async fn with_store<T, F>(&self, f: F) -> AppResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&DbPool) -> AppResult<T> + Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || f(pool.as_ref())).await?
    }
}

fn lookup(pool: &DbPool, user_id: &str) -> AppResult<bool> {
    let conn = get_connection(pool)?;
    let found: i64 = conn.query_row(
        "SELECT COUNT(*) FROM members WHERE user_id = ?1",
        rusqlite::params![user_id],
        |row| row.get(0),
    )?;
    Ok(found > 0)
}

fn upsert(pool: &DbPool, user_id: &str) -> AppResult<bool> {
    let conn = get_connection(pool)?;
    let changed = conn.execute(
        "INSERT OR IGNORE INTO members (user_id, joined_at) VALUES (?1, ?2)",
        rusqlite::params![user_id, chrono::Utc::now().to_rfc3339()],
    )?;
    Ok(changed > 0)
}

#[async_trait]
impl MembershipOracle for SqliteMembership {
    async fn is_member(&self, user_id: &str) -> bool {
        let id = user_id.to_string();
        match self.with_store(move |pool| lookup(pool, &id)).await {
            Ok(found) => found,
            Err(e) => {
                log::error!("Membership lookup failed for {}, treating as non-member: {}", user_id, e);
                false
            }
        }
    }

    async fn add_member(&self, user_id: &str) -> AppResult<()> {
        let id = user_id.to_string();
        if self.with_store(move |pool| upsert(pool, &id)).await? {
            log::debug!("Stored new member {}", user_id);
        }
        Ok(())
    }
}
