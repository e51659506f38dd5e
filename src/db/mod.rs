// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod schema;
pub mod sqlite;

use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use futures::future::BoxFuture;
use sqlx::{SqliteConnection, SqlitePool};

use crate::model::Persistable;

/// The relational store records are committed to.
#[derive(Clone, Debug)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens (or creates) the database file and makes sure the schema exists.
    pub async fn open_file(path: &Path) -> anyhow::Result<Self> {
        Self::open_file_with_timeout(path, sqlite::DEFAULT_BUSY_TIMEOUT).await
    }

    /// Like [`Store::open_file`], waiting at most `busy_timeout` for the
    /// write lock.
    pub async fn open_file_with_timeout(
        path: &Path,
        busy_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let pool = sqlite::open_file(path, busy_timeout)
            .await
            .with_context(|| format!("opening {}", path.display()))?;
        Self::new(pool).await
    }

    /// Wraps an already open pool, creating the schema if needed.
    pub async fn new(pool: SqlitePool) -> anyhow::Result<Self> {
        sqlite::init_db(
            &pool,
            schema::SCHEMA_NAME,
            schema::SCHEMA_VERSION,
            schema::DDL.iter().map(|ddl| sqlx::query(ddl)),
        )
        .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Runs `f` inside a transaction. The transaction commits when `f`
    /// succeeds and rolls back otherwise.
    pub async fn run_in_transaction<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, anyhow::Result<T>> + Send,
    {
        let mut tx = self.pool.begin().await?;
        // dropping an uncommitted transaction rolls it back
        let value = f(tx.as_mut()).await?;
        tx.commit().await?;
        Ok(value)
    }

    /// Writes `records` in a single transaction.
    pub async fn persist<P>(&self, records: P) -> anyhow::Result<()>
    where
        P: Persistable + 'static,
    {
        self.run_in_transaction(move |conn| {
            Box::pin(async move { records.persist_with_tx(conn).await })
        })
        .await
    }

    /// Number of rows in `table`.
    pub async fn count(&self, table: &str) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn close(&self) {
        self.pool.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Actor, Records};

    fn actor(height: i64, id: &str) -> Actor {
        Actor {
            height,
            id: id.into(),
            state_root: "root".into(),
            code: "fil/1/account".into(),
            head: "head".into(),
            balance: "0".into(),
            nonce: 0,
        }
    }

    #[tokio::test]
    async fn persisting_twice_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_file(&dir.path().join("index.db")).await.unwrap();

        store
            .persist(vec![actor(1, "f01"), actor(1, "f02")])
            .await
            .unwrap();
        store
            .persist(vec![actor(1, "f01"), actor(1, "f02")])
            .await
            .unwrap();
        assert_eq!(store.count("actors").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn failed_transaction_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_file(&dir.path().join("index.db")).await.unwrap();

        let mut records = Records::new();
        records.push(vec![actor(1, "f01")]);
        let result = store
            .run_in_transaction(move |conn| {
                Box::pin(async move {
                    records.persist_with_tx(conn).await?;
                    sqlx::query("INSERT INTO no_such_table VALUES (1)")
                        .execute(&mut *conn)
                        .await?;
                    Ok(())
                })
            })
            .await;
        assert!(result.is_err());
        assert_eq!(store.count("actors").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn reopening_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.db");
        let store = Store::open_file(&path).await.unwrap();
        store.persist(vec![actor(3, "f01")]).await.unwrap();
        store.close().await;

        let store = Store::open_file(&path).await.unwrap();
        assert_eq!(store.count("actors").await.unwrap(), 1);
    }
}
