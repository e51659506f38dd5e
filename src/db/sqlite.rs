// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! SQLite pool setup and schema stamping.

use sqlx::{
    SqlitePool,
    query::Query,
    sqlite::{
        SqliteArguments, SqliteAutoVacuum, SqliteConnectOptions, SqliteJournalMode,
        SqliteSynchronous,
    },
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// How long a connection waits for another writer's lock before failing with
/// `database is locked`.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(600);

pub type SqliteQuery<'q> = Query<'q, sqlx::Sqlite, SqliteArguments<'q>>;

/// Opens the database file, creating it and its directory when missing.
pub async fn open_file(file: &Path, busy_timeout: Duration) -> anyhow::Result<SqlitePool> {
    if let Some(dir) = file.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }
    let options = SqliteConnectOptions::new()
        .filename(file)
        .create_if_missing(true)
        .busy_timeout(busy_timeout);
    Ok(open(options).await?)
}

/// Opens a pool tuned for many concurrent writers committing short
/// transactions. Writers queue on SQLite's single write lock for as long as
/// the options' busy timeout allows.
pub async fn open(options: SqliteConnectOptions) -> sqlx::Result<SqlitePool> {
    let options = options
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .auto_vacuum(SqliteAutoVacuum::None)
        .pragma("temp_store", "memory")
        .pragma("mmap_size", "30000000000")
        // truncate the WAL after every checkpoint
        .pragma("journal_size_limit", "0")
        .foreign_keys(true);
    SqlitePool::connect_with(options).await
}

/// Creates the tables of a fresh database and stamps it with `version`.
///
/// A database stamped with another version is rejected: indexed rows are
/// cheap to rebuild, so there are no in-place upgrades.
pub async fn init_db<'q>(
    db: &SqlitePool,
    name: &str,
    version: i64,
    ddls: impl IntoIterator<Item = SqliteQuery<'q>>,
) -> anyhow::Result<()> {
    let mut tx = db.begin().await?;
    sqlx::query("CREATE TABLE IF NOT EXISTS _meta (version INTEGER NOT NULL UNIQUE)")
        .execute(tx.as_mut())
        .await?;
    let found: Option<i64> = sqlx::query_scalar("SELECT max(version) FROM _meta")
        .fetch_one(tx.as_mut())
        .await?;
    match found {
        Some(found) if found == version => return Ok(()),
        Some(found) => anyhow::bail!(
            "{name} database has schema version {found}, this build expects {version}"
        ),
        None => {}
    }

    for ddl in ddls {
        ddl.execute(tx.as_mut()).await?;
    }
    sqlx::query("INSERT INTO _meta (version) VALUES (?)")
        .bind(version)
        .execute(tx.as_mut())
        .await?;
    tx.commit().await?;
    info!("created {name} database schema version {version}");
    Ok(())
}
