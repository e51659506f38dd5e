// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Rows written by the indexer, one type per table.
//!
//! Every row carries its table's primary key and is inserted with
//! `INSERT OR IGNORE`, so committing the same rows twice is a no-op.

use anyhow::Context as _;
use async_trait::async_trait;
use itertools::Itertools as _;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, query_builder::Separated};

/// Host parameters one statement may bind. SQLite's limit is 32766.
const MAX_BIND_PARAMS: usize = 32_000;

/// Values of one row inside a multi-row `INSERT`.
pub type RowBinder<'qb, 'args> = Separated<'qb, 'args, Sqlite, &'static str>;

/// Implements [`Record`] for a row type, binding the listed fields in order
/// to the columns of the same name.
macro_rules! impl_record {
    ($ty:ty, $table:literal, [$($column:ident),+ $(,)?]) => {
        impl $crate::model::Record for $ty {
            const TABLE: &'static str = $table;
            const COLUMNS: &'static [&'static str] = &[$(stringify!($column)),+];

            fn push_binds<'args>(&'args self, row: &mut $crate::model::RowBinder<'_, 'args>) {
                $(row.push_bind(&self.$column);)+
            }
        }
    };
}

pub mod actors;
pub mod blocks;
pub mod market;
pub mod messages;
pub mod miner;
pub mod power;

pub use actors::{Actor, ActorState};
pub use blocks::{BlockHeader, BlockParent, DrandBlockEntry};
pub use market::{MarketDealProposal, MarketDealState};
pub use messages::{
    BlockMessage, DerivedGasOutputs, Message, MessageGasEconomy, ParsedMessage, Receipt,
};
pub use miner::{
    MinerCurrentDeadlineInfo, MinerFeeDebt, MinerInfo, MinerLockedFund, MinerPreCommitInfo,
    MinerSectorDeal, MinerSectorEvent, MinerSectorEventType, MinerSectorInfo,
};
pub use power::{ChainPower, PowerActorClaim};

/// A row of a single table.
pub trait Record: Send + Sync {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn push_binds<'args>(&'args self, row: &mut RowBinder<'_, 'args>);
}

/// `INSERT OR IGNORE` prefix for rows of `R`, up to the `VALUES` list.
fn insert_prefix<R: Record>() -> String {
    format!(
        "INSERT OR IGNORE INTO {} ({}) ",
        R::TABLE,
        R::COLUMNS.iter().map(|column| format!("\"{column}\"")).join(", ")
    )
}

/// Something that can write itself inside an open transaction.
#[async_trait]
pub trait Persistable: Send + Sync {
    /// Table (or group of tables) written.
    fn name(&self) -> &'static str;

    /// Number of rows written.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn persist_with_tx(&self, conn: &mut SqliteConnection) -> anyhow::Result<()>;
}

#[async_trait]
impl<R: Record> Persistable for Vec<R> {
    fn name(&self) -> &'static str {
        R::TABLE
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    /// Writes the rows with as few multi-row statements as the bind limit
    /// allows, keeping the write lock short.
    async fn persist_with_tx(&self, conn: &mut SqliteConnection) -> anyhow::Result<()> {
        let rows_per_statement = (MAX_BIND_PARAMS / R::COLUMNS.len()).max(1);
        for chunk in self.chunks(rows_per_statement) {
            let mut query = QueryBuilder::<Sqlite>::new(insert_prefix::<R>());
            query.push_values(chunk, |mut row, record| record.push_binds(&mut row));
            query
                .build()
                .execute(&mut *conn)
                .await
                .with_context(|| format!("inserting into {}", R::TABLE))?;
        }
        Ok(())
    }
}

/// Rows of any tables, in the order they were added.
#[derive(Default)]
pub struct Records(Vec<Box<dyn Persistable>>);

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a batch of rows, dropping empty batches.
    pub fn push<R: Record + 'static>(&mut self, rows: Vec<R>) {
        if !rows.is_empty() {
            self.0.push(Box::new(rows));
        }
    }

    pub fn append(&mut self, other: &mut Records) {
        self.0.append(&mut other.0);
    }

    /// Total number of rows.
    pub fn row_count(&self) -> usize {
        self.0.iter().map(|batch| batch.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Persistable> {
        self.0.iter().map(|batch| batch.as_ref())
    }
}

impl std::fmt::Debug for Records {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|batch| (batch.name(), batch.len())))
            .finish()
    }
}

#[async_trait]
impl Persistable for Records {
    fn name(&self) -> &'static str {
        "records"
    }

    fn len(&self) -> usize {
        self.row_count()
    }

    async fn persist_with_tx(&self, conn: &mut SqliteConnection) -> anyhow::Result<()> {
        for batch in &self.0 {
            batch.persist_with_tx(conn).await?;
        }
        Ok(())
    }
}
