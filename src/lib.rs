// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Filecoin chain indexer.
//!
//! Walks the chain from a head (or an upper bound) down to a lower bound, diffs
//! the actor state trees of consecutive tipsets, extracts records for the
//! actors, deals, claims, miners, blocks and messages that changed, and commits
//! them in batches to SQLite through a pool of workers.
//!
//! The entry points are [`indexer::run`] and [`indexer::run_until`].

pub mod blocks;
pub mod chain;
pub mod chain_api;
pub mod cli_shared;
pub mod db;
pub mod extract;
pub mod indexer;
pub mod message;
pub mod model;
pub mod networks;
pub mod shim;
pub mod statediff;
pub mod utils;
#[cfg(test)]
mod test_utils;

pub use chain_api::{ChainApi, MemoryChain};
pub use db::Store;
pub use indexer::{Error, IndexerConfig, RunOutcome, RunSummary, run, run_until};
