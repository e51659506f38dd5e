// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;

use tracing::{debug, error, info};

use crate::db::Store;
use crate::model::{Persistable as _, Records};
use crate::shim::clock::ChainEpoch;

/// Records of consecutive heights, committed in one transaction.
#[derive(Debug)]
pub struct PersistBatch {
    pub records: Records,
    /// Lowest height in the batch.
    pub from_epoch: ChainEpoch,
    /// Highest height in the batch.
    pub to_epoch: ChainEpoch,
}

impl fmt::Display for PersistBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.from_epoch, self.to_epoch)
    }
}

/// Outcome counts of one persistence worker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub committed: usize,
    pub failed: usize,
}

impl std::ops::AddAssign for WorkerStats {
    fn add_assign(&mut self, rhs: Self) {
        self.committed += rhs.committed;
        self.failed += rhs.failed;
    }
}

/// Commits batches until every sender is gone and the queue is drained.
///
/// A batch that fails to commit is rolled back, logged and skipped.
pub async fn persist_worker(
    id: usize,
    store: Store,
    batches: flume::Receiver<PersistBatch>,
) -> WorkerStats {
    let mut stats = WorkerStats::default();
    while let Ok(batch) = batches.recv_async().await {
        let rows = batch.records.len();
        let range = batch.to_string();
        match store.persist(batch.records).await {
            Ok(()) => {
                stats.committed += 1;
                info!("committed {rows} rows for epochs {range}");
            }
            Err(e) => {
                stats.failed += 1;
                error!("failed to persist epochs {range}: {e:#}");
            }
        }
    }
    debug!(
        "persistence worker {id} exiting: {} committed, {} failed",
        stats.committed, stats.failed
    );
    stats
}
