// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;

use tracing::{debug, info};

use super::persist::PersistBatch;
use super::{Error, IndexerConfig};
use crate::blocks::Tipset;
use crate::chain_api::ChainApi;
use crate::extract::{ExtractContext, TipsetWindow, extract_height};
use crate::model::Records;
use crate::shim::clock::ChainEpoch;

/// Progress of a walk, readable after the walk future is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct WalkProgress {
    pub heights: usize,
    pub batches_queued: usize,
}

/// Heights extracted but not queued yet.
struct Accumulator {
    records: Records,
    heights: usize,
    /// Highest epoch in the accumulator.
    top: ChainEpoch,
    /// Lowest epoch in the accumulator.
    bottom: ChainEpoch,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            records: Records::new(),
            heights: 0,
            top: 0,
            bottom: 0,
        }
    }

    fn add(&mut self, epoch: ChainEpoch, mut records: Records) {
        if self.heights == 0 {
            self.top = epoch;
        }
        self.bottom = epoch;
        self.heights += 1;
        self.records.append(&mut records);
    }

    fn take(&mut self) -> PersistBatch {
        let acc = std::mem::replace(self, Self::new());
        PersistBatch {
            records: acc.records,
            from_epoch: acc.bottom,
            to_epoch: acc.top,
        }
    }
}

/// Tipset the walk starts from: the tipset at `to` when it is below the head,
/// otherwise the head's parent, whose state has been computed.
async fn starting_tipset<A: ChainApi + ?Sized>(
    api: &A,
    config: &IndexerConfig,
) -> anyhow::Result<Arc<Tipset>> {
    let head = api.chain_head().await?;
    if config.to > 0 && config.to < head.epoch() {
        api.chain_get_tipset_by_height(config.to, head.key()).await
    } else {
        api.chain_get_tipset(head.parents()).await
    }
}

/// Walks from the starting tipset down to the lowest configured epoch,
/// queueing a batch every `flush_every` heights.
///
/// Dropping the returned future drops `batches`, which lets the persistence
/// workers finish once the queue is drained.
pub async fn walk<A: ChainApi + ?Sized>(
    ctx: ExtractContext<'_, A>,
    config: &IndexerConfig,
    batches: flume::Sender<PersistBatch>,
    progress: &mut WalkProgress,
) -> Result<(), Error> {
    let api = ctx.api;
    let lowest = config.lowest_epoch();

    let mut cur = starting_tipset(api, config)
        .await
        .map_err(Error::StateLoad)?;
    let mut cur_state = api
        .load_state_tree(cur.parent_state())
        .await
        .map_err(Error::StateLoad)?;
    info!("indexing epochs {lowest} to {} on {}", cur.epoch(), ctx.network);

    let mut acc = Accumulator::new();
    while cur.epoch() >= lowest {
        let prev = api
            .chain_get_tipset(cur.parents())
            .await
            .map_err(Error::StateLoad)?;
        let prev_state = api
            .load_state_tree(prev.parent_state())
            .await
            .map_err(Error::StateLoad)?;
        let window = TipsetWindow {
            cur,
            prev,
            cur_state,
            prev_state,
        };

        let epoch = window.epoch();
        let records = extract_height(ctx, &window).await?;
        debug!("extracted {} rows at epoch {epoch}", records.row_count());
        acc.add(epoch, records);
        progress.heights += 1;

        if acc.heights >= config.flush_every {
            queue(&batches, acc.take(), progress).await?;
        }

        // null rounds are skipped by following parents
        cur = window.prev;
        cur_state = window.prev_state;
    }

    if acc.heights > 0 {
        queue(&batches, acc.take(), progress).await?;
    }
    info!("walk finished after {} heights", progress.heights);
    Ok(())
}

async fn queue(
    batches: &flume::Sender<PersistBatch>,
    batch: PersistBatch,
    progress: &mut WalkProgress,
) -> Result<(), Error> {
    debug!("queueing epochs {batch}");
    batches
        .send_async(batch)
        .await
        .map_err(|_| Error::QueueClosed)?;
    progress.batches_queued += 1;
    Ok(())
}
