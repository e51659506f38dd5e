// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Run orchestration: one walker producing batches of records and a pool of
//! workers committing them.
//!
//! The walker runs on the caller's task and hands batches to the workers
//! through a bounded queue, so a slow database slows the walk down instead of
//! buffering the chain in memory. On shutdown the walk is dropped together
//! with the only sender; workers drain what was already queued and exit.

mod config;
mod errors;
pub mod persist;
mod walker;


use std::future::Future;

use tokio::signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::task::JoinSet;
use tracing::{error, info, warn};

pub use self::config::IndexerConfig;
pub use self::errors::Error;
use self::persist::{WorkerStats, persist_worker};
use self::walker::WalkProgress;
use crate::chain_api::ChainApi;
use crate::db::Store;
use crate::extract::ExtractContext;

/// Counts describing a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Heights extracted, including those discarded on interruption.
    pub heights: usize,
    pub batches_queued: usize,
    pub batches_committed: usize,
    pub batches_failed: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The walk reached the lowest configured epoch.
    Completed(RunSummary),
    /// A shutdown was requested before the walk finished.
    Interrupted(RunSummary),
}

impl RunOutcome {
    pub fn summary(&self) -> &RunSummary {
        match self {
            Self::Completed(summary) | Self::Interrupted(summary) => summary,
        }
    }
}

/// Indexes the configured range until done or until ctrl-c or SIGTERM.
pub async fn run<A: ChainApi + ?Sized>(
    config: &IndexerConfig,
    store: &Store,
    api: &A,
) -> Result<RunOutcome, Error> {
    run_until(config, store, api, shutdown_signal()).await
}

/// Indexes the configured range until done or until `shutdown` resolves.
pub async fn run_until<A: ChainApi + ?Sized>(
    config: &IndexerConfig,
    store: &Store,
    api: &A,
    shutdown: impl Future<Output = ()>,
) -> Result<RunOutcome, Error> {
    config.validate().map_err(Error::Config)?;
    let registry = config.registry().map_err(Error::Config)?;
    let ctx = ExtractContext {
        api,
        registry: &registry,
        network: config.network,
    };

    let (batches_tx, batches_rx) = flume::bounded(config.queue_capacity);
    let mut workers = JoinSet::new();
    for id in 0..config.workers {
        workers.spawn(persist_worker(id, store.clone(), batches_rx.clone()));
    }
    drop(batches_rx);

    let mut progress = WalkProgress::default();
    let walked = tokio::select! {
        result = walker::walk(ctx, config, batches_tx, &mut progress) => Some(result),
        _ = shutdown => None,
    };
    if let Some(Err(e)) = &walked {
        error!("indexing stopped: {e}");
    }

    let mut stats = WorkerStats::default();
    while let Some(result) = workers.join_next().await {
        match result {
            Ok(worker) => stats += worker,
            Err(e) => error!("persistence worker failed: {e}"),
        }
    }
    let summary = RunSummary {
        heights: progress.heights,
        batches_queued: progress.batches_queued,
        batches_committed: stats.committed,
        batches_failed: stats.failed,
    };
    info!(
        "{} heights walked, {} batches committed, {} failed",
        summary.heights, summary.batches_committed, summary.batches_failed
    );

    match walked {
        Some(Ok(())) => Ok(RunOutcome::Completed(summary)),
        Some(Err(e)) => Err(e),
        None => {
            warn!(
                "interrupted, {} queued batches were committed",
                summary.batches_committed
            );
            Ok(RunOutcome::Interrupted(summary))
        }
    }
}

async fn shutdown_signal() {
    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(terminate) => terminate,
        Err(e) => {
            warn!("failed to listen for SIGTERM: {e}");
            keyboard_interrupt().await;
            return;
        }
    };
    tokio::select! {
        _ = keyboard_interrupt() => {}
        _ = terminate.recv() => info!("Received SIGTERM."),
    }
}

async fn keyboard_interrupt() {
    on_ctrl_c(ctrl_c().await).await
}

/// Resolves once ctrl-c was received. A listener that could not be installed
/// is logged and never resolves.
async fn on_ctrl_c(listened: std::io::Result<()>) {
    match listened {
        Ok(()) => info!("Keyboard interrupt."),
        Err(e) => {
            warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    }
}
