// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

use crate::shim::{address::Address, clock::ChainEpoch};

/// Errors that abort a run.
///
/// Persistence failures are not among them: a batch that fails to commit is
/// logged and counted in the run summary.
#[derive(Debug, Error)]
pub enum Error {
    /// A tipset or state tree the walk depends on could not be loaded.
    #[error("failed to load chain state: {0:#}")]
    StateLoad(anyhow::Error),
    #[error("failed to extract actor {address} at epoch {epoch}: {error:#}")]
    Extraction {
        epoch: ChainEpoch,
        address: Address,
        error: anyhow::Error,
    },
    #[error("failed to extract messages at epoch {epoch}: {error:#}")]
    Messages {
        epoch: ChainEpoch,
        error: anyhow::Error,
    },
    #[error("failed to extract blocks at epoch {epoch}: {error:#}")]
    Blocks {
        epoch: ChainEpoch,
        error: anyhow::Error,
    },
    #[error("invalid configuration: {0:#}")]
    Config(anyhow::Error),
    /// Every persistence worker is gone.
    #[error("persistence queue closed")]
    QueueClosed,
}

impl Error {
    /// Epoch the error was raised at, if it is tied to one.
    pub fn epoch(&self) -> Option<ChainEpoch> {
        match self {
            Self::Extraction { epoch, .. }
            | Self::Messages { epoch, .. }
            | Self::Blocks { epoch, .. } => Some(*epoch),
            Self::StateLoad(_) | Self::Config(_) | Self::QueueClosed => None,
        }
    }
}
