// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::db::{Store, sqlite::DEFAULT_BUSY_TIMEOUT};
use crate::networks::NetworkChain;
use crate::shim::actors::ActorRegistry;
use crate::shim::clock::ChainEpoch;

/// Settings of one indexing run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Lowest epoch to index. Values below 1 index down to epoch 1.
    pub from: ChainEpoch,
    /// Highest epoch to index, inclusive. Values of 0 or at or above the head
    /// start below the head.
    pub to: ChainEpoch,
    /// Persistence tasks committing batches concurrently.
    pub workers: usize,
    /// Heights accumulated into one batch.
    pub flush_every: usize,
    /// Batches that may wait for a worker before the walk blocks.
    pub queue_capacity: usize,
    /// Seconds a worker waits for the database write lock.
    pub busy_timeout_secs: u64,
    pub network: NetworkChain,
    /// Actor bundle code CIDs, mapped to `fil/<version>/<name>`.
    pub actor_codes: BTreeMap<String, String>,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            from: 0,
            to: 0,
            workers: 15,
            flush_every: 20,
            queue_capacity: 10,
            busy_timeout_secs: DEFAULT_BUSY_TIMEOUT.as_secs(),
            network: NetworkChain::default(),
            actor_codes: BTreeMap::new(),
        }
    }
}

impl IndexerConfig {
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let toml = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&toml)
    }

    pub fn from_toml(toml: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(toml)?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.workers > 0, "workers must be positive");
        anyhow::ensure!(self.flush_every > 0, "flush_every must be positive");
        anyhow::ensure!(self.queue_capacity > 0, "queue_capacity must be positive");
        anyhow::ensure!(
            self.busy_timeout_secs > 0,
            "busy_timeout_secs must be positive"
        );
        if self.to > 0 {
            anyhow::ensure!(
                self.to >= self.from,
                "to ({}) is below from ({})",
                self.to,
                self.from
            );
        }
        self.registry()?;
        Ok(())
    }

    /// Opens the database at `path` with the configured lock timeout.
    pub async fn open_store(&self, path: &Path) -> anyhow::Result<Store> {
        Store::open_file_with_timeout(path, Duration::from_secs(self.busy_timeout_secs)).await
    }

    /// Lowest epoch the walk visits.
    pub fn lowest_epoch(&self) -> ChainEpoch {
        self.from.max(1)
    }

    pub fn registry(&self) -> anyhow::Result<ActorRegistry> {
        ActorRegistry::with_manifest(
            self.actor_codes
                .iter()
                .map(|(code, name)| (code.as_str(), name.as_str())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shim::actors::ActorType;
    use crate::test_utils::dummy_cid;

    #[test]
    fn defaults() {
        let config = IndexerConfig::from_toml("").unwrap();
        assert_eq!(config, IndexerConfig::default());
        assert_eq!(config.workers, 15);
        assert_eq!(config.flush_every, 20);
        assert_eq!(config.queue_capacity, 10);
        assert_eq!(config.busy_timeout_secs, 600);
        assert_eq!(config.lowest_epoch(), 1);
        config.validate().unwrap();
    }

    #[test]
    fn toml_file() {
        let code = dummy_cid(7);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indexer.toml");
        std::fs::write(
            &path,
            format!(
                r#"
from = 100
to = 200
workers = 2
network = "calibnet"

[actor_codes]
"{code}" = "fil/9/storageminer"
"#
            ),
        )
        .unwrap();

        let config = IndexerConfig::from_toml_file(&path).unwrap();
        config.validate().unwrap();
        assert_eq!(config.from, 100);
        assert_eq!(config.to, 200);
        assert_eq!(config.workers, 2);
        assert_eq!(config.flush_every, 20);
        assert_eq!(config.network, NetworkChain::Calibnet);
        assert_eq!(
            config.registry().unwrap().actor_type(&code),
            Some(ActorType::Miner)
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        for config in [
            IndexerConfig {
                workers: 0,
                ..Default::default()
            },
            IndexerConfig {
                flush_every: 0,
                ..Default::default()
            },
            IndexerConfig {
                queue_capacity: 0,
                ..Default::default()
            },
            IndexerConfig {
                busy_timeout_secs: 0,
                ..Default::default()
            },
            IndexerConfig {
                from: 10,
                to: 5,
                ..Default::default()
            },
            IndexerConfig {
                actor_codes: [("not-a-cid".to_string(), "fil/9/account".to_string())].into(),
                ..Default::default()
            },
        ] {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }
}
