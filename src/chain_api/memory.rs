// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;

use ahash::HashMap;
use anyhow::Context as _;
use async_trait::async_trait;
use cid::Cid;
use parking_lot::RwLock;

use super::ChainApi;
use crate::blocks::{Tipset, TipsetKey};
use crate::message::{BlockMessages, ParentMessage};
use crate::shim::actors::{ActorStateLoader, market, miner, power};
use crate::shim::state_tree::{ActorState, StateTree};
use crate::shim::{clock::ChainEpoch, executor::Receipt};

/// A chain held entirely in memory.
///
/// Blocks without registered messages or receipts are treated as empty.
/// Actor states are keyed by the actor's head CID.
#[derive(Debug, Default)]
pub struct MemoryChain {
    head: RwLock<Option<Arc<Tipset>>>,
    tipsets: RwLock<HashMap<TipsetKey, Arc<Tipset>>>,
    block_messages: RwLock<HashMap<Cid, BlockMessages>>,
    parent_receipts: RwLock<HashMap<Cid, Vec<Receipt>>>,
    parent_messages: RwLock<HashMap<Cid, Vec<ParentMessage>>>,
    state_trees: RwLock<HashMap<Cid, StateTree>>,
    objects: RwLock<HashMap<Cid, Vec<u8>>>,
    market_states: RwLock<HashMap<Cid, market::State>>,
    power_states: RwLock<HashMap<Cid, power::State>>,
    miner_states: RwLock<HashMap<Cid, miner::State>>,
}

impl MemoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tipset; the highest tipset inserted so far becomes the head.
    pub fn insert_tipset(&self, tipset: Tipset) -> Arc<Tipset> {
        let tipset = Arc::new(tipset);
        self.tipsets
            .write()
            .insert(tipset.key().clone(), tipset.clone());
        let mut head = self.head.write();
        if head.as_ref().is_none_or(|h| h.epoch() < tipset.epoch()) {
            *head = Some(tipset.clone());
        }
        tipset
    }

    pub fn set_head(&self, key: &TipsetKey) -> anyhow::Result<()> {
        let tipset = self
            .tipsets
            .read()
            .get(key)
            .cloned()
            .with_context(|| format!("unknown tipset {key}"))?;
        *self.head.write() = Some(tipset);
        Ok(())
    }

    pub fn insert_block_messages(&self, block: Cid, messages: BlockMessages) {
        self.block_messages.write().insert(block, messages);
    }

    pub fn insert_parent_messages(
        &self,
        block: Cid,
        messages: Vec<ParentMessage>,
        receipts: Vec<Receipt>,
    ) {
        self.parent_messages.write().insert(block, messages);
        self.parent_receipts.write().insert(block, receipts);
    }

    pub fn insert_state_tree(&self, tree: StateTree) {
        self.state_trees.write().insert(*tree.root(), tree);
    }

    pub fn insert_object(&self, cid: Cid, bytes: Vec<u8>) {
        self.objects.write().insert(cid, bytes);
    }

    pub fn insert_market_state(&self, head: Cid, state: market::State) {
        self.market_states.write().insert(head, state);
    }

    pub fn insert_power_state(&self, head: Cid, state: power::State) {
        self.power_states.write().insert(head, state);
    }

    pub fn insert_miner_state(&self, head: Cid, state: miner::State) {
        self.miner_states.write().insert(head, state);
    }
}

fn load<T: Clone>(states: &RwLock<HashMap<Cid, T>>, actor: &ActorState) -> anyhow::Result<T> {
    states
        .read()
        .get(&actor.state)
        .cloned()
        .with_context(|| format!("actor state {} not found", actor.state))
}

#[async_trait]
impl ActorStateLoader for MemoryChain {
    async fn load_market_state(&self, actor: &ActorState) -> anyhow::Result<market::State> {
        load(&self.market_states, actor)
    }

    async fn load_power_state(&self, actor: &ActorState) -> anyhow::Result<power::State> {
        load(&self.power_states, actor)
    }

    async fn load_miner_state(&self, actor: &ActorState) -> anyhow::Result<miner::State> {
        load(&self.miner_states, actor)
    }
}

#[async_trait]
impl ChainApi for MemoryChain {
    async fn chain_head(&self) -> anyhow::Result<Arc<Tipset>> {
        self.head.read().clone().context("chain has no head")
    }

    async fn chain_get_tipset(&self, key: &TipsetKey) -> anyhow::Result<Arc<Tipset>> {
        self.tipsets
            .read()
            .get(key)
            .cloned()
            .with_context(|| format!("tipset {key} not found"))
    }

    async fn chain_get_tipset_by_height(
        &self,
        epoch: ChainEpoch,
        head: &TipsetKey,
    ) -> anyhow::Result<Arc<Tipset>> {
        let mut tipset = self.chain_get_tipset(head).await?;
        anyhow::ensure!(
            epoch <= tipset.epoch(),
            "looking for tipset with height greater than start point, req: {epoch}, head: {}",
            tipset.epoch()
        );
        while tipset.epoch() > epoch {
            tipset = self.chain_get_tipset(tipset.parents()).await?;
        }
        Ok(tipset)
    }

    async fn chain_get_block_messages(&self, block: &Cid) -> anyhow::Result<BlockMessages> {
        Ok(self
            .block_messages
            .read()
            .get(block)
            .cloned()
            .unwrap_or_default())
    }

    async fn chain_get_parent_receipts(&self, block: &Cid) -> anyhow::Result<Vec<Receipt>> {
        Ok(self
            .parent_receipts
            .read()
            .get(block)
            .cloned()
            .unwrap_or_default())
    }

    async fn chain_get_parent_messages(
        &self,
        block: &Cid,
    ) -> anyhow::Result<Vec<ParentMessage>> {
        Ok(self
            .parent_messages
            .read()
            .get(block)
            .cloned()
            .unwrap_or_default())
    }

    async fn load_state_tree(&self, root: &Cid) -> anyhow::Result<StateTree> {
        self.state_trees
            .read()
            .get(root)
            .cloned()
            .with_context(|| format!("state root {root} not found"))
    }

    async fn chain_read_obj(&self, cid: &Cid) -> anyhow::Result<Vec<u8>> {
        self.objects
            .read()
            .get(cid)
            .cloned()
            .with_context(|| format!("object {cid} not found"))
    }
}
