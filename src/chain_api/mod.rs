// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! The node API the indexer reads the chain through.

mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use cid::Cid;

pub use memory::MemoryChain;

use crate::blocks::{Tipset, TipsetKey};
use crate::chain::gas::{self, GasOutputs};
use crate::message::{BlockMessages, ParentMessage};
use crate::shim::actors::ActorStateLoader;
use crate::shim::{clock::ChainEpoch, econ::TokenAmount, executor::Receipt};
use crate::shim::state_tree::StateTree;

/// Read access to a Filecoin node.
///
/// Every call may fail; callers attach the epoch or block they were working
/// on.
#[async_trait]
pub trait ChainApi: ActorStateLoader {
    async fn chain_head(&self) -> anyhow::Result<Arc<Tipset>>;

    async fn chain_get_tipset(&self, key: &TipsetKey) -> anyhow::Result<Arc<Tipset>>;

    /// Tipset at `epoch` on the chain ending at `head`. When `epoch` is a null
    /// round the closest tipset below it is returned.
    async fn chain_get_tipset_by_height(
        &self,
        epoch: ChainEpoch,
        head: &TipsetKey,
    ) -> anyhow::Result<Arc<Tipset>>;

    /// Messages included in `block`.
    async fn chain_get_block_messages(&self, block: &Cid) -> anyhow::Result<BlockMessages>;

    /// Receipts of the messages applied on top of `block`'s parent state, in
    /// application order.
    async fn chain_get_parent_receipts(&self, block: &Cid) -> anyhow::Result<Vec<Receipt>>;

    /// Messages applied on top of `block`'s parent state, in the order their
    /// receipts are listed.
    async fn chain_get_parent_messages(&self, block: &Cid)
    -> anyhow::Result<Vec<ParentMessage>>;

    async fn load_state_tree(&self, root: &Cid) -> anyhow::Result<StateTree>;

    /// Raw `dag-cbor` bytes of the IPLD object `cid`.
    async fn chain_read_obj(&self, cid: &Cid) -> anyhow::Result<Vec<u8>>;

    /// Fee split of a message that used `gas_used` gas. Nodes that track gas
    /// accounting themselves may override this.
    fn compute_gas_outputs(
        &self,
        gas_used: u64,
        gas_limit: u64,
        base_fee: &TokenAmount,
        fee_cap: &TokenAmount,
        gas_premium: &TokenAmount,
    ) -> GasOutputs {
        gas::compute_gas_outputs(gas_used, gas_limit, base_fee, fee_cap, gas_premium)
    }
}
