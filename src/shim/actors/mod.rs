// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Typed views of the builtin actor states the extractors look into.
//!
//! Decoding actor state from the blockstore is the node's job; the indexer
//! receives already-decoded states through [`ActorStateLoader`].

pub mod adt;
pub mod market;
pub mod methods;
pub mod miner;
pub mod power;
pub mod registry;

use async_trait::async_trait;

pub use registry::{ActorRegistry, ActorType, BuiltinActor, builtin_code};

use crate::shim::state_tree::ActorState;

/// Loads the typed state an actor's head points at.
#[async_trait]
pub trait ActorStateLoader: Send + Sync {
    async fn load_market_state(&self, actor: &ActorState) -> anyhow::Result<market::State>;
    async fn load_power_state(&self, actor: &ActorState) -> anyhow::Result<power::State>;
    async fn load_miner_state(&self, actor: &ActorState) -> anyhow::Result<miner::State>;
}
