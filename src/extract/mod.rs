// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Record extraction for one height of the walk.
//!
//! A height is described by a [`TipsetWindow`]: the tipset being indexed, its
//! parent, and the state trees both were built on. Actor records derive from
//! the difference between the two state trees, block records from the
//! tipset's headers and message records from the tipset's messages and the
//! receipts of its parent's messages.

pub mod blocks;
pub mod market;
pub mod messages;
pub mod miner;
pub mod params;
pub mod power;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Context as _;
use cid::Cid;
use itertools::Itertools as _;
use tracing::debug;

use crate::blocks::{Tipset, TipsetKey};
use crate::chain_api::ChainApi;
use crate::indexer::Error;
use crate::model::{self, Records};
use crate::networks::NetworkChain;
use crate::shim::actors::{ActorRegistry, ActorType};
use crate::shim::state_tree::{ActorState, StateTree};
use crate::shim::{address::Address, clock::ChainEpoch};
use crate::statediff;

/// Shared, read-only inputs of every extractor.
pub struct ExtractContext<'a, A: ?Sized> {
    pub api: &'a A,
    pub registry: &'a ActorRegistry,
    pub network: NetworkChain,
}

impl<A: ?Sized> Clone for ExtractContext<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: ?Sized> Copy for ExtractContext<'_, A> {}

/// The two consecutive tipsets of one walk step and the states they were
/// built on. `prev` is the parent of `cur`.
#[derive(Clone, Debug)]
pub struct TipsetWindow {
    pub cur: Arc<Tipset>,
    pub prev: Arc<Tipset>,
    /// State `cur` was built on: the result of applying `prev`'s messages.
    pub cur_state: StateTree,
    /// State `prev` was built on.
    pub prev_state: StateTree,
}

impl TipsetWindow {
    pub fn epoch(&self) -> ChainEpoch {
        self.cur.epoch()
    }
}

/// Context of one changed actor, handed to its type-specific extractor.
#[derive(Clone, Debug)]
pub struct ActorInfo {
    pub actor: ActorState,
    pub address: Address,
    pub parent_state_root: Cid,
    pub epoch: ChainEpoch,
    pub tipset: TipsetKey,
    pub parent_tipset: TipsetKey,
}

impl ActorInfo {
    pub fn height(&self) -> i64 {
        self.epoch
    }

    pub fn state_root(&self) -> String {
        self.parent_state_root.to_string()
    }
}

/// Records of every actor that changed between the two states of `window`.
pub async fn extract_actors<A: ChainApi + ?Sized>(
    ctx: ExtractContext<'_, A>,
    window: &TipsetWindow,
) -> Result<Records, Error> {
    let epoch = window.epoch();
    let changes = statediff::diff(&window.prev_state, &window.cur_state);

    let mut actors = Vec::with_capacity(changes.len());
    let mut actor_states = Vec::with_capacity(changes.len());
    let mut market_results = market::MarketTaskResult::default();
    let mut power_results = power::PowerTaskResult::default();
    let mut miner_results = miner::MinerTaskResult::default();

    // deterministic order keeps logs and batches reproducible
    for (address, actor) in changes.into_iter().sorted_by_key(|(addr, _)| addr.to_string()) {
        let named = |error| Error::Extraction {
            epoch,
            address,
            error,
        };
        let nonce = i64::try_from(actor.sequence)
            .with_context(|| format!("nonce {} out of range", actor.sequence))
            .map_err(named)?;
        actors.push(model::Actor {
            height: epoch,
            id: address.to_string(),
            state_root: window.cur.parent_state().to_string(),
            code: ctx.registry.actor_name(&actor.code),
            head: actor.state.to_string(),
            balance: actor.balance.atto().to_string(),
            nonce,
        });
        actor_states.push(model::ActorState {
            height: epoch,
            head: actor.state.to_string(),
            code: actor.code.to_string(),
            state: read_actor_state(ctx.api, &actor).await.map_err(named)?,
        });

        // a missing previous actor is a newly created one
        let prev_actor = match epoch {
            0 => None,
            _ => window.prev_state.get_actor(&address),
        };
        let info = ActorInfo {
            actor,
            address,
            parent_state_root: *window.cur.parent_state(),
            epoch,
            tipset: window.cur.key().clone(),
            parent_tipset: window.prev.key().clone(),
        };

        let result = match ctx.registry.actor_type(&info.actor.code) {
            Some(ActorType::Market) => market::extract(ctx.api, &info, prev_actor)
                .await
                .map(|res| market_results.append(res)),
            Some(ActorType::Power) => power::extract(ctx.api, &info, prev_actor)
                .await
                .map(|res| power_results.append(res)),
            Some(ActorType::Miner) => miner::extract(ctx.api, &info, prev_actor)
                .await
                .map(|res| miner_results.append(res)),
            kind => {
                debug!(
                    "skipping actor {address} with unsupported code {} ({kind:?})",
                    info.actor.code
                );
                Ok(())
            }
        };
        result.map_err(named)?;
    }

    let mut records = Records::new();
    records.push(actors);
    records.push(actor_states);
    miner_results.into_records(&mut records);
    power_results.into_records(&mut records);
    market_results.into_records(&mut records);
    Ok(records)
}

/// The object at `actor`'s head, rendered as JSON.
async fn read_actor_state<A: ChainApi + ?Sized>(
    api: &A,
    actor: &ActorState,
) -> anyhow::Result<String> {
    let bytes = api
        .chain_read_obj(&actor.state)
        .await
        .with_context(|| format!("reading actor head {}", actor.state))?;
    params::cbor_to_json(&bytes)
        .with_context(|| format!("decoding actor head {}", actor.state))
}

/// Everything recorded for one height, in persistence order.
pub async fn extract_height<A: ChainApi + ?Sized>(
    ctx: ExtractContext<'_, A>,
    window: &TipsetWindow,
) -> Result<Records, Error> {
    let epoch = window.epoch();
    let mut records = blocks::extract_blocks(&window.cur)
        .map_err(|error| Error::Blocks { epoch, error })?;
    records.append(&mut extract_actors(ctx, window).await?);
    records.append(
        &mut messages::extract_messages(ctx, window)
            .await
            .map_err(|error| Error::Messages { epoch, error })?,
    );
    Ok(records)
}
