// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::Context as _;
use itertools::Itertools as _;

use super::ActorInfo;
use crate::model::{self, Records};
use crate::shim::actors::{
    ActorStateLoader,
    power::{Claim, State},
};
use crate::shim::{address::Address, state_tree::ActorState};

/// Network power totals and miner claims recorded for a power actor change.
#[derive(Debug, Default)]
pub struct PowerTaskResult {
    pub chain_powers: Vec<model::ChainPower>,
    pub claims: Vec<model::PowerActorClaim>,
}

impl PowerTaskResult {
    pub fn append(&mut self, mut other: Self) {
        self.chain_powers.append(&mut other.chain_powers);
        self.claims.append(&mut other.claims);
    }

    pub fn into_records(self, records: &mut Records) {
        records.push(self.chain_powers);
        records.push(self.claims);
    }
}

pub async fn extract(
    api: &(impl ActorStateLoader + ?Sized),
    info: &ActorInfo,
    prev_actor: Option<&ActorState>,
) -> anyhow::Result<PowerTaskResult> {
    let cur = api
        .load_power_state(&info.actor)
        .await
        .context("loading current power actor state")?;
    let prev = match prev_actor {
        Some(actor) => Some(
            api.load_power_state(actor)
                .await
                .context("loading previous power actor state")?,
        ),
        None => None,
    };

    let claims = changed_claims(prev.as_ref(), &cur)
        .map(|(miner, claim)| model::PowerActorClaim {
            height: info.height(),
            miner_id: miner.to_string(),
            state_root: info.state_root(),
            raw_byte_power: claim.raw_byte_power.to_string(),
            quality_adj_power: claim.quality_adj_power.to_string(),
        })
        .collect();

    Ok(PowerTaskResult {
        chain_powers: vec![chain_power(info, &cur)],
        claims,
    })
}

fn chain_power(info: &ActorInfo, state: &State) -> model::ChainPower {
    model::ChainPower {
        height: info.height(),
        state_root: info.state_root(),
        total_raw_bytes_power: state.total_raw_byte_power.to_string(),
        total_raw_bytes_committed: state.total_bytes_committed.to_string(),
        total_qa_bytes_power: state.total_quality_adj_power.to_string(),
        total_qa_bytes_committed: state.total_qa_bytes_committed.to_string(),
        total_pledge_collateral: state.total_pledge_collateral.atto().to_string(),
        qa_smoothed_position_estimate: state.this_epoch_qa_power_smoothed.position.to_string(),
        qa_smoothed_velocity_estimate: state.this_epoch_qa_power_smoothed.velocity.to_string(),
        miner_count: state.miner_count,
        participating_miner_count: state.miner_above_min_power_count,
    }
}

/// Every claim of a new actor, or the claims added or modified since `prev`,
/// ordered by miner address.
fn changed_claims<'a>(
    prev: Option<&'a State>,
    cur: &'a State,
) -> impl Iterator<Item = (&'a Address, &'a Claim)> {
    let changed: Vec<_> = match prev {
        None => cur.claims.iter().collect(),
        Some(prev) => {
            let changes = prev.claims.diff(&cur.claims);
            changes
                .added
                .into_iter()
                .chain(changes.modified.into_iter().map(|m| (m.key, m.to)))
                .collect()
        }
    };
    changed
        .into_iter()
        .sorted_by_key(|(miner, _)| miner.to_string())
}
