// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::Context as _;

use super::ActorInfo;
use crate::model::{self, Records};
use crate::shim::actors::{
    ActorStateLoader,
    market::{DealID, DealProposal, DealState, State},
};
use crate::shim::state_tree::ActorState;

/// Deal proposals and deal states recorded for a market actor change.
#[derive(Debug, Default)]
pub struct MarketTaskResult {
    pub proposals: Vec<model::MarketDealProposal>,
    pub states: Vec<model::MarketDealState>,
}

impl MarketTaskResult {
    pub fn append(&mut self, mut other: Self) {
        self.proposals.append(&mut other.proposals);
        self.states.append(&mut other.states);
    }

    pub fn into_records(self, records: &mut Records) {
        records.push(self.proposals);
        records.push(self.states);
    }
}

pub async fn extract(
    api: &(impl ActorStateLoader + ?Sized),
    info: &ActorInfo,
    prev_actor: Option<&ActorState>,
) -> anyhow::Result<MarketTaskResult> {
    let cur = api
        .load_market_state(&info.actor)
        .await
        .context("loading current market actor state")?;
    let prev = match prev_actor {
        Some(actor) => Some(
            api.load_market_state(actor)
                .await
                .context("loading previous market actor state")?,
        ),
        None => None,
    };

    let proposals = changed_proposals(prev.as_ref(), &cur)
        .into_iter()
        .map(|(id, proposal)| proposal_model(info, id, proposal))
        .collect::<anyhow::Result<_>>()?;
    let states = changed_states(prev.as_ref(), &cur)
        .into_iter()
        .map(|(id, state)| state_model(info, id, state))
        .collect::<anyhow::Result<_>>()?;
    Ok(MarketTaskResult { proposals, states })
}

/// Every proposal of a new actor, or the proposals added or modified since
/// `prev`. Proposals are ordered by deal id.
fn changed_proposals<'a>(
    prev: Option<&'a State>,
    cur: &'a State,
) -> Vec<(DealID, &'a DealProposal)> {
    let mut changed: Vec<_> = match prev {
        None => cur.proposals.iter().map(|(id, p)| (*id, p)).collect(),
        Some(prev) if !prev.proposals_changed(cur) => vec![],
        Some(prev) => {
            let changes = prev.proposals.diff(&cur.proposals);
            changes
                .added
                .into_iter()
                .map(|(id, p)| (*id, p))
                .chain(changes.modified.into_iter().map(|m| (*m.key, m.to)))
                .collect()
        }
    };
    changed.sort_by_key(|(id, _)| *id);
    changed
}

fn changed_states<'a>(prev: Option<&'a State>, cur: &'a State) -> Vec<(DealID, &'a DealState)> {
    let mut changed: Vec<_> = match prev {
        None => cur.states.iter().map(|(id, s)| (*id, s)).collect(),
        Some(prev) if !prev.states_changed(cur) => vec![],
        Some(prev) => {
            let changes = prev.states.diff(&cur.states);
            changes
                .added
                .into_iter()
                .map(|(id, s)| (*id, s))
                .chain(changes.modified.into_iter().map(|m| (*m.key, m.to)))
                .collect()
        }
    };
    changed.sort_by_key(|(id, _)| *id);
    changed
}

fn proposal_model(
    info: &ActorInfo,
    deal_id: DealID,
    proposal: &DealProposal,
) -> anyhow::Result<model::MarketDealProposal> {
    Ok(model::MarketDealProposal {
        height: info.height(),
        deal_id: i64::try_from(deal_id).context("deal id out of range")?,
        state_root: info.state_root(),
        piece_cid: proposal.piece_cid.to_string(),
        padded_piece_size: i64::try_from(proposal.piece_size)
            .context("piece size out of range")?,
        unpadded_piece_size: i64::try_from(proposal.unpadded_piece_size())
            .context("piece size out of range")?,
        is_verified: proposal.verified_deal,
        client_id: proposal.client.to_string(),
        provider_id: proposal.provider.to_string(),
        start_epoch: proposal.start_epoch,
        end_epoch: proposal.end_epoch,
        storage_price_per_epoch: proposal.storage_price_per_epoch.atto().to_string(),
        provider_collateral: proposal.provider_collateral.atto().to_string(),
        client_collateral: proposal.client_collateral.atto().to_string(),
        label: proposal.label.clone(),
    })
}

fn state_model(
    info: &ActorInfo,
    deal_id: DealID,
    state: &DealState,
) -> anyhow::Result<model::MarketDealState> {
    Ok(model::MarketDealState {
        height: info.height(),
        deal_id: i64::try_from(deal_id).context("deal id out of range")?,
        state_root: info.state_root(),
        sector_start_epoch: state.sector_start_epoch,
        last_update_epoch: state.last_updated_epoch,
        slash_epoch: state.slash_epoch,
    })
}
