// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;

use super::adt::Map;
use crate::shim::{address::Address, clock::ChainEpoch, econ::TokenAmount};

/// Market actor address.
pub const ADDRESS: Address = Address::new_id(5);

pub type DealID = u64;

#[derive(Clone, Debug, PartialEq)]
pub struct DealProposal {
    pub piece_cid: Cid,
    /// Padded piece size in bytes.
    pub piece_size: u64,
    pub verified_deal: bool,
    pub client: Address,
    pub provider: Address,
    pub label: String,
    pub start_epoch: ChainEpoch,
    pub end_epoch: ChainEpoch,
    pub storage_price_per_epoch: TokenAmount,
    pub provider_collateral: TokenAmount,
    pub client_collateral: TokenAmount,
}

impl DealProposal {
    /// Padding adds one bit for every 127 bits of data.
    pub fn unpadded_piece_size(&self) -> u64 {
        self.piece_size - self.piece_size / 128
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DealState {
    pub sector_start_epoch: ChainEpoch,
    pub last_updated_epoch: ChainEpoch,
    pub slash_epoch: ChainEpoch,
}

pub type DealProposals = Map<DealID, DealProposal>;
pub type DealStates = Map<DealID, DealState>;

/// Market actor state.
#[derive(Clone, Debug)]
pub struct State {
    pub proposals: DealProposals,
    pub states: DealStates,
}

impl State {
    pub fn proposals_changed(&self, other: &State) -> bool {
        self.proposals.changed(&other.proposals)
    }

    pub fn states_changed(&self, other: &State) -> bool {
        self.states.changed(&other.states)
    }
}
