// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use super::adt::Map;
use crate::shim::{address::Address, bigint::BigInt, econ::TokenAmount};

/// Power actor address.
pub const ADDRESS: Address = Address::new_id(4);

pub type StoragePower = BigInt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    pub raw_byte_power: StoragePower,
    pub quality_adj_power: StoragePower,
}

/// Alpha-beta filter estimate of a smoothed quantity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterEstimate {
    pub position: BigInt,
    pub velocity: BigInt,
}

pub type Claims = Map<Address, Claim>;

/// Power actor state.
#[derive(Clone, Debug)]
pub struct State {
    pub total_raw_byte_power: StoragePower,
    pub total_bytes_committed: StoragePower,
    pub total_quality_adj_power: StoragePower,
    pub total_qa_bytes_committed: StoragePower,
    pub total_pledge_collateral: TokenAmount,
    pub this_epoch_qa_power_smoothed: FilterEstimate,
    pub miner_count: i64,
    pub miner_above_min_power_count: i64,
    pub claims: Claims,
}
