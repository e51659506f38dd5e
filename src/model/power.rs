// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

/// Network-wide power totals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainPower {
    pub height: i64,
    pub state_root: String,
    pub total_raw_bytes_power: String,
    pub total_raw_bytes_committed: String,
    pub total_qa_bytes_power: String,
    pub total_qa_bytes_committed: String,
    pub total_pledge_collateral: String,
    pub qa_smoothed_position_estimate: String,
    pub qa_smoothed_velocity_estimate: String,
    pub miner_count: i64,
    pub participating_miner_count: i64,
}

impl_record!(
    ChainPower,
    "chain_powers",
    [
        height,
        state_root,
        total_raw_bytes_power,
        total_raw_bytes_committed,
        total_qa_bytes_power,
        total_qa_bytes_committed,
        total_pledge_collateral,
        qa_smoothed_position_estimate,
        qa_smoothed_velocity_estimate,
        miner_count,
        participating_miner_count,
    ]
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerActorClaim {
    pub height: i64,
    pub miner_id: String,
    pub state_root: String,
    pub raw_byte_power: String,
    pub quality_adj_power: String,
}

impl_record!(
    PowerActorClaim,
    "power_actor_claims",
    [
        height,
        miner_id,
        state_root,
        raw_byte_power,
        quality_adj_power
    ]
);
