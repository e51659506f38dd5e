// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinerInfo {
    pub height: i64,
    pub miner_id: String,
    pub state_root: String,
    pub owner_id: String,
    pub worker_id: String,
    pub new_worker: Option<String>,
    pub worker_change_epoch: i64,
    pub consensus_faulted_elapsed: i64,
    /// Hex encoded libp2p peer id.
    pub peer_id: Option<String>,
    /// JSON array of addresses.
    pub control_addresses: Option<String>,
    /// JSON array of hex encoded multiaddrs.
    pub multi_addresses: Option<String>,
    pub sector_size: i64,
}

impl_record!(
    MinerInfo,
    "miner_infos",
    [
        height,
        miner_id,
        state_root,
        owner_id,
        worker_id,
        new_worker,
        worker_change_epoch,
        consensus_faulted_elapsed,
        peer_id,
        control_addresses,
        multi_addresses,
        sector_size,
    ]
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinerLockedFund {
    pub height: i64,
    pub miner_id: String,
    pub state_root: String,
    pub locked_funds: String,
    pub initial_pledge: String,
    pub pre_commit_deposits: String,
}

impl_record!(
    MinerLockedFund,
    "miner_locked_funds",
    [
        height,
        miner_id,
        state_root,
        locked_funds,
        initial_pledge,
        pre_commit_deposits,
    ]
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinerFeeDebt {
    pub height: i64,
    pub miner_id: String,
    pub state_root: String,
    pub fee_debt: String,
}

impl_record!(
    MinerFeeDebt,
    "miner_fee_debts",
    [height, miner_id, state_root, fee_debt]
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinerCurrentDeadlineInfo {
    pub height: i64,
    pub miner_id: String,
    pub state_root: String,
    pub deadline_index: i64,
    pub period_start: i64,
    pub open: i64,
    pub close: i64,
    pub challenge: i64,
    pub fault_cutoff: i64,
}

impl_record!(
    MinerCurrentDeadlineInfo,
    "miner_current_deadline_infos",
    [
        height,
        miner_id,
        state_root,
        deadline_index,
        period_start,
        open,
        close,
        challenge,
        fault_cutoff,
    ]
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinerPreCommitInfo {
    pub height: i64,
    pub miner_id: String,
    pub sector_id: i64,
    pub state_root: String,
    pub sealed_cid: String,
    pub seal_rand_epoch: i64,
    pub expiration_epoch: i64,
    pub pre_commit_deposit: String,
    pub pre_commit_epoch: i64,
    pub deal_weight: String,
    pub verified_deal_weight: String,
}

impl_record!(
    MinerPreCommitInfo,
    "miner_pre_commit_infos",
    [
        height,
        miner_id,
        sector_id,
        state_root,
        sealed_cid,
        seal_rand_epoch,
        expiration_epoch,
        pre_commit_deposit,
        pre_commit_epoch,
        deal_weight,
        verified_deal_weight,
    ]
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinerSectorInfo {
    pub height: i64,
    pub miner_id: String,
    pub sector_id: i64,
    pub state_root: String,
    pub sealed_cid: String,
    pub activation_epoch: i64,
    pub expiration_epoch: i64,
    pub deal_weight: String,
    pub verified_deal_weight: String,
    pub initial_pledge: String,
    pub expected_day_reward: String,
    pub expected_storage_pledge: String,
}

impl_record!(
    MinerSectorInfo,
    "miner_sector_infos",
    [
        height,
        miner_id,
        sector_id,
        state_root,
        sealed_cid,
        activation_epoch,
        expiration_epoch,
        deal_weight,
        verified_deal_weight,
        initial_pledge,
        expected_day_reward,
        expected_storage_pledge,
    ]
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinerSectorDeal {
    pub height: i64,
    pub miner_id: String,
    pub sector_id: i64,
    pub deal_id: i64,
}

impl_record!(
    MinerSectorDeal,
    "miner_sector_deals",
    [height, miner_id, sector_id, deal_id]
);

/// Sector lifecycle transitions observed between two miner states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, sqlx::Type)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MinerSectorEventType {
    PrecommitAdded,
    PrecommitExpired,
    CommitCapacityAdded,
    SectorAdded,
    SectorExtended,
    SectorFaulted,
    SectorRecovering,
    SectorRecovered,
    SectorTerminated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinerSectorEvent {
    pub height: i64,
    pub miner_id: String,
    pub sector_id: i64,
    pub state_root: String,
    pub event: MinerSectorEventType,
}

impl_record!(
    MinerSectorEvent,
    "miner_sector_events",
    [height, miner_id, sector_id, state_root, event]
);
