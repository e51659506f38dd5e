// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::BTreeSet;

use cid::Cid;

use super::adt::Map;
use super::market::DealID;
use crate::shim::{address::Address, bigint::BigInt, clock::ChainEpoch, econ::TokenAmount};

pub type SectorNumber = u64;

/// Epochs each window post deadline stays open.
pub const WPOST_CHALLENGE_WINDOW: ChainEpoch = 60;
/// Deadlines per proving period.
pub const WPOST_PERIOD_DEADLINES: u64 = 48;
pub const WPOST_PROVING_PERIOD: ChainEpoch = 2880;
/// Epochs before a deadline opens at which its challenge is drawn.
pub const WPOST_CHALLENGE_LOOKBACK: ChainEpoch = 20;
/// Faults must be declared this many epochs before a deadline opens.
pub const FAULT_DECLARATION_CUTOFF: ChainEpoch = WPOST_CHALLENGE_LOOKBACK + 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinerInfo {
    pub owner: Address,
    pub worker: Address,
    pub new_worker: Option<Address>,
    pub worker_change_epoch: ChainEpoch,
    pub control_addresses: Vec<Address>,
    pub peer_id: Option<Vec<u8>>,
    pub multi_addresses: Vec<Vec<u8>>,
    pub sector_size: u64,
    pub consensus_fault_elapsed: ChainEpoch,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectorPreCommitOnChainInfo {
    pub seal_proof: i64,
    pub sealed_cid: Cid,
    pub seal_rand_epoch: ChainEpoch,
    pub deal_ids: Vec<DealID>,
    pub expiration: ChainEpoch,
    pub pre_commit_deposit: TokenAmount,
    pub pre_commit_epoch: ChainEpoch,
    pub deal_weight: BigInt,
    pub verified_deal_weight: BigInt,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectorOnChainInfo {
    pub seal_proof: i64,
    pub sealed_cid: Cid,
    pub deal_ids: Vec<DealID>,
    pub activation: ChainEpoch,
    pub expiration: ChainEpoch,
    pub deal_weight: BigInt,
    pub verified_deal_weight: BigInt,
    pub initial_pledge: TokenAmount,
    pub expected_day_reward: TokenAmount,
    pub expected_storage_pledge: TokenAmount,
}

/// Deadline timing derived from the proving period start and deadline index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeadlineInfo {
    pub current_epoch: ChainEpoch,
    pub period_start: ChainEpoch,
    pub index: u64,
    pub open: ChainEpoch,
    pub close: ChainEpoch,
    pub challenge: ChainEpoch,
    pub fault_cutoff: ChainEpoch,
}

impl DeadlineInfo {
    pub fn new(period_start: ChainEpoch, index: u64, current_epoch: ChainEpoch) -> Self {
        if index < WPOST_PERIOD_DEADLINES {
            let open = period_start + index as ChainEpoch * WPOST_CHALLENGE_WINDOW;
            Self {
                current_epoch,
                period_start,
                index,
                open,
                close: open + WPOST_CHALLENGE_WINDOW,
                challenge: open - WPOST_CHALLENGE_LOOKBACK,
                fault_cutoff: open - FAULT_DECLARATION_CUTOFF,
            }
        } else {
            // past the last deadline: a zero-length deadline at the period end
            let after_last_deadline = period_start + WPOST_PROVING_PERIOD;
            Self {
                current_epoch,
                period_start,
                index,
                open: after_last_deadline,
                close: after_last_deadline,
                challenge: after_last_deadline,
                fault_cutoff: 0,
            }
        }
    }
}

/// Miner actor state, with partition bitfields flattened to sector sets.
#[derive(Clone, Debug)]
pub struct State {
    /// Root of the (separately stored) miner info.
    pub info_root: Cid,
    pub info: MinerInfo,
    pub pre_commit_deposits: TokenAmount,
    pub locked_funds: TokenAmount,
    pub initial_pledge: TokenAmount,
    pub fee_debt: TokenAmount,
    pub proving_period_start: ChainEpoch,
    pub current_deadline: u64,
    pub pre_committed_sectors: Map<SectorNumber, SectorPreCommitOnChainInfo>,
    pub sectors: Map<SectorNumber, SectorOnChainInfo>,
    pub faulty_sectors: BTreeSet<SectorNumber>,
    pub recovering_sectors: BTreeSet<SectorNumber>,
    pub terminated_sectors: BTreeSet<SectorNumber>,
}

impl State {
    pub fn deadline_info(&self, current_epoch: ChainEpoch) -> DeadlineInfo {
        DeadlineInfo::new(
            self.proving_period_start,
            self.current_deadline,
            current_epoch,
        )
    }

    pub fn info_changed(&self, other: &State) -> bool {
        self.info_root != other.info_root
    }

    pub fn locked_funds_changed(&self, other: &State) -> bool {
        self.locked_funds != other.locked_funds
            || self.initial_pledge != other.initial_pledge
            || self.pre_commit_deposits != other.pre_commit_deposits
    }

    pub fn fee_debt_changed(&self, other: &State) -> bool {
        self.fee_debt != other.fee_debt
    }
}
