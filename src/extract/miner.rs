// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::BTreeSet;

use anyhow::Context as _;

use super::ActorInfo;
use crate::model::{self, MinerSectorEventType, Records};
use crate::shim::actors::{
    ActorStateLoader,
    miner::{SectorNumber, SectorOnChainInfo, SectorPreCommitOnChainInfo, State},
};
use crate::shim::state_tree::ActorState;

/// Rows of every miner facet recorded for a miner actor change.
#[derive(Debug, Default)]
pub struct MinerTaskResult {
    pub infos: Vec<model::MinerInfo>,
    pub locked_funds: Vec<model::MinerLockedFund>,
    pub fee_debts: Vec<model::MinerFeeDebt>,
    pub deadline_infos: Vec<model::MinerCurrentDeadlineInfo>,
    pub pre_commits: Vec<model::MinerPreCommitInfo>,
    pub sectors: Vec<model::MinerSectorInfo>,
    pub sector_deals: Vec<model::MinerSectorDeal>,
    pub sector_events: Vec<model::MinerSectorEvent>,
}

impl MinerTaskResult {
    pub fn append(&mut self, mut other: Self) {
        self.infos.append(&mut other.infos);
        self.locked_funds.append(&mut other.locked_funds);
        self.fee_debts.append(&mut other.fee_debts);
        self.deadline_infos.append(&mut other.deadline_infos);
        self.pre_commits.append(&mut other.pre_commits);
        self.sectors.append(&mut other.sectors);
        self.sector_deals.append(&mut other.sector_deals);
        self.sector_events.append(&mut other.sector_events);
    }

    pub fn into_records(self, records: &mut Records) {
        records.push(self.infos);
        records.push(self.locked_funds);
        records.push(self.fee_debts);
        records.push(self.deadline_infos);
        records.push(self.pre_commits);
        records.push(self.sectors);
        records.push(self.sector_deals);
        records.push(self.sector_events);
    }
}

/// Both versions of the miner state being compared.
struct MinerStates<'a> {
    info: &'a ActorInfo,
    prev: Option<&'a State>,
    cur: &'a State,
}

pub async fn extract(
    api: &(impl ActorStateLoader + ?Sized),
    info: &ActorInfo,
    prev_actor: Option<&ActorState>,
) -> anyhow::Result<MinerTaskResult> {
    let cur = api
        .load_miner_state(&info.actor)
        .await
        .context("loading current miner actor state")?;
    let prev = match prev_actor {
        Some(actor) => Some(
            api.load_miner_state(actor)
                .await
                .context("loading previous miner actor state")?,
        ),
        None => None,
    };
    let states = MinerStates {
        info,
        prev: prev.as_ref(),
        cur: &cur,
    };

    let mut result = MinerTaskResult {
        infos: states.miner_info().context("extracting miner info")?,
        locked_funds: states.locked_funds(),
        fee_debts: states.fee_debt(),
        deadline_infos: states
            .deadline_info()
            .context("extracting miner current deadline info")?,
        ..Default::default()
    };
    states
        .sector_data(&mut result)
        .context("extracting miner sector data")?;
    Ok(result)
}

impl MinerStates<'_> {
    fn miner_id(&self) -> String {
        self.info.address.to_string()
    }

    fn miner_info(&self) -> anyhow::Result<Vec<model::MinerInfo>> {
        if self.prev.is_some_and(|prev| !prev.info_changed(self.cur)) {
            return Ok(vec![]);
        }
        let info = &self.cur.info;
        let control_addresses = serde_json::to_string(
            &info
                .control_addresses
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
        )?;
        let multi_addresses = serde_json::to_string(
            &info
                .multi_addresses
                .iter()
                .map(hex::encode)
                .collect::<Vec<_>>(),
        )?;
        Ok(vec![model::MinerInfo {
            height: self.info.height(),
            miner_id: self.miner_id(),
            state_root: self.info.state_root(),
            owner_id: info.owner.to_string(),
            worker_id: info.worker.to_string(),
            new_worker: info.new_worker.as_ref().map(ToString::to_string),
            worker_change_epoch: info.worker_change_epoch,
            consensus_faulted_elapsed: info.consensus_fault_elapsed,
            peer_id: info.peer_id.as_ref().map(hex::encode),
            control_addresses: Some(control_addresses),
            multi_addresses: Some(multi_addresses),
            sector_size: i64::try_from(info.sector_size).context("sector size out of range")?,
        }])
    }

    fn locked_funds(&self) -> Vec<model::MinerLockedFund> {
        if self
            .prev
            .is_some_and(|prev| !prev.locked_funds_changed(self.cur))
        {
            return vec![];
        }
        vec![model::MinerLockedFund {
            height: self.info.height(),
            miner_id: self.miner_id(),
            state_root: self.info.state_root(),
            locked_funds: self.cur.locked_funds.atto().to_string(),
            initial_pledge: self.cur.initial_pledge.atto().to_string(),
            pre_commit_deposits: self.cur.pre_commit_deposits.atto().to_string(),
        }]
    }

    fn fee_debt(&self) -> Vec<model::MinerFeeDebt> {
        if self.prev.is_some_and(|prev| !prev.fee_debt_changed(self.cur)) {
            return vec![];
        }
        vec![model::MinerFeeDebt {
            height: self.info.height(),
            miner_id: self.miner_id(),
            state_root: self.info.state_root(),
            fee_debt: self.cur.fee_debt.atto().to_string(),
        }]
    }

    fn deadline_info(&self) -> anyhow::Result<Vec<model::MinerCurrentDeadlineInfo>> {
        let epoch = self.info.epoch;
        let cur = self.cur.deadline_info(epoch);
        if self
            .prev
            .is_some_and(|prev| prev.deadline_info(epoch) == cur)
        {
            return Ok(vec![]);
        }
        Ok(vec![model::MinerCurrentDeadlineInfo {
            height: self.info.height(),
            miner_id: self.miner_id(),
            state_root: self.info.state_root(),
            deadline_index: i64::try_from(cur.index).context("deadline index out of range")?,
            period_start: cur.period_start,
            open: cur.open,
            close: cur.close,
            challenge: cur.challenge,
            fault_cutoff: cur.fault_cutoff,
        }])
    }

    fn sector_data(&self, result: &mut MinerTaskResult) -> anyhow::Result<()> {
        let empty = BTreeSet::new();
        let (prev_faulty, prev_recovering, prev_terminated) = match self.prev {
            Some(prev) => (
                &prev.faulty_sectors,
                &prev.recovering_sectors,
                &prev.terminated_sectors,
            ),
            None => (&empty, &empty, &empty),
        };

        // pre-commits
        let (added_pre_commits, removed_pre_commits) = match self.prev {
            None => (
                self.cur.pre_committed_sectors.iter().collect::<Vec<_>>(),
                vec![],
            ),
            Some(prev) => {
                let changes = prev
                    .pre_committed_sectors
                    .diff(&self.cur.pre_committed_sectors);
                (changes.added, changes.removed)
            }
        };

        // sectors
        let (added_sectors, extended_sectors) = match self.prev {
            None => (self.cur.sectors.iter().collect::<Vec<_>>(), vec![]),
            Some(prev) => {
                let changes = prev.sectors.diff(&self.cur.sectors);
                let extended = changes
                    .modified
                    .into_iter()
                    .filter(|m| m.from.expiration != m.to.expiration)
                    .map(|m| (m.key, m.to))
                    .collect();
                (changes.added, extended)
            }
        };

        let mut events = Vec::new();
        for (sector, pre_commit) in sorted(added_pre_commits) {
            result.pre_commits.push(self.pre_commit_model(*sector, pre_commit)?);
            events.push((*sector, MinerSectorEventType::PrecommitAdded));
        }
        for (sector, _) in sorted(removed_pre_commits) {
            // a pre-commit that turned into a sector was proven, not expired
            if !self.cur.sectors.contains_key(sector) {
                events.push((*sector, MinerSectorEventType::PrecommitExpired));
            }
        }
        for (sector, info) in sorted(added_sectors) {
            result.sectors.push(self.sector_model(*sector, info)?);
            for deal in &info.deal_ids {
                result.sector_deals.push(model::MinerSectorDeal {
                    height: self.info.height(),
                    miner_id: self.miner_id(),
                    sector_id: to_i64(*sector)?,
                    deal_id: i64::try_from(*deal).context("deal id out of range")?,
                });
            }
            let event = if info.deal_ids.is_empty() {
                MinerSectorEventType::CommitCapacityAdded
            } else {
                MinerSectorEventType::SectorAdded
            };
            events.push((*sector, event));
        }
        for (sector, info) in sorted(extended_sectors) {
            result.sectors.push(self.sector_model(*sector, info)?);
            events.push((*sector, MinerSectorEventType::SectorExtended));
        }

        let cur = self.cur;
        events.extend(
            cur.faulty_sectors
                .difference(prev_faulty)
                .map(|s| (*s, MinerSectorEventType::SectorFaulted)),
        );
        events.extend(
            cur.recovering_sectors
                .difference(prev_recovering)
                .map(|s| (*s, MinerSectorEventType::SectorRecovering)),
        );
        events.extend(
            prev_faulty
                .difference(&cur.faulty_sectors)
                .filter(|s| !cur.terminated_sectors.contains(*s))
                .map(|s| (*s, MinerSectorEventType::SectorRecovered)),
        );
        events.extend(
            cur.terminated_sectors
                .difference(prev_terminated)
                .map(|s| (*s, MinerSectorEventType::SectorTerminated)),
        );

        for (sector, event) in events {
            result.sector_events.push(model::MinerSectorEvent {
                height: self.info.height(),
                miner_id: self.miner_id(),
                sector_id: to_i64(sector)?,
                state_root: self.info.state_root(),
                event,
            });
        }
        Ok(())
    }

    fn pre_commit_model(
        &self,
        sector: SectorNumber,
        info: &SectorPreCommitOnChainInfo,
    ) -> anyhow::Result<model::MinerPreCommitInfo> {
        Ok(model::MinerPreCommitInfo {
            height: self.info.height(),
            miner_id: self.miner_id(),
            sector_id: to_i64(sector)?,
            state_root: self.info.state_root(),
            sealed_cid: info.sealed_cid.to_string(),
            seal_rand_epoch: info.seal_rand_epoch,
            expiration_epoch: info.expiration,
            pre_commit_deposit: info.pre_commit_deposit.atto().to_string(),
            pre_commit_epoch: info.pre_commit_epoch,
            deal_weight: info.deal_weight.to_string(),
            verified_deal_weight: info.verified_deal_weight.to_string(),
        })
    }

    fn sector_model(
        &self,
        sector: SectorNumber,
        info: &SectorOnChainInfo,
    ) -> anyhow::Result<model::MinerSectorInfo> {
        Ok(model::MinerSectorInfo {
            height: self.info.height(),
            miner_id: self.miner_id(),
            sector_id: to_i64(sector)?,
            state_root: self.info.state_root(),
            sealed_cid: info.sealed_cid.to_string(),
            activation_epoch: info.activation,
            expiration_epoch: info.expiration,
            deal_weight: info.deal_weight.to_string(),
            verified_deal_weight: info.verified_deal_weight.to_string(),
            initial_pledge: info.initial_pledge.atto().to_string(),
            expected_day_reward: info.expected_day_reward.atto().to_string(),
            expected_storage_pledge: info.expected_storage_pledge.atto().to_string(),
        })
    }
}

fn sorted<T>(mut entries: Vec<(&SectorNumber, T)>) -> Vec<(&SectorNumber, T)> {
    entries.sort_by_key(|(sector, _)| **sector);
    entries
}

fn to_i64(sector: SectorNumber) -> anyhow::Result<i64> {
    i64::try_from(sector).context("sector number out of range")
}
