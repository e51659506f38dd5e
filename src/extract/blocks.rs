// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use anyhow::Context as _;

use crate::blocks::Tipset;
use crate::model::{self, Records};

/// Header, parent and drand entry rows of every block in `tipset`.
pub fn extract_blocks(tipset: &Tipset) -> anyhow::Result<Records> {
    let mut headers = Vec::with_capacity(tipset.len());
    let mut parents = vec![];
    let mut drand_entries = vec![];

    for header in tipset.block_headers() {
        let block = header.cid().to_string();
        headers.push(model::BlockHeader {
            height: header.epoch,
            cid: block.clone(),
            parent_weight: header.parent_weight.to_string(),
            parent_state_root: header.state_root.to_string(),
            miner: header.miner_address.to_string(),
            timestamp: i64::try_from(header.timestamp)
                .with_context(|| format!("timestamp of block {block} out of range"))?,
            win_count: header.win_count,
            parent_base_fee: header.parent_base_fee.atto().to_string(),
            fork_signaling: i64::try_from(header.fork_signal)
                .with_context(|| format!("fork signal of block {block} out of range"))?,
            ticket: header.ticket.clone(),
        });
        parents.extend(header.parents.cids().iter().map(|parent| model::BlockParent {
            height: header.epoch,
            block: block.clone(),
            parent: parent.to_string(),
        }));
        for entry in &header.beacon_entries {
            drand_entries.push(model::DrandBlockEntry {
                round: i64::try_from(entry.round)
                    .with_context(|| format!("drand round of block {block} out of range"))?,
                block: block.clone(),
            });
        }
    }

    let mut records = Records::new();
    records.push(headers);
    records.push(parents);
    records.push(drand_entries);
    Ok(records)
}
