// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    pub height: i64,
    pub cid: String,
    pub parent_weight: String,
    pub parent_state_root: String,
    pub miner: String,
    pub timestamp: i64,
    pub win_count: Option<i64>,
    pub parent_base_fee: String,
    pub fork_signaling: i64,
    pub ticket: Option<Vec<u8>>,
}

impl_record!(
    BlockHeader,
    "block_headers",
    [
        height,
        cid,
        parent_weight,
        parent_state_root,
        miner,
        timestamp,
        win_count,
        parent_base_fee,
        fork_signaling,
        ticket,
    ]
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockParent {
    pub height: i64,
    pub block: String,
    pub parent: String,
}

impl_record!(BlockParent, "block_parents", [height, block, parent]);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrandBlockEntry {
    pub round: i64,
    pub block: String,
}

impl_record!(DrandBlockEntry, "drand_block_entries", [round, block]);
