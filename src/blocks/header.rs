// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;

use super::TipsetKey;
use crate::shim::{address::Address, bigint::BigInt, clock::ChainEpoch, econ::TokenAmount};

/// A drand randomness beacon entry included in a block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BeaconEntry {
    pub round: u64,
    pub data: Vec<u8>,
}

impl BeaconEntry {
    pub fn new(round: u64, data: Vec<u8>) -> Self {
        Self { round, data }
    }
}

/// Header of a block, as served by the node together with its CID.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    pub cid: Cid,
    /// The address of the miner actor that mined this block
    pub miner_address: Address,
    /// VRF proof of the ticket
    pub ticket: Option<Vec<u8>>,
    /// Number of wins in the election proof, if any
    pub win_count: Option<i64>,
    pub beacon_entries: Vec<BeaconEntry>,
    /// The set of parents this block was based on.
    pub parents: TipsetKey,
    /// The aggregate chain weight of the parent set
    pub parent_weight: BigInt,
    pub epoch: ChainEpoch,
    /// The CID of the parent state root after calculating parent tipset.
    pub state_root: Cid,
    /// The CID of the root of an array of `MessageReceipts`
    pub message_receipts: Cid,
    /// The CID of the Merkle links for `bls_messages` and `secp_messages`
    pub messages: Cid,
    /// The base fee of the parent block
    pub parent_base_fee: TokenAmount,
    /// Block creation time, in seconds since the Unix epoch
    pub timestamp: u64,
    pub fork_signal: u64,
}

impl Default for BlockHeader {
    fn default() -> Self {
        Self {
            cid: Cid::default(),
            miner_address: Address::new_id(0),
            ticket: None,
            win_count: None,
            beacon_entries: vec![],
            parents: TipsetKey::default(),
            parent_weight: BigInt::default(),
            epoch: 0,
            state_root: Cid::default(),
            message_receipts: Cid::default(),
            messages: Cid::default(),
            parent_base_fee: TokenAmount::default(),
            timestamp: 0,
            fork_signal: 0,
        }
    }
}

impl BlockHeader {
    pub fn cid(&self) -> &Cid {
        &self.cid
    }
}
