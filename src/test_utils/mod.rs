// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;

use cid::Cid;
use fvm_ipld_encoding::{DAG_CBOR, RawBytes, to_vec};
use multihash_codetable::{Code, MultihashDigest as _};

use crate::blocks::{BlockHeader, Tipset, TipsetKey};
use crate::chain_api::MemoryChain;
use crate::shim::actors::{ActorType, builtin_code};
use crate::shim::state_tree::{ActorState, StateTree};
use crate::shim::{address::Address, econ::TokenAmount, message::Message};

/// Actors version of the codes handed out by the fixtures.
pub const ACTORS_VERSION: u32 = 2;

/// Base fee every fixture block carries.
pub const PARENT_BASE_FEE: u64 = 1_000;

pub fn dummy_cid(i: u64) -> Cid {
    let bytes = i.to_le_bytes().to_vec();
    Cid::new_v1(DAG_CBOR, Code::Blake2b256.digest(&bytes))
}

pub fn message(from: u64, to: u64, sequence: u64) -> Message {
    Message {
        version: 0,
        from: Address::new_id(from),
        to: Address::new_id(to),
        sequence,
        value: TokenAmount::from_atto(0),
        method_num: 0,
        params: RawBytes::default(),
        gas_limit: 1_000_000,
        gas_fee_cap: TokenAmount::from_atto(200),
        gas_premium: TokenAmount::from_atto(10),
    }
}

/// An account actor with a head unique to `id`.
pub fn actor(id: u64, balance: u64) -> ActorState {
    ActorState {
        code: builtin_code(ACTORS_VERSION, ActorType::Account),
        state: dummy_cid(1_000 + id),
        sequence: 0,
        balance: TokenAmount::from_atto(balance),
        delegated_address: None,
    }
}

pub fn typed_actor(kind: ActorType, head: Cid) -> ActorState {
    ActorState {
        code: builtin_code(ACTORS_VERSION, kind),
        state: head,
        sequence: 0,
        balance: TokenAmount::from_atto(0),
        delegated_address: None,
    }
}

pub fn state_tree(root: u64, actors: impl IntoIterator<Item = (Address, ActorState)>) -> StateTree {
    StateTree::new(dummy_cid(root), actors.into_iter().collect())
}

/// Block `index` of the fixture tipset at `epoch`.
pub fn block_cid(epoch: i64, index: u64) -> Cid {
    dummy_cid(10_000 + epoch as u64 * 10 + index)
}

pub fn header(epoch: i64, index: u64, parents: TipsetKey, state_root: Cid) -> BlockHeader {
    BlockHeader {
        cid: block_cid(epoch, index),
        miner_address: Address::new_id(1_000 + index),
        ticket: Some(vec![index as u8]),
        win_count: Some(1),
        parents,
        epoch,
        state_root,
        parent_base_fee: TokenAmount::from_atto(PARENT_BASE_FEE),
        timestamp: 1_600_000_000 + epoch as u64 * 30,
        ..Default::default()
    }
}

/// Inserts `tree` and an object for the head of each of its actors, encoding
/// the actor's nonce and balance.
pub fn insert_state(chain: &MemoryChain, tree: &StateTree) {
    for (_, actor) in tree.iter() {
        let object = (actor.sequence, actor.balance.atto().to_string());
        chain.insert_object(actor.state, to_vec(&object).unwrap());
    }
    chain.insert_state_tree(tree.clone());
}

/// Inserts a chain with one tipset per state tree: the tipset at epoch `i`
/// has `states[i]` as its parent state and `blocks` blocks. Returns the
/// tipsets, lowest first.
pub fn linear_chain(chain: &MemoryChain, states: &[StateTree], blocks: u64) -> Vec<Arc<Tipset>> {
    let mut parents = TipsetKey::default();
    let mut tipsets = vec![];
    for (epoch, state) in states.iter().enumerate() {
        insert_state(chain, state);
        let epoch = epoch as i64;
        let headers = (0..blocks)
            .map(|index| header(epoch, index, parents.clone(), *state.root()))
            .collect();
        let tipset = chain.insert_tipset(Tipset::new(headers).unwrap());
        parents = tipset.key().clone();
        tipsets.push(tipset);
    }
    tipsets
}
