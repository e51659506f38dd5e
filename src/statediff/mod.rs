// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Actor-level difference between two state trees.

use ahash::HashMap;

use crate::shim::address::Address;
use crate::shim::state_tree::{ActorState, StateTree};

/// Actors of `cur` that are new or whose record differs from `prev`, with
/// their `cur` record. Actors only found in `prev` are not reported.
pub fn diff(prev: &StateTree, cur: &StateTree) -> HashMap<Address, ActorState> {
    if prev.root() == cur.root() {
        return HashMap::default();
    }
    cur.iter()
        .filter(|(addr, actor)| prev.get_actor(addr) != Some(*actor))
        .map(|(addr, actor)| (*addr, actor.clone()))
        .collect()
}
