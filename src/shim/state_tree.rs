// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::sync::Arc;

use ahash::HashMap;
use cid::Cid;

use crate::shim::address::Address;

pub use fvm_shared4::state::ActorState;

/// Snapshot of every actor at one state root.
///
/// Cloning is cheap: the actor table is shared.
#[derive(Clone, Debug)]
pub struct StateTree {
    root: Cid,
    actors: Arc<HashMap<Address, ActorState>>,
}

impl StateTree {
    pub fn new(root: Cid, actors: HashMap<Address, ActorState>) -> Self {
        Self {
            root,
            actors: Arc::new(actors),
        }
    }

    pub fn root(&self) -> &Cid {
        &self.root
    }

    /// Returns `None` when no actor lives at `addr` in this state.
    pub fn get_actor(&self, addr: &Address) -> Option<&ActorState> {
        self.actors.get(addr)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Address, &ActorState)> {
        self.actors.iter()
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}
