// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

/// An actor whose state changed at `height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub height: i64,
    pub id: String,
    pub state_root: String,
    pub code: String,
    pub head: String,
    pub balance: String,
    pub nonce: i64,
}

impl_record!(
    Actor,
    "actors",
    [height, id, state_root, code, head, balance, nonce]
);

/// The decoded head of a changed actor, rendered as JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActorState {
    pub height: i64,
    pub head: String,
    pub code: String,
    pub state: String,
}

impl_record!(ActorState, "actor_states", [height, head, code, state]);
