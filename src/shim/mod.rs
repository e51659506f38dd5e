// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Thin layer over the `fvm_shared` primitives the indexer works with, plus the
//! typed actor state views handed out by the node.

pub mod actors;
pub mod state_tree;

mod fvm_shared_latest {
    pub use fvm_shared4::*;
}

pub mod address {
    pub use super::fvm_shared_latest::address::Address;
}

pub mod clock {
    pub use super::fvm_shared_latest::clock::ChainEpoch;
}

pub mod crypto {
    pub use super::fvm_shared_latest::crypto::signature::{Signature, SignatureType};
}

pub mod econ {
    pub use super::fvm_shared_latest::econ::TokenAmount;
}

pub mod error {
    pub use super::fvm_shared_latest::error::ExitCode;
}

pub mod message {
    pub use super::fvm_shared_latest::MethodNum;
    pub use super::fvm_shared_latest::message::Message;
}

pub mod executor {
    pub use super::fvm_shared_latest::receipt::Receipt;
}

pub mod bigint {
    pub use num::BigInt;
}
