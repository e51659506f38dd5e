// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Protocol arithmetic the indexer recomputes from chain data.

pub mod base_fee;
pub mod gas;

pub use base_fee::{
    BASE_FEE_MAX_CHANGE_DENOM, BLOCK_GAS_LIMIT, BLOCK_GAS_TARGET, FILECOIN_PRECISION,
    MINIMUM_BASE_FEE, compute_next_base_fee,
};
pub use gas::{GasOutputs, compute_gas_outputs, compute_gas_overestimation_burn};
