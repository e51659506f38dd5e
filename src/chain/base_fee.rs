// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use num::Integer as _;

use crate::shim::{bigint::BigInt, clock::ChainEpoch, econ::TokenAmount};

pub const BLOCK_GAS_LIMIT: i64 = 10_000_000_000;
pub const BLOCK_GAS_TARGET: i64 = BLOCK_GAS_LIMIT / 2;
pub const BASE_FEE_MAX_CHANGE_DENOM: i64 = 8; // 12.5%;
pub const INITIAL_BASE_FEE: i64 = 100000000; // Genesis base fee
pub const MINIMUM_BASE_FEE: i64 = 100;
pub const PACKING_EFFICIENCY_NUM: i64 = 4;
pub const PACKING_EFFICIENCY_DENOM: i64 = 5;
/// Atto units in one FIL.
pub const FILECOIN_PRECISION: i64 = 1_000_000_000_000_000_000;

/// Base fee of the tipset following one that used `gas_limit_used` gas over
/// `no_of_blocks` blocks, starting from `base_fee`.
///
/// Up to the Smoke upgrade the used gas is scaled up by the packing efficiency.
pub fn compute_next_base_fee(
    base_fee: &TokenAmount,
    gas_limit_used: i64,
    no_of_blocks: usize,
    epoch: ChainEpoch,
    smoke_height: ChainEpoch,
) -> TokenAmount {
    let no_of_blocks = (no_of_blocks as i64).max(1);
    let mut delta = if epoch > smoke_height {
        gas_limit_used / no_of_blocks
    } else {
        (PACKING_EFFICIENCY_DENOM as i128 * gas_limit_used as i128
            / (no_of_blocks as i128 * PACKING_EFFICIENCY_NUM as i128)) as i64
    };
    delta -= BLOCK_GAS_TARGET;

    // cap change at 12.5% (BaseFeeMaxChangeDenom) by capping delta
    delta = delta.clamp(-BLOCK_GAS_TARGET, BLOCK_GAS_TARGET);

    let change = (base_fee.atto() * BigInt::from(delta))
        .div_floor(&BigInt::from(BLOCK_GAS_TARGET))
        .div_floor(&BigInt::from(BASE_FEE_MAX_CHANGE_DENOM));
    let next_base_fee = base_fee.atto() + change;
    TokenAmount::from_atto(next_base_fee.max(BigInt::from(MINIMUM_BASE_FEE)))
}
