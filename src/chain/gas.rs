// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use crate::shim::econ::TokenAmount;

pub const GAS_OVERUSE_NUM: i128 = 11;
pub const GAS_OVERUSE_DENOM: i128 = 10;

/// Where the gas fees of an applied message went.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GasOutputs {
    pub base_fee_burn: TokenAmount,
    pub over_estimation_burn: TokenAmount,
    pub miner_penalty: TokenAmount,
    pub miner_tip: TokenAmount,
    pub refund: TokenAmount,

    pub gas_refund: u64,
    pub gas_burned: u64,
}

impl GasOutputs {
    /// Total the sender paid: everything but the refund.
    pub fn total_cost(&self) -> TokenAmount {
        &self.base_fee_burn + &self.over_estimation_burn + &self.miner_tip
    }
}

pub fn compute_gas_outputs(
    gas_used: u64,
    gas_limit: u64,
    base_fee: &TokenAmount,
    fee_cap: &TokenAmount,
    gas_premium: &TokenAmount,
) -> GasOutputs {
    let mut base_fee_to_pay = base_fee;
    let mut out = GasOutputs::default();

    if base_fee > fee_cap {
        base_fee_to_pay = fee_cap;
        out.miner_penalty = (base_fee - fee_cap) * gas_used;
    }
    out.base_fee_burn = base_fee_to_pay * gas_used;

    let mut miner_tip = gas_premium.clone();
    if &(base_fee_to_pay + &miner_tip) > fee_cap {
        miner_tip = fee_cap - base_fee_to_pay;
    }
    out.miner_tip = &miner_tip * gas_limit;

    let (gas_refund, gas_burned) = compute_gas_overestimation_burn(gas_used, gas_limit);
    out.gas_refund = gas_refund;
    out.gas_burned = gas_burned;

    if out.gas_burned != 0 {
        out.over_estimation_burn = base_fee_to_pay * out.gas_burned;
        out.miner_penalty += (base_fee - base_fee_to_pay) * out.gas_burned;
    }
    let required_funds = fee_cap * gas_limit;
    out.refund =
        required_funds - &out.base_fee_burn - &out.miner_tip - &out.over_estimation_burn;
    out
}

/// Splits the unused gas into the part refunded to the sender and the part
/// burned for over-estimating the limit. Returns `(gas_refund, gas_burned)`.
pub fn compute_gas_overestimation_burn(gas_used: u64, gas_limit: u64) -> (u64, u64) {
    if gas_used == 0 {
        return (0, gas_limit);
    }
    let used = gas_used as i128;
    let limit = gas_limit as i128;

    let mut over = limit - (GAS_OVERUSE_NUM * used) / GAS_OVERUSE_DENOM;
    if over < 0 {
        return (gas_limit.saturating_sub(gas_used), 0);
    }
    if over > used {
        over = used;
    }

    let gas_to_burn = (limit - used) * over / used;
    let gas_refund = limit - used - gas_to_burn;
    (gas_refund as u64, gas_to_burn as u64)
}
