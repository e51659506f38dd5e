// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

/// Inclusion of a message in a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockMessage {
    pub height: i64,
    pub block: String,
    pub message: String,
}

impl_record!(BlockMessage, "block_messages", [height, block, message]);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    pub height: i64,
    pub message: String,
    pub state_root: String,
    pub idx: i64,
    pub exit_code: i64,
    pub gas_used: i64,
}

impl_record!(
    Receipt,
    "receipts",
    [height, message, state_root, idx, exit_code, gas_used]
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub height: i64,
    pub cid: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub gas_fee_cap: String,
    pub gas_premium: String,
    pub gas_limit: i64,
    pub size_bytes: i64,
    pub nonce: i64,
    pub method: i64,
    pub params: Option<Vec<u8>>,
}

impl_record!(
    Message,
    "messages",
    [
        height,
        cid,
        from,
        to,
        value,
        gas_fee_cap,
        gas_premium,
        gas_limit,
        size_bytes,
        nonce,
        method,
        params,
    ]
);

/// A message with its method and parameters decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedMessage {
    pub height: i64,
    pub cid: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub method: String,
    /// JSON rendering of the parameters.
    pub params: Option<String>,
}

impl_record!(
    ParsedMessage,
    "parsed_messages",
    [height, cid, from, to, value, method, params]
);

/// Gas usage of a tipset against the block gas target.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageGasEconomy {
    pub height: i64,
    pub state_root: String,
    pub gas_limit_total: i64,
    pub gas_limit_unique_total: i64,
    /// Base fee of the next tipset, in FIL.
    pub base_fee: f64,
    /// Change of the base fee in units of the maximum 12.5% step.
    pub base_fee_change_log: f64,
    pub gas_fill_ratio: f64,
    pub gas_capacity_ratio: f64,
    pub gas_waste_ratio: f64,
}

impl_record!(
    MessageGasEconomy,
    "message_gas_economy",
    [
        height,
        state_root,
        gas_limit_total,
        gas_limit_unique_total,
        base_fee,
        base_fee_change_log,
        gas_fill_ratio,
        gas_capacity_ratio,
        gas_waste_ratio,
    ]
);

/// A message joined with its receipt and the fee split derived from both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedGasOutputs {
    pub height: i64,
    pub cid: String,
    pub state_root: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub gas_fee_cap: String,
    pub gas_premium: String,
    pub gas_limit: i64,
    pub size_bytes: i64,
    pub nonce: i64,
    pub method: i64,
    pub actor_name: String,
    pub exit_code: i64,
    pub gas_used: i64,
    pub parent_base_fee: String,
    pub base_fee_burn: String,
    pub over_estimation_burn: String,
    pub miner_penalty: String,
    pub miner_tip: String,
    pub refund: String,
    pub gas_refund: i64,
    pub gas_burned: i64,
}

impl_record!(
    DerivedGasOutputs,
    "derived_gas_outputs",
    [
        height,
        cid,
        state_root,
        from,
        to,
        value,
        gas_fee_cap,
        gas_premium,
        gas_limit,
        size_bytes,
        nonce,
        method,
        actor_name,
        exit_code,
        gas_used,
        parent_base_fee,
        base_fee_burn,
        over_estimation_burn,
        miner_penalty,
        miner_tip,
        refund,
        gas_refund,
        gas_burned,
    ]
);
