// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Message, receipt and gas records of one walk step.
//!
//! Messages included in `cur` only yield inclusion rows and the tipset's gas
//! economy. The messages of `prev` were executed to produce `cur`'s parent
//! state, so they are the ones recorded in full, joined with the receipts
//! `cur`'s blocks point at.

use ahash::HashSet;
use anyhow::Context as _;
use cid::Cid;
use indexmap::{IndexMap, map::Entry};
use num::{BigInt, BigRational, ToPrimitive as _};

use super::{ExtractContext, TipsetWindow, params};
use crate::chain::{BLOCK_GAS_TARGET, FILECOIN_PRECISION, compute_next_base_fee};
use crate::chain_api::ChainApi;
use crate::message::message_cid;
use crate::model::{self, Records};
use crate::shim::actors::ActorType;
use crate::shim::{clock::ChainEpoch, econ::TokenAmount, executor::Receipt, message::Message};

/// Kind assumed for a destination that does not exist yet: sending to an
/// unknown address implicitly creates an account actor.
pub const IMPLICIT_ACTOR_TYPE: ActorType = ActorType::Account;

/// Fractional change of the base fee between two tipsets, in units of the
/// largest step the protocol allows.
const BASE_FEE_MAX_CHANGE: f64 = 1.125;

pub async fn extract_messages<A: ChainApi + ?Sized>(
    ctx: ExtractContext<'_, A>,
    window: &TipsetWindow,
) -> anyhow::Result<Records> {
    let cur = &window.cur;
    let height = cur.epoch();

    let mut block_messages = vec![];
    let mut seen = HashSet::default();
    let mut gas_limit_total: i64 = 0;
    let mut gas_limit_unique_total: i64 = 0;
    for header in cur.block_headers() {
        let block = header.cid();
        let messages = ctx
            .api
            .chain_get_block_messages(block)
            .await
            .with_context(|| format!("getting messages of block {block}"))?;
        for message in messages.into_chain_messages() {
            let cid = message.cid()?;
            block_messages.push(model::BlockMessage {
                height,
                block: block.to_string(),
                message: cid.to_string(),
            });
            let gas_limit = i64::try_from(message.message().gas_limit)
                .with_context(|| format!("gas limit of {cid} out of range"))?;
            gas_limit_total += gas_limit;
            // signed and unsigned inclusions of a message share its unsigned cid
            if seen.insert(message_cid(message.message())?) {
                gas_limit_unique_total += gas_limit;
            }
        }
    }

    let economy = gas_economy(
        cur.parent_base_fee(),
        GasTotals {
            height,
            state_root: cur.parent_state().to_string(),
            gas_limit_total,
            gas_limit_unique_total,
            blocks: cur.len(),
        },
        ctx.network.smoke_height(),
    );

    let (receipts, executed) = executed_messages(ctx, window).await?;
    let derived = derive_message_records(ctx, window, executed)?;

    let mut records = Records::new();
    records.push(block_messages);
    records.push(vec![economy]);
    records.push(receipts);
    records.push(derived.messages);
    records.push(derived.parsed);
    records.push(derived.gas_outputs);
    Ok(records)
}

struct GasTotals {
    height: ChainEpoch,
    state_root: String,
    gas_limit_total: i64,
    gas_limit_unique_total: i64,
    blocks: usize,
}

fn gas_economy(
    parent_base_fee: &TokenAmount,
    totals: GasTotals,
    smoke_height: ChainEpoch,
) -> model::MessageGasEconomy {
    let new_base_fee = compute_next_base_fee(
        parent_base_fee,
        totals.gas_limit_unique_total,
        totals.blocks,
        totals.height,
        smoke_height,
    );
    let base_fee = ratio(new_base_fee.atto(), &BigInt::from(FILECOIN_PRECISION));
    let base_fee_change_log = if parent_base_fee.is_zero() || &new_base_fee == parent_base_fee {
        0.0
    } else {
        ratio(new_base_fee.atto(), parent_base_fee.atto()).ln() / BASE_FEE_MAX_CHANGE.ln()
    };

    let target = (totals.blocks as f64) * (BLOCK_GAS_TARGET as f64);
    let fill = |gas: i64| if target > 0.0 { gas as f64 / target } else { 0.0 };
    model::MessageGasEconomy {
        height: totals.height,
        state_root: totals.state_root,
        gas_limit_total: totals.gas_limit_total,
        gas_limit_unique_total: totals.gas_limit_unique_total,
        base_fee,
        base_fee_change_log,
        gas_fill_ratio: fill(totals.gas_limit_total),
        gas_capacity_ratio: fill(totals.gas_limit_unique_total),
        gas_waste_ratio: fill(totals.gas_limit_total - totals.gas_limit_unique_total),
    }
}

fn ratio(numer: &BigInt, denom: &BigInt) -> f64 {
    BigRational::new(numer.clone(), denom.clone())
        .to_f64()
        .unwrap_or(f64::NAN)
}

type ExecutedMessages = IndexMap<Cid, (Message, Receipt)>;

/// Receipt rows for every message executed on top of `cur`'s parent state,
/// and the distinct executed messages paired with their receipts.
async fn executed_messages<A: ChainApi + ?Sized>(
    ctx: ExtractContext<'_, A>,
    window: &TipsetWindow,
) -> anyhow::Result<(Vec<model::Receipt>, ExecutedMessages)> {
    let cur = &window.cur;
    let state_root = cur.parent_state().to_string();
    let mut receipts = vec![];
    let mut executed = ExecutedMessages::new();

    for header in cur.block_headers() {
        let block = header.cid();
        let block_receipts = ctx
            .api
            .chain_get_parent_receipts(block)
            .await
            .with_context(|| format!("getting parent receipts of block {block}"))?;
        let block_messages = ctx
            .api
            .chain_get_parent_messages(block)
            .await
            .with_context(|| format!("getting parent messages of block {block}"))?;
        anyhow::ensure!(
            block_receipts.len() == block_messages.len(),
            "block {block} has {} parent messages but {} receipts",
            block_messages.len(),
            block_receipts.len()
        );

        for (idx, (message, receipt)) in block_messages.into_iter().zip(block_receipts).enumerate()
        {
            // blocks of a tipset share their parent's messages
            if let Entry::Vacant(entry) = executed.entry(message.cid) {
                receipts.push(model::Receipt {
                    height: cur.epoch(),
                    message: message.cid.to_string(),
                    state_root: state_root.clone(),
                    idx: idx as i64,
                    exit_code: i64::from(receipt.exit_code.value()),
                    gas_used: i64::try_from(receipt.gas_used)
                        .context("gas used out of range")?,
                });
                entry.insert((message.message, receipt));
            }
        }
    }
    Ok((receipts, executed))
}

#[derive(Default)]
struct DerivedMessages {
    messages: Vec<model::Message>,
    parsed: Vec<model::ParsedMessage>,
    gas_outputs: Vec<model::DerivedGasOutputs>,
}

fn derive_message_records<A: ChainApi + ?Sized>(
    ctx: ExtractContext<'_, A>,
    window: &TipsetWindow,
    executed: ExecutedMessages,
) -> anyhow::Result<DerivedMessages> {
    // messages of `prev`, executed against the state `prev` was built on
    let height = window.prev.epoch();
    let state_root = window.prev.parent_state().to_string();
    let base_fee = window.cur.parent_base_fee();
    let mut derived = DerivedMessages::default();

    for (cid, (message, receipt)) in executed {
        let cid = cid.to_string();
        let size_bytes = i64::try_from(crate::message::message_size(&message)?)?;
        let gas_limit = i64::try_from(message.gas_limit).context("gas limit out of range")?;
        let nonce = i64::try_from(message.sequence).context("nonce out of range")?;
        let method = i64::try_from(message.method_num).context("method out of range")?;

        let (destination, actor_name) = match window.prev_state.get_actor(&message.to) {
            Some(actor) => {
                let builtin = ctx.registry.resolve(&actor.code);
                (
                    params::Destination {
                        kind: builtin.map(|b| b.kind),
                        version: builtin.map(|b| b.version),
                    },
                    ctx.registry.actor_name(&actor.code),
                )
            }
            None => (
                params::Destination {
                    kind: Some(IMPLICIT_ACTOR_TYPE),
                    version: None,
                },
                IMPLICIT_ACTOR_TYPE.to_string(),
            ),
        };
        let parsed = params::parse_params(&message, destination);

        let outputs = ctx.api.compute_gas_outputs(
            receipt.gas_used,
            message.gas_limit,
            base_fee,
            &message.gas_fee_cap,
            &message.gas_premium,
        );

        let from = message.from.to_string();
        let to = message.to.to_string();
        let value = message.value.atto().to_string();
        let gas_fee_cap = message.gas_fee_cap.atto().to_string();
        let gas_premium = message.gas_premium.atto().to_string();

        derived.messages.push(model::Message {
            height,
            cid: cid.clone(),
            from: from.clone(),
            to: to.clone(),
            value: value.clone(),
            gas_fee_cap: gas_fee_cap.clone(),
            gas_premium: gas_premium.clone(),
            gas_limit,
            size_bytes,
            nonce,
            method,
            params: (!message.params.is_empty()).then(|| message.params.to_vec()),
        });
        derived.parsed.push(model::ParsedMessage {
            height,
            cid: cid.clone(),
            from: from.clone(),
            to: to.clone(),
            value: value.clone(),
            method: parsed.method,
            params: parsed.params,
        });
        derived.gas_outputs.push(model::DerivedGasOutputs {
            height,
            cid,
            state_root: state_root.clone(),
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
            exit_code: i64::from(receipt.exit_code.value()),
            gas_used: i64::try_from(receipt.gas_used).context("gas used out of range")?,
            parent_base_fee: base_fee.atto().to_string(),
            base_fee_burn: outputs.base_fee_burn.atto().to_string(),
            over_estimation_burn: outputs.over_estimation_burn.atto().to_string(),
            miner_penalty: outputs.miner_penalty.atto().to_string(),
            miner_tip: outputs.miner_tip.atto().to_string(),
            refund: outputs.refund.atto().to_string(),
            gas_refund: i64::try_from(outputs.gas_refund).context("gas refund out of range")?,
            gas_burned: i64::try_from(outputs.gas_burned).context("gas burned out of range")?,
        });
    }
    Ok(derived)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(blocks: usize, total: i64, unique: i64) -> GasTotals {
        GasTotals {
            height: 100_000,
            state_root: "root".into(),
            gas_limit_total: total,
            gas_limit_unique_total: unique,
            blocks,
        }
    }

    #[test]
    fn economy_at_target_keeps_base_fee() {
        let parent = TokenAmount::from_atto(1_000_000_000);
        let economy = gas_economy(
            &parent,
            totals(2, 2 * BLOCK_GAS_TARGET, 2 * BLOCK_GAS_TARGET),
            51_000,
        );
        assert_eq!(economy.base_fee_change_log, 0.0);
        assert!((economy.base_fee - 1e-9).abs() < 1e-18);
        assert_eq!(economy.gas_fill_ratio, 1.0);
        assert_eq!(economy.gas_capacity_ratio, 1.0);
        assert_eq!(economy.gas_waste_ratio, 0.0);
    }

    #[test]
    fn full_blocks_raise_base_fee_by_one_step() {
        let parent = TokenAmount::from_atto(8_000_000_000u64);
        let economy = gas_economy(
            &parent,
            totals(1, 3 * BLOCK_GAS_TARGET, 2 * BLOCK_GAS_TARGET),
            51_000,
        );
        assert!((economy.base_fee_change_log - 1.0).abs() < 1e-9);
        assert_eq!(economy.gas_fill_ratio, 3.0);
        assert_eq!(economy.gas_capacity_ratio, 2.0);
        assert_eq!(economy.gas_waste_ratio, 1.0);
    }

    #[test]
    fn empty_tipset_lowers_base_fee() {
        let parent = TokenAmount::from_atto(8_000_000_000u64);
        let economy = gas_economy(&parent, totals(1, 0, 0), 51_000);
        // the same step down is larger in log terms
        let expected = (7.0f64 / 8.0).ln() / 1.125f64.ln();
        assert!((economy.base_fee_change_log - expected).abs() < 1e-9);
        assert_eq!(economy.gas_fill_ratio, 0.0);
    }
}
