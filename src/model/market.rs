// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketDealProposal {
    pub height: i64,
    pub deal_id: i64,
    pub state_root: String,
    pub piece_cid: String,
    pub padded_piece_size: i64,
    pub unpadded_piece_size: i64,
    pub is_verified: bool,
    pub client_id: String,
    pub provider_id: String,
    pub start_epoch: i64,
    pub end_epoch: i64,
    pub storage_price_per_epoch: String,
    pub provider_collateral: String,
    pub client_collateral: String,
    pub label: String,
}

impl_record!(
    MarketDealProposal,
    "market_deal_proposals",
    [
        height,
        deal_id,
        state_root,
        piece_cid,
        padded_piece_size,
        unpadded_piece_size,
        is_verified,
        client_id,
        provider_id,
        start_epoch,
        end_epoch,
        storage_price_per_epoch,
        provider_collateral,
        client_collateral,
        label,
    ]
);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketDealState {
    pub height: i64,
    pub deal_id: i64,
    pub state_root: String,
    pub sector_start_epoch: i64,
    pub last_update_epoch: i64,
    pub slash_epoch: i64,
}

impl_record!(
    MarketDealState,
    "market_deal_states",
    [
        height,
        deal_id,
        state_root,
        sector_start_epoch,
        last_update_epoch,
        slash_epoch,
    ]
);
