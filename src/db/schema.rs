// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Tables of the indexer database.
//!
//! Token amounts and big integers are stored as decimal text, CIDs and
//! addresses in their string form.

pub const SCHEMA_NAME: &str = "indexer";

/// Bumped whenever a table or key changes.
pub const SCHEMA_VERSION: i64 = 2;

pub const DDL: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS actors (
        height INTEGER NOT NULL,
        id TEXT NOT NULL,
        state_root TEXT NOT NULL,
        code TEXT NOT NULL,
        head TEXT NOT NULL,
        balance TEXT NOT NULL,
        nonce INTEGER NOT NULL,
        PRIMARY KEY (height, id, state_root)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS actor_states (
        height INTEGER NOT NULL,
        head TEXT NOT NULL,
        code TEXT NOT NULL,
        state TEXT NOT NULL,
        PRIMARY KEY (height, head, code)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS market_deal_proposals (
        height INTEGER NOT NULL,
        deal_id INTEGER NOT NULL,
        state_root TEXT NOT NULL,
        piece_cid TEXT NOT NULL,
        padded_piece_size INTEGER NOT NULL,
        unpadded_piece_size INTEGER NOT NULL,
        is_verified BOOLEAN NOT NULL,
        client_id TEXT NOT NULL,
        provider_id TEXT NOT NULL,
        start_epoch INTEGER NOT NULL,
        end_epoch INTEGER NOT NULL,
        storage_price_per_epoch TEXT NOT NULL,
        provider_collateral TEXT NOT NULL,
        client_collateral TEXT NOT NULL,
        label TEXT NOT NULL,
        PRIMARY KEY (height, deal_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS market_deal_states (
        height INTEGER NOT NULL,
        deal_id INTEGER NOT NULL,
        state_root TEXT NOT NULL,
        sector_start_epoch INTEGER NOT NULL,
        last_update_epoch INTEGER NOT NULL,
        slash_epoch INTEGER NOT NULL,
        PRIMARY KEY (height, deal_id, state_root)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS chain_powers (
        height INTEGER NOT NULL,
        state_root TEXT NOT NULL,
        total_raw_bytes_power TEXT NOT NULL,
        total_raw_bytes_committed TEXT NOT NULL,
        total_qa_bytes_power TEXT NOT NULL,
        total_qa_bytes_committed TEXT NOT NULL,
        total_pledge_collateral TEXT NOT NULL,
        qa_smoothed_position_estimate TEXT NOT NULL,
        qa_smoothed_velocity_estimate TEXT NOT NULL,
        miner_count INTEGER NOT NULL,
        participating_miner_count INTEGER NOT NULL,
        PRIMARY KEY (height, state_root)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS power_actor_claims (
        height INTEGER NOT NULL,
        miner_id TEXT NOT NULL,
        state_root TEXT NOT NULL,
        raw_byte_power TEXT NOT NULL,
        quality_adj_power TEXT NOT NULL,
        PRIMARY KEY (height, miner_id, state_root)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS miner_infos (
        height INTEGER NOT NULL,
        miner_id TEXT NOT NULL,
        state_root TEXT NOT NULL,
        owner_id TEXT NOT NULL,
        worker_id TEXT NOT NULL,
        new_worker TEXT,
        worker_change_epoch INTEGER NOT NULL,
        consensus_faulted_elapsed INTEGER NOT NULL,
        peer_id TEXT,
        control_addresses TEXT,
        multi_addresses TEXT,
        sector_size INTEGER NOT NULL,
        PRIMARY KEY (height, miner_id, state_root)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS miner_locked_funds (
        height INTEGER NOT NULL,
        miner_id TEXT NOT NULL,
        state_root TEXT NOT NULL,
        locked_funds TEXT NOT NULL,
        initial_pledge TEXT NOT NULL,
        pre_commit_deposits TEXT NOT NULL,
        PRIMARY KEY (height, miner_id, state_root)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS miner_fee_debts (
        height INTEGER NOT NULL,
        miner_id TEXT NOT NULL,
        state_root TEXT NOT NULL,
        fee_debt TEXT NOT NULL,
        PRIMARY KEY (height, miner_id, state_root)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS miner_current_deadline_infos (
        height INTEGER NOT NULL,
        miner_id TEXT NOT NULL,
        state_root TEXT NOT NULL,
        deadline_index INTEGER NOT NULL,
        period_start INTEGER NOT NULL,
        open INTEGER NOT NULL,
        close INTEGER NOT NULL,
        challenge INTEGER NOT NULL,
        fault_cutoff INTEGER NOT NULL,
        PRIMARY KEY (height, miner_id, state_root)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS miner_pre_commit_infos (
        height INTEGER NOT NULL,
        miner_id TEXT NOT NULL,
        sector_id INTEGER NOT NULL,
        state_root TEXT NOT NULL,
        sealed_cid TEXT NOT NULL,
        seal_rand_epoch INTEGER NOT NULL,
        expiration_epoch INTEGER NOT NULL,
        pre_commit_deposit TEXT NOT NULL,
        pre_commit_epoch INTEGER NOT NULL,
        deal_weight TEXT NOT NULL,
        verified_deal_weight TEXT NOT NULL,
        PRIMARY KEY (height, miner_id, sector_id, state_root)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS miner_sector_infos (
        height INTEGER NOT NULL,
        miner_id TEXT NOT NULL,
        sector_id INTEGER NOT NULL,
        state_root TEXT NOT NULL,
        sealed_cid TEXT NOT NULL,
        activation_epoch INTEGER NOT NULL,
        expiration_epoch INTEGER NOT NULL,
        deal_weight TEXT NOT NULL,
        verified_deal_weight TEXT NOT NULL,
        initial_pledge TEXT NOT NULL,
        expected_day_reward TEXT NOT NULL,
        expected_storage_pledge TEXT NOT NULL,
        PRIMARY KEY (height, miner_id, sector_id, state_root)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS miner_sector_deals (
        height INTEGER NOT NULL,
        miner_id TEXT NOT NULL,
        sector_id INTEGER NOT NULL,
        deal_id INTEGER NOT NULL,
        PRIMARY KEY (height, miner_id, sector_id, deal_id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS miner_sector_events (
        height INTEGER NOT NULL,
        miner_id TEXT NOT NULL,
        sector_id INTEGER NOT NULL,
        state_root TEXT NOT NULL,
        event TEXT NOT NULL,
        PRIMARY KEY (height, sector_id, event, miner_id, state_root)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS block_headers (
        height INTEGER NOT NULL,
        cid TEXT NOT NULL,
        parent_weight TEXT NOT NULL,
        parent_state_root TEXT NOT NULL,
        miner TEXT NOT NULL,
        timestamp INTEGER NOT NULL,
        win_count INTEGER,
        parent_base_fee TEXT NOT NULL,
        fork_signaling INTEGER NOT NULL,
        ticket BLOB,
        PRIMARY KEY (height, cid)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS block_parents (
        height INTEGER NOT NULL,
        block TEXT NOT NULL,
        parent TEXT NOT NULL,
        PRIMARY KEY (height, block, parent)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS drand_block_entries (
        round INTEGER NOT NULL,
        block TEXT NOT NULL,
        PRIMARY KEY (round, block)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS block_messages (
        height INTEGER NOT NULL,
        block TEXT NOT NULL,
        message TEXT NOT NULL,
        PRIMARY KEY (height, block, message)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS receipts (
        height INTEGER NOT NULL,
        message TEXT NOT NULL,
        state_root TEXT NOT NULL,
        idx INTEGER NOT NULL,
        exit_code INTEGER NOT NULL,
        gas_used INTEGER NOT NULL,
        PRIMARY KEY (height, message, state_root)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS messages (
        height INTEGER NOT NULL,
        cid TEXT NOT NULL,
        "from" TEXT NOT NULL,
        "to" TEXT NOT NULL,
        value TEXT NOT NULL,
        gas_fee_cap TEXT NOT NULL,
        gas_premium TEXT NOT NULL,
        gas_limit INTEGER NOT NULL,
        size_bytes INTEGER NOT NULL,
        nonce INTEGER NOT NULL,
        method INTEGER NOT NULL,
        params BLOB,
        PRIMARY KEY (height, cid)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS parsed_messages (
        height INTEGER NOT NULL,
        cid TEXT NOT NULL,
        "from" TEXT NOT NULL,
        "to" TEXT NOT NULL,
        value TEXT NOT NULL,
        method TEXT NOT NULL,
        params TEXT,
        PRIMARY KEY (height, cid)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS message_gas_economy (
        height INTEGER NOT NULL,
        state_root TEXT NOT NULL,
        gas_limit_total INTEGER NOT NULL,
        gas_limit_unique_total INTEGER NOT NULL,
        base_fee REAL NOT NULL,
        base_fee_change_log REAL NOT NULL,
        gas_fill_ratio REAL NOT NULL,
        gas_capacity_ratio REAL NOT NULL,
        gas_waste_ratio REAL NOT NULL,
        PRIMARY KEY (height, state_root)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS derived_gas_outputs (
        height INTEGER NOT NULL,
        cid TEXT NOT NULL,
        state_root TEXT NOT NULL,
        "from" TEXT NOT NULL,
        "to" TEXT NOT NULL,
        value TEXT NOT NULL,
        gas_fee_cap TEXT NOT NULL,
        gas_premium TEXT NOT NULL,
        gas_limit INTEGER NOT NULL,
        size_bytes INTEGER NOT NULL,
        nonce INTEGER NOT NULL,
        method INTEGER NOT NULL,
        actor_name TEXT NOT NULL,
        exit_code INTEGER NOT NULL,
        gas_used INTEGER NOT NULL,
        parent_base_fee TEXT NOT NULL,
        base_fee_burn TEXT NOT NULL,
        over_estimation_burn TEXT NOT NULL,
        miner_penalty TEXT NOT NULL,
        miner_tip TEXT NOT NULL,
        refund TEXT NOT NULL,
        gas_refund INTEGER NOT NULL,
        gas_burned INTEGER NOT NULL,
        PRIMARY KEY (height, cid, state_root)
    )"#,
];
