// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::BTreeSet;

use ahash::HashMap;
use fvm_ipld_encoding::RawBytes;
use pretty_assertions::assert_eq;

use super::*;
use crate::blocks::TipsetKey;
use crate::chain_api::MemoryChain;
use crate::db::Store;
use crate::message::{BlockMessages, ParentMessage, SignedMessage, message_cid};
use crate::model::MinerSectorEventType as Event;
use crate::shim::actors::adt::Map;
use crate::shim::actors::market::{DealProposal, DealState};
use crate::shim::actors::miner::{MinerInfo, SectorOnChainInfo, SectorPreCommitOnChainInfo};
use crate::shim::actors::power::{Claim, FilterEstimate};
use crate::shim::actors::{market as market_actor, miner as miner_actor, power as power_actor};
use crate::shim::bigint::BigInt;
use crate::shim::crypto::Signature;
use crate::shim::econ::TokenAmount;
use crate::shim::error::ExitCode;
use crate::shim::executor::Receipt;
use crate::shim::message::Message;
use crate::shim::actors::builtin_code;
use crate::test_utils::{
    ACTORS_VERSION, actor, dummy_cid, linear_chain, message, state_tree, typed_actor,
};

const MINER: Address = Address::new_id(1_000);

fn actor_info(actor: ActorState, address: Address, epoch: ChainEpoch) -> ActorInfo {
    ActorInfo {
        actor,
        address,
        parent_state_root: dummy_cid(900),
        epoch,
        tipset: TipsetKey::default(),
        parent_tipset: TipsetKey::default(),
    }
}

fn map<K: Eq + std::hash::Hash, V: PartialEq>(
    root: u64,
    entries: impl IntoIterator<Item = (K, V)>,
) -> Map<K, V> {
    Map::new(dummy_cid(root), entries.into_iter().collect::<HashMap<_, _>>())
}

fn names(records: &Records) -> Vec<(&'static str, usize)> {
    records.iter().map(|r| (r.name(), r.len())).collect()
}

async fn persisted(records: Records) -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open_file(&dir.path().join("index.db")).await.unwrap();
    store.persist(records).await.unwrap();
    (dir, store)
}

mod market_extraction {
    use super::*;
    use pretty_assertions::assert_eq;

    fn proposal(client: u64, piece_size: u64) -> DealProposal {
        DealProposal {
            piece_cid: dummy_cid(client),
            piece_size,
            verified_deal: false,
            client: Address::new_id(client),
            provider: MINER,
            label: format!("deal from {client}"),
            start_epoch: 10,
            end_epoch: 1_000,
            storage_price_per_epoch: TokenAmount::from_atto(5),
            provider_collateral: TokenAmount::from_atto(100),
            client_collateral: TokenAmount::from_atto(0),
        }
    }

    fn deal_state(start: ChainEpoch) -> DealState {
        DealState {
            sector_start_epoch: start,
            last_updated_epoch: -1,
            slash_epoch: -1,
        }
    }

    fn state(
        proposals: market_actor::DealProposals,
        states: market_actor::DealStates,
    ) -> market_actor::State {
        market_actor::State { proposals, states }
    }

    #[tokio::test]
    async fn new_actor_reports_every_deal() {
        let chain = MemoryChain::new();
        let head = dummy_cid(50);
        chain.insert_market_state(
            head,
            state(
                map(1, [(1, proposal(101, 2048)), (2, proposal(102, 1024))]),
                map(2, [(1, deal_state(20)), (2, deal_state(30))]),
            ),
        );
        let info = actor_info(typed_actor(ActorType::Market, head), market_actor::ADDRESS, 5);

        let result = market::extract(&chain, &info, None).await.unwrap();
        assert_eq!(result.proposals.len(), 2);
        assert_eq!(result.states.len(), 2);
        let first = &result.proposals[0];
        assert_eq!(first.deal_id, 1);
        assert_eq!(first.padded_piece_size, 2048);
        assert_eq!(first.unpadded_piece_size, 2032);
        assert_eq!(first.state_root, dummy_cid(900).to_string());
        assert_eq!(first.client_id, "f0101");
    }

    #[tokio::test]
    async fn unchanged_state_yields_nothing() {
        let chain = MemoryChain::new();
        let head = dummy_cid(50);
        chain.insert_market_state(
            head,
            state(
                map(1, [(1, proposal(101, 2048))]),
                map(2, [(1, deal_state(20))]),
            ),
        );
        let actor = typed_actor(ActorType::Market, head);
        let info = actor_info(actor.clone(), market_actor::ADDRESS, 5);

        for _ in 0..2 {
            let result = market::extract(&chain, &info, Some(&actor)).await.unwrap();
            assert!(result.proposals.is_empty());
            assert!(result.states.is_empty());
        }
    }

    #[tokio::test]
    async fn only_added_and_modified_deals_are_reported() {
        let chain = MemoryChain::new();
        let (prev_head, cur_head) = (dummy_cid(50), dummy_cid(51));
        let states = map(2, [(1, deal_state(20))]);
        chain.insert_market_state(
            prev_head,
            state(
                map(1, [(1, proposal(101, 2048)), (2, proposal(102, 1024))]),
                states.clone(),
            ),
        );
        chain.insert_market_state(
            cur_head,
            state(
                map(
                    3,
                    [
                        (1, proposal(101, 2048)),
                        (2, proposal(102, 4096)),
                        (3, proposal(103, 512)),
                    ],
                ),
                states,
            ),
        );
        let info = actor_info(typed_actor(ActorType::Market, cur_head), market_actor::ADDRESS, 5);
        let prev = typed_actor(ActorType::Market, prev_head);

        let first = market::extract(&chain, &info, Some(&prev)).await.unwrap();
        let ids: Vec<_> = first.proposals.iter().map(|p| p.deal_id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(first.proposals[0].padded_piece_size, 4096);
        // the deal state sub-tree kept its root
        assert!(first.states.is_empty());

        let second = market::extract(&chain, &info, Some(&prev)).await.unwrap();
        assert_eq!(first.proposals, second.proposals);
    }
}

mod power_extraction {
    use super::*;
    use pretty_assertions::assert_eq;

    fn claim(power: u64) -> Claim {
        Claim {
            raw_byte_power: BigInt::from(power),
            quality_adj_power: BigInt::from(power * 10),
        }
    }

    fn state(claims: power_actor::Claims) -> power_actor::State {
        power_actor::State {
            total_raw_byte_power: BigInt::from(300),
            total_bytes_committed: BigInt::from(300),
            total_quality_adj_power: BigInt::from(3_000),
            total_qa_bytes_committed: BigInt::from(3_000),
            total_pledge_collateral: TokenAmount::from_atto(42),
            this_epoch_qa_power_smoothed: FilterEstimate {
                position: BigInt::from(7),
                velocity: BigInt::from(-1),
            },
            miner_count: 2,
            miner_above_min_power_count: 1,
            claims,
        }
    }

    #[tokio::test]
    async fn summary_is_always_reported() {
        let chain = MemoryChain::new();
        let (prev_head, cur_head) = (dummy_cid(60), dummy_cid(61));
        let claims = map(1, [(Address::new_id(1_000), claim(100))]);
        chain.insert_power_state(prev_head, state(claims.clone()));
        chain.insert_power_state(cur_head, state(claims));
        let info = actor_info(typed_actor(ActorType::Power, cur_head), power_actor::ADDRESS, 9);
        let prev = typed_actor(ActorType::Power, prev_head);

        let result = power::extract(&chain, &info, Some(&prev)).await.unwrap();
        assert_eq!(result.chain_powers.len(), 1);
        assert!(result.claims.is_empty());
        let summary = &result.chain_powers[0];
        assert_eq!(summary.height, 9);
        assert_eq!(summary.total_qa_bytes_power, "3000");
        assert_eq!(summary.qa_smoothed_velocity_estimate, "-1");
        assert_eq!(summary.participating_miner_count, 1);
    }

    #[tokio::test]
    async fn claims_follow_the_previous_state() {
        let chain = MemoryChain::new();
        let (prev_head, cur_head) = (dummy_cid(60), dummy_cid(61));
        chain.insert_power_state(
            prev_head,
            state(map(1, [(Address::new_id(1_000), claim(100))])),
        );
        chain.insert_power_state(
            cur_head,
            state(map(
                2,
                [
                    (Address::new_id(1_000), claim(100)),
                    (Address::new_id(1_001), claim(200)),
                ],
            )),
        );
        let info = actor_info(typed_actor(ActorType::Power, cur_head), power_actor::ADDRESS, 9);

        let genesis = power::extract(&chain, &info, None).await.unwrap();
        assert_eq!(genesis.claims.len(), 2);

        let prev = typed_actor(ActorType::Power, prev_head);
        let result = power::extract(&chain, &info, Some(&prev)).await.unwrap();
        assert_eq!(result.claims.len(), 1);
        assert_eq!(result.claims[0].miner_id, "f01001");
        assert_eq!(result.claims[0].quality_adj_power, "2000");
    }
}

mod miner_extraction {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::extract::miner::MinerTaskResult;

    fn info() -> MinerInfo {
        MinerInfo {
            owner: Address::new_id(100),
            worker: Address::new_id(101),
            new_worker: None,
            worker_change_epoch: -1,
            control_addresses: vec![Address::new_id(102)],
            peer_id: Some(vec![0x12, 0x20]),
            multi_addresses: vec![vec![0x04, 0x7f]],
            sector_size: 32 << 30,
            consensus_fault_elapsed: -1,
        }
    }

    fn pre_commit(sector: u64) -> SectorPreCommitOnChainInfo {
        SectorPreCommitOnChainInfo {
            seal_proof: 8,
            sealed_cid: dummy_cid(3_000 + sector),
            seal_rand_epoch: 90,
            deal_ids: vec![],
            expiration: 5_000,
            pre_commit_deposit: TokenAmount::from_atto(10),
            pre_commit_epoch: 95,
            deal_weight: BigInt::from(0),
            verified_deal_weight: BigInt::from(0),
        }
    }

    fn sector(sector: u64, deal_ids: Vec<u64>, expiration: ChainEpoch) -> SectorOnChainInfo {
        SectorOnChainInfo {
            seal_proof: 8,
            sealed_cid: dummy_cid(4_000 + sector),
            deal_ids,
            activation: 100,
            expiration,
            deal_weight: BigInt::from(0),
            verified_deal_weight: BigInt::from(0),
            initial_pledge: TokenAmount::from_atto(20),
            expected_day_reward: TokenAmount::from_atto(1),
            expected_storage_pledge: TokenAmount::from_atto(2),
        }
    }

    fn state() -> miner_actor::State {
        miner_actor::State {
            info_root: dummy_cid(500),
            info: info(),
            pre_commit_deposits: TokenAmount::from_atto(30),
            locked_funds: TokenAmount::from_atto(1_000),
            initial_pledge: TokenAmount::from_atto(40),
            fee_debt: TokenAmount::from_atto(0),
            proving_period_start: 40,
            current_deadline: 2,
            pre_committed_sectors: map(
                600,
                [(1, pre_commit(1)), (2, pre_commit(2)), (3, pre_commit(3))],
            ),
            sectors: map(
                700,
                [(10, sector(10, vec![], 1_000)), (11, sector(11, vec![3], 1_000))],
            ),
            faulty_sectors: BTreeSet::from([10]),
            recovering_sectors: BTreeSet::new(),
            terminated_sectors: BTreeSet::new(),
        }
    }

    fn events(result: &MinerTaskResult) -> Vec<(i64, Event)> {
        result
            .sector_events
            .iter()
            .map(|e| (e.sector_id, e.event))
            .collect()
    }

    #[tokio::test]
    async fn new_miner_reports_every_facet() {
        let chain = MemoryChain::new();
        let head = dummy_cid(70);
        chain.insert_miner_state(head, state());
        let info = actor_info(typed_actor(ActorType::Miner, head), MINER, 120);

        let result = miner::extract(&chain, &info, None).await.unwrap();
        assert_eq!(result.infos.len(), 1);
        assert_eq!(result.locked_funds.len(), 1);
        assert_eq!(result.fee_debts.len(), 1);
        assert_eq!(result.deadline_infos.len(), 1);
        assert_eq!(result.pre_commits.len(), 3);
        assert_eq!(result.sectors.len(), 2);
        assert_eq!(result.sector_deals.len(), 1);
        assert_eq!(
            events(&result),
            vec![
                (1, Event::PrecommitAdded),
                (2, Event::PrecommitAdded),
                (3, Event::PrecommitAdded),
                (10, Event::CommitCapacityAdded),
                (11, Event::SectorAdded),
                (10, Event::SectorFaulted),
            ]
        );

        let miner_info = &result.infos[0];
        assert_eq!(miner_info.owner_id, "f0100");
        assert_eq!(miner_info.peer_id.as_deref(), Some("1220"));
        assert_eq!(miner_info.control_addresses.as_deref(), Some(r#"["f0102"]"#));
        assert_eq!(miner_info.multi_addresses.as_deref(), Some(r#"["047f"]"#));
        assert_eq!(miner_info.sector_size, 32 << 30);

        let deadline = &result.deadline_infos[0];
        assert_eq!(deadline.deadline_index, 2);
        assert_eq!(deadline.open, 40 + 2 * 60);
        assert_eq!(deadline.close, 40 + 3 * 60);
    }

    #[tokio::test]
    async fn sector_lifecycle_events() {
        let chain = MemoryChain::new();
        let (prev_head, cur_head) = (dummy_cid(70), dummy_cid(71));
        let prev = state();
        let mut cur = state();
        cur.fee_debt = TokenAmount::from_atto(5);
        // 1 was proven, 2 expired, 4 is new
        cur.pre_committed_sectors = map(601, [(3, pre_commit(3)), (4, pre_commit(4))]);
        cur.sectors = map(
            701,
            [
                (10, sector(10, vec![], 2_000)),
                (11, sector(11, vec![3], 1_000)),
                (1, sector(1, vec![7, 8], 1_000)),
                (5, sector(5, vec![], 1_000)),
            ],
        );
        cur.faulty_sectors = BTreeSet::from([11]);
        cur.recovering_sectors = BTreeSet::from([11]);
        cur.terminated_sectors = BTreeSet::from([12]);
        chain.insert_miner_state(prev_head, prev);
        chain.insert_miner_state(cur_head, cur);

        let info = actor_info(typed_actor(ActorType::Miner, cur_head), MINER, 120);
        let prev_actor = typed_actor(ActorType::Miner, prev_head);
        let result = miner::extract(&chain, &info, Some(&prev_actor))
            .await
            .unwrap();

        assert!(result.infos.is_empty());
        assert!(result.locked_funds.is_empty());
        assert_eq!(result.fee_debts.len(), 1);
        assert_eq!(result.fee_debts[0].fee_debt, "5");
        assert!(result.deadline_infos.is_empty());

        assert_eq!(
            result.pre_commits.iter().map(|p| p.sector_id).collect::<Vec<_>>(),
            vec![4]
        );
        assert_eq!(
            result.sectors.iter().map(|s| s.sector_id).collect::<Vec<_>>(),
            vec![1, 5, 10]
        );
        assert_eq!(
            result
                .sector_deals
                .iter()
                .map(|d| (d.sector_id, d.deal_id))
                .collect::<Vec<_>>(),
            vec![(1, 7), (1, 8)]
        );
        assert_eq!(
            events(&result),
            vec![
                (4, Event::PrecommitAdded),
                (2, Event::PrecommitExpired),
                (1, Event::SectorAdded),
                (5, Event::CommitCapacityAdded),
                (10, Event::SectorExtended),
                (11, Event::SectorFaulted),
                (11, Event::SectorRecovering),
                (10, Event::SectorRecovered),
                (12, Event::SectorTerminated),
            ]
        );
    }

    #[tokio::test]
    async fn missing_state_names_the_facet_source() {
        let chain = MemoryChain::new();
        let info = actor_info(typed_actor(ActorType::Miner, dummy_cid(70)), MINER, 120);
        let err = miner::extract(&chain, &info, None).await.unwrap_err();
        assert!(format!("{err:#}").contains("loading current miner actor state"));
    }
}

mod actor_dispatch {
    use super::*;
    use pretty_assertions::assert_eq;

    fn window(chain: &MemoryChain, prev: StateTree, cur: StateTree) -> TipsetWindow {
        let tipsets = linear_chain(chain, &[prev.clone(), cur.clone()], 1);
        TipsetWindow {
            cur: tipsets[1].clone(),
            prev: tipsets[0].clone(),
            cur_state: cur,
            prev_state: prev,
        }
    }

    #[tokio::test]
    async fn changed_actors_are_recorded_and_dispatched() {
        let chain = MemoryChain::new();
        let (prev_head, cur_head) = (dummy_cid(70), dummy_cid(71));
        let mut miner_state = miner_extraction_state();
        chain.insert_miner_state(prev_head, miner_state.clone());
        miner_state.fee_debt = TokenAmount::from_atto(9);
        chain.insert_miner_state(cur_head, miner_state);

        let unknown = ActorState {
            code: dummy_cid(77),
            ..actor(3, 0)
        };
        let prev = state_tree(
            1,
            [
                (Address::new_id(1), actor(1, 10)),
                (Address::new_id(2), actor(2, 10)),
                (MINER, typed_actor(ActorType::Miner, prev_head)),
            ],
        );
        let cur = state_tree(
            2,
            [
                (Address::new_id(1), actor(1, 11)),
                (Address::new_id(2), actor(2, 10)),
                (Address::new_id(3), unknown),
                (MINER, typed_actor(ActorType::Miner, cur_head)),
            ],
        );
        let window = window(&chain, prev, cur);
        let registry = ActorRegistry::new();
        let ctx = ExtractContext {
            api: &chain,
            registry: &registry,
            network: NetworkChain::Devnet,
        };

        let records = extract_actors(ctx, &window).await.unwrap();
        assert_eq!(
            names(&records),
            vec![("actors", 3), ("actor_states", 3), ("miner_fee_debts", 1)]
        );

        let (_dir, store) = persisted(records).await;
        let codes: Vec<(String, String)> =
            sqlx::query_as("SELECT id, code FROM actors WHERE height = 1 ORDER BY id")
                .fetch_all(store.pool())
                .await
                .unwrap();
        assert_eq!(
            codes,
            vec![
                ("f01".to_string(), "fil/2/account".to_string()),
                ("f01000".to_string(), "fil/2/storageminer".to_string()),
                ("f03".to_string(), dummy_cid(77).to_string()),
            ]
        );

        let states: Vec<(String, String, String)> =
            sqlx::query_as("SELECT head, code, state FROM actor_states ORDER BY state")
                .fetch_all(store.pool())
                .await
                .unwrap();
        assert_eq!(states.len(), 3);
        assert!(states.contains(&(
            dummy_cid(1_001).to_string(),
            builtin_code(ACTORS_VERSION, ActorType::Account).to_string(),
            r#"[0,"11"]"#.to_string(),
        )));
        assert!(states.contains(&(
            dummy_cid(1_003).to_string(),
            dummy_cid(77).to_string(),
            r#"[0,"0"]"#.to_string(),
        )));
    }

    #[tokio::test]
    async fn out_of_range_nonces_are_an_error() {
        let chain = MemoryChain::new();
        let prev = state_tree(1, [(Address::new_id(1), actor(1, 10))]);
        let cur = state_tree(
            2,
            [(
                Address::new_id(1),
                ActorState {
                    sequence: u64::MAX,
                    ..actor(1, 10)
                },
            )],
        );
        let window = window(&chain, prev, cur);
        let registry = ActorRegistry::new();
        let ctx = ExtractContext {
            api: &chain,
            registry: &registry,
            network: NetworkChain::Devnet,
        };

        match extract_actors(ctx, &window).await {
            Err(Error::Extraction { address, error, .. }) => {
                assert_eq!(address, Address::new_id(1));
                assert!(error.to_string().contains("out of range"), "{error:#}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn extractor_failures_name_the_actor() {
        let chain = MemoryChain::new();
        let prev = state_tree(1, [(Address::new_id(1), actor(1, 10))]);
        let cur = state_tree(
            2,
            [
                (Address::new_id(1), actor(1, 10)),
                (MINER, typed_actor(ActorType::Miner, dummy_cid(71))),
            ],
        );
        let window = window(&chain, prev, cur);
        let registry = ActorRegistry::new();
        let ctx = ExtractContext {
            api: &chain,
            registry: &registry,
            network: NetworkChain::Devnet,
        };

        match extract_actors(ctx, &window).await {
            Err(Error::Extraction { epoch, address, .. }) => {
                assert_eq!(epoch, 1);
                assert_eq!(address, MINER);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    fn miner_extraction_state() -> miner_actor::State {
        miner_actor::State {
            info_root: dummy_cid(500),
            info: MinerInfo {
                owner: Address::new_id(100),
                worker: Address::new_id(100),
                new_worker: None,
                worker_change_epoch: -1,
                control_addresses: vec![],
                peer_id: None,
                multi_addresses: vec![],
                sector_size: 2048,
                consensus_fault_elapsed: -1,
            },
            pre_commit_deposits: TokenAmount::from_atto(0),
            locked_funds: TokenAmount::from_atto(0),
            initial_pledge: TokenAmount::from_atto(0),
            fee_debt: TokenAmount::from_atto(0),
            proving_period_start: 0,
            current_deadline: 0,
            pre_committed_sectors: map(600, []),
            sectors: map(700, []),
            faulty_sectors: BTreeSet::new(),
            recovering_sectors: BTreeSet::new(),
            terminated_sectors: BTreeSet::new(),
        }
    }
}

mod message_correlation {
    use super::*;
    use pretty_assertions::assert_eq;

    fn receipt(gas_used: u64) -> Receipt {
        Receipt {
            exit_code: ExitCode::OK,
            return_data: RawBytes::default(),
            gas_used,
            events_root: None,
        }
    }

    fn parent_message(message: Message) -> ParentMessage {
        ParentMessage {
            cid: message_cid(&message).unwrap(),
            message,
        }
    }

    #[tokio::test]
    async fn messages_are_deduplicated_across_blocks() {
        let chain = MemoryChain::new();
        let prev_state = state_tree(1, [(Address::new_id(1), actor(1, 10))]);
        let cur_state = state_tree(2, [(Address::new_id(1), actor(1, 9))]);
        let tipsets = linear_chain(&chain, &[prev_state.clone(), cur_state.clone()], 2);
        let (prev, cur) = (tipsets[0].clone(), tipsets[1].clone());

        // included in `cur`: one message in both blocks, one signed message
        let shared = message(1, 2, 0);
        let signed = SignedMessage::new_unchecked(
            message(1, 2, 1),
            Signature::new_secp256k1(vec![0; 65]),
        );
        chain.insert_block_messages(
            cur.cids()[0],
            BlockMessages {
                bls_messages: vec![shared.clone()],
                secp_messages: vec![signed],
            },
        );
        chain.insert_block_messages(
            cur.cids()[1],
            BlockMessages {
                bls_messages: vec![shared],
                secp_messages: vec![],
            },
        );

        // executed on top of `prev`'s state: a send to an existing account and
        // a call with broken params to an address that does not exist yet
        let send = message(1, 1, 5);
        let mut call = message(1, 99, 6);
        call.method_num = 2;
        call.params = RawBytes::new(vec![0xff]);
        let executed = vec![parent_message(send), parent_message(call.clone())];
        for block in cur.cids() {
            chain.insert_parent_messages(
                *block,
                executed.clone(),
                vec![receipt(400_000), receipt(900_000)],
            );
        }

        let window = TipsetWindow {
            cur,
            prev,
            cur_state,
            prev_state,
        };
        let registry = ActorRegistry::new();
        let ctx = ExtractContext {
            api: &chain,
            registry: &registry,
            network: NetworkChain::Mainnet,
        };
        let records = messages::extract_messages(ctx, &window).await.unwrap();
        assert_eq!(
            names(&records),
            vec![
                ("block_messages", 3),
                ("message_gas_economy", 1),
                ("receipts", 2),
                ("messages", 2),
                ("parsed_messages", 2),
                ("derived_gas_outputs", 2),
            ]
        );

        let (_dir, store) = persisted(records).await;
        let (total, unique): (i64, i64) = sqlx::query_as(
            "SELECT gas_limit_total, gas_limit_unique_total FROM message_gas_economy",
        )
        .fetch_one(store.pool())
        .await
        .unwrap();
        assert_eq!((total, unique), (3_000_000, 2_000_000));

        let parsed: Vec<(String, Option<String>)> =
            sqlx::query_as(r#"SELECT method, params FROM parsed_messages ORDER BY "to""#)
                .fetch_all(store.pool())
                .await
                .unwrap();
        assert_eq!(
            parsed,
            vec![
                ("Send".to_string(), None),
                ("account.2".to_string(), None),
            ]
        );

        let heights: Vec<(i64, String)> =
            sqlx::query_as("SELECT height, actor_name FROM derived_gas_outputs ORDER BY nonce")
                .fetch_all(store.pool())
                .await
                .unwrap();
        assert_eq!(
            heights,
            vec![
                (0, "fil/2/account".to_string()),
                (0, "account".to_string()),
            ]
        );

        let call_cid = message_cid(&call).unwrap().to_string();
        let (gas_used, refund): (i64, i64) = sqlx::query_as(
            "SELECT gas_used, gas_refund FROM derived_gas_outputs WHERE cid = ?",
        )
        .bind(&call_cid)
        .fetch_one(store.pool())
        .await
        .unwrap();
        assert_eq!(gas_used, 900_000);
        let (expected_refund, _) =
            crate::chain::compute_gas_overestimation_burn(900_000, 1_000_000);
        assert_eq!(refund, expected_refund as i64);
    }

    #[tokio::test]
    async fn mismatched_receipts_are_an_error() {
        let chain = MemoryChain::new();
        let prev_state = state_tree(1, []);
        let cur_state = state_tree(2, []);
        let tipsets = linear_chain(&chain, &[prev_state.clone(), cur_state.clone()], 1);
        chain.insert_parent_messages(
            tipsets[1].cids()[0],
            vec![parent_message(message(1, 2, 0))],
            vec![],
        );
        let window = TipsetWindow {
            cur: tipsets[1].clone(),
            prev: tipsets[0].clone(),
            cur_state,
            prev_state,
        };
        let registry = ActorRegistry::new();
        let ctx = ExtractContext {
            api: &chain,
            registry: &registry,
            network: NetworkChain::Mainnet,
        };
        assert!(messages::extract_messages(ctx, &window).await.is_err());
    }
}
