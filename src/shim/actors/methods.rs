// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Exported method names of the builtin actors, by actors version.
//!
//! Names are taken from the `Method` enums of the actor state crates, so
//! FRC-42 hashed exports (`InvokeContract`, `TransferExported`, ...) are named
//! as well as the numbered ones.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use ahash::HashMap;

use super::registry::ActorType;

/// Method number indicator for calling actor methods.
pub type MethodNum = u64;

pub const METHOD_SEND: MethodNum = 0;

static METHODS: LazyLock<MethodRegistry> = LazyLock::new(MethodRegistry::builtin);

/// Method names of one actor kind at one actors version.
type MethodTable = HashMap<MethodNum, &'static str>;

/// Registers `Method::<name>` of `$state_version` under its variant name.
macro_rules! register_methods {
    ($registry:expr, $kind:expr, $version:literal, $state_version:path, [$($method:ident),+ $(,)?]) => {{
        use $state_version::Method;
        $(
            $registry.register($kind, $version, Method::$method as MethodNum, stringify!($method));
        )+
    }};
}

macro_rules! register_miner_basic_methods {
    ($registry:expr, $version:literal, $state_version:path) => {
        register_methods!(
            $registry,
            ActorType::Miner,
            $version,
            $state_version,
            [
                Constructor,
                ControlAddresses,
                ChangeWorkerAddress,
                ChangePeerID,
                SubmitWindowedPoSt,
                ExtendSectorExpiration,
                TerminateSectors,
                DeclareFaults,
                DeclareFaultsRecovered,
                OnDeferredCronEvent,
                CheckSectorProven,
                ApplyRewards,
                ReportConsensusFault,
                WithdrawBalance,
                ChangeMultiaddrs,
                CompactPartitions,
                CompactSectorNumbers,
                RepayDebt,
                DisputeWindowedPoSt,
                ProveCommitAggregate,
                ProveReplicaUpdates,
            ]
        )
    };
}

macro_rules! register_miner_methods_v10_onwards {
    ($registry:expr, $version:literal, $state_version:path) => {{
        register_miner_basic_methods!($registry, $version, $state_version);
        register_methods!(
            $registry,
            ActorType::Miner,
            $version,
            $state_version,
            [
                PreCommitSectorBatch2,
                ChangeBeneficiary,
                ExtendSectorExpiration2,
                ChangePeerIDExported,
                WithdrawBalanceExported,
                ChangeMultiaddrsExported,
                ChangeBeneficiaryExported,
                IsControllingAddressExported,
                ChangeWorkerAddressExported,
                GetBeneficiary,
                ConfirmChangeWorkerAddress,
                ConfirmChangeWorkerAddressExported,
                RepayDebtExported,
                GetBeneficiaryExported,
                GetOwnerExported,
                GetSectorSizeExported,
                GetAvailableBalanceExported,
                GetVestingFundsExported,
                GetPeerIDExported,
                GetMultiaddrsExported,
                ChangeOwnerAddress,
                ChangeOwnerAddressExported,
            ]
        );
    }};
}

macro_rules! register_market_methods_v10_onwards {
    ($registry:expr, $version:literal, $state_version:path) => {
        register_methods!(
            $registry,
            ActorType::Market,
            $version,
            $state_version,
            [
                Constructor,
                AddBalance,
                WithdrawBalance,
                PublishStorageDeals,
                VerifyDealsForActivation,
                OnMinerSectorsTerminate,
                CronTick,
                AddBalanceExported,
                WithdrawBalanceExported,
                PublishStorageDealsExported,
                GetBalanceExported,
                GetDealDataCommitmentExported,
                GetDealClientExported,
                GetDealProviderExported,
                GetDealLabelExported,
                GetDealTermExported,
                GetDealTotalPriceExported,
                GetDealClientCollateralExported,
                GetDealProviderCollateralExported,
                GetDealVerifiedExported,
                GetDealActivationExported,
            ]
        )
    };
}

macro_rules! register_verifreg_core_methods {
    ($registry:expr, $version:literal, $state_version:path) => {
        register_methods!(
            $registry,
            ActorType::VerifiedRegistry,
            $version,
            $state_version,
            [
                Constructor,
                AddVerifier,
                RemoveVerifier,
                AddVerifiedClient,
                RemoveVerifiedClientDataCap,
            ]
        )
    };
}

macro_rules! register_datacap_exported_methods {
    ($registry:expr, $version:literal, $state_version:path) => {
        register_methods!(
            $registry,
            ActorType::DataCap,
            $version,
            $state_version,
            [
                Constructor,
                BalanceExported,
                MintExported,
                DestroyExported,
                TransferExported,
                TransferFromExported,
                IncreaseAllowanceExported,
                DecreaseAllowanceExported,
                RevokeAllowanceExported,
                BurnExported,
                BurnFromExported,
                AllowanceExported,
                NameExported,
                SymbolExported,
                TotalSupplyExported,
                GranularityExported,
            ]
        )
    };
}

/// Method names of every builtin actor kind, per actors version.
///
/// Only versions whose method set changed are registered. A lookup uses the
/// closest registered version at or below the requested one, or the oldest
/// registered table for versions that predate it.
#[derive(Debug, Default)]
pub struct MethodRegistry {
    tables: HashMap<ActorType, BTreeMap<u32, MethodTable>>,
}

impl MethodRegistry {
    fn register(&mut self, kind: ActorType, version: u32, method: MethodNum, name: &'static str) {
        self.tables
            .entry(kind)
            .or_default()
            .entry(version)
            .or_default()
            .insert(method, name);
    }

    fn builtin() -> Self {
        let mut registry = Self::default();
        registry.register_account();
        registry.register_init_cron_reward();
        registry.register_power();
        registry.register_market();
        registry.register_miner();
        registry.register_multisig_paych();
        registry.register_verifreg();
        registry.register_datacap();
        registry.register_fevm();
        registry
    }

    fn register_account(&mut self) {
        register_methods!(
            self,
            ActorType::Account,
            8,
            fil_actor_account_state::v8,
            [Constructor, PubkeyAddress]
        );
        register_methods!(
            self,
            ActorType::Account,
            11,
            fil_actor_account_state::v11,
            [Constructor, PubkeyAddress, AuthenticateMessageExported]
        );
        register_methods!(
            self,
            ActorType::Account,
            16,
            fil_actor_account_state::v16,
            [Constructor, PubkeyAddress, AuthenticateMessageExported]
        );
    }

    fn register_init_cron_reward(&mut self) {
        register_methods!(
            self,
            ActorType::Init,
            8,
            fil_actor_init_state::v8,
            [Constructor, Exec]
        );
        register_methods!(
            self,
            ActorType::Init,
            11,
            fil_actor_init_state::v11,
            [Constructor, Exec, Exec4]
        );
        register_methods!(
            self,
            ActorType::Cron,
            8,
            fil_actor_cron_state::v8,
            [Constructor, EpochTick]
        );
        register_methods!(
            self,
            ActorType::Reward,
            8,
            fil_actor_reward_state::v8,
            [
                Constructor,
                AwardBlockReward,
                ThisEpochReward,
                UpdateNetworkKPI
            ]
        );
    }

    fn register_power(&mut self) {
        register_methods!(
            self,
            ActorType::Power,
            8,
            fil_actor_power_state::v8,
            [
                Constructor,
                CreateMiner,
                UpdateClaimedPower,
                EnrollCronEvent,
                OnEpochTickEnd,
                UpdatePledgeTotal,
                SubmitPoRepForBulkVerify,
                CurrentTotalPower,
            ]
        );
        register_methods!(
            self,
            ActorType::Power,
            17,
            fil_actor_power_state::v17,
            [
                Constructor,
                CreateMiner,
                UpdateClaimedPower,
                EnrollCronEvent,
                OnEpochTickEnd,
                UpdatePledgeTotal,
                CurrentTotalPower,
                CreateMinerExported,
                NetworkRawPowerExported,
                MinerRawPowerExported,
                MinerCountExported,
                MinerConsensusCountExported,
                MinerPowerExported,
            ]
        );
    }

    fn register_market(&mut self) {
        register_methods!(
            self,
            ActorType::Market,
            8,
            fil_actor_market_state::v8,
            [
                Constructor,
                AddBalance,
                WithdrawBalance,
                PublishStorageDeals,
                VerifyDealsForActivation,
                ActivateDeals,
                OnMinerSectorsTerminate,
                ComputeDataCommitment,
                CronTick,
            ]
        );

        register_market_methods_v10_onwards!(self, 10, fil_actor_market_state::v10);
        register_methods!(
            self,
            ActorType::Market,
            10,
            fil_actor_market_state::v10,
            [ActivateDeals, ComputeDataCommitment]
        );

        register_market_methods_v10_onwards!(self, 12, fil_actor_market_state::v12);
        register_methods!(
            self,
            ActorType::Market,
            12,
            fil_actor_market_state::v12,
            [BatchActivateDeals]
        );

        register_market_methods_v10_onwards!(self, 13, fil_actor_market_state::v13);
        register_methods!(
            self,
            ActorType::Market,
            13,
            fil_actor_market_state::v13,
            [
                BatchActivateDeals,
                GetDealSectorExported,
                SettleDealPaymentsExported,
                SectorContentChangedExported,
            ]
        );
    }

    fn register_miner(&mut self) {
        register_miner_basic_methods!(self, 8, fil_actor_miner_state::v8);
        register_methods!(
            self,
            ActorType::Miner,
            8,
            fil_actor_miner_state::v8,
            [
                ChangeOwnerAddress,
                PreCommitSector,
                ProveCommitSector,
                PreCommitSectorBatch,
                ConfirmSectorProofsValid,
                ConfirmUpdateWorkerKey,
            ]
        );

        register_miner_basic_methods!(self, 9, fil_actor_miner_state::v9);
        register_methods!(
            self,
            ActorType::Miner,
            9,
            fil_actor_miner_state::v9,
            [
                PreCommitSector,
                ProveCommitSector,
                PreCommitSectorBatch,
                PreCommitSectorBatch2,
                ChangeOwnerAddress,
                ProveReplicaUpdates2,
                ChangeBeneficiary,
                ExtendSectorExpiration2,
                ConfirmSectorProofsValid,
                GetBeneficiary,
                ConfirmUpdateWorkerKey,
            ]
        );

        register_miner_methods_v10_onwards!(self, 10, fil_actor_miner_state::v10);
        register_methods!(
            self,
            ActorType::Miner,
            10,
            fil_actor_miner_state::v10,
            [
                PreCommitSector,
                ProveReplicaUpdates2,
                ProveCommitSector,
                PreCommitSectorBatch,
                ConfirmSectorProofsValid,
            ]
        );

        register_miner_methods_v10_onwards!(self, 13, fil_actor_miner_state::v13);
        register_methods!(
            self,
            ActorType::Miner,
            13,
            fil_actor_miner_state::v13,
            [
                ProveCommitSector,
                ProveCommitSectors3,
                ConfirmSectorProofsValid
            ]
        );

        register_miner_methods_v10_onwards!(self, 14, fil_actor_miner_state::v14);
        register_methods!(
            self,
            ActorType::Miner,
            14,
            fil_actor_miner_state::v14,
            [
                ProveCommitSectors3,
                ProveReplicaUpdates3,
                ProveCommitSectorsNI
            ]
        );

        register_miner_methods_v10_onwards!(self, 16, fil_actor_miner_state::v16);
        register_methods!(
            self,
            ActorType::Miner,
            16,
            fil_actor_miner_state::v16,
            [
                ProveCommitSectors3,
                ProveReplicaUpdates3,
                ProveCommitSectorsNI,
                InternalSectorSetupForPreseal,
                MaxTerminationFeeExported,
                InitialPledgeExported,
            ]
        );
    }

    fn register_multisig_paych(&mut self) {
        register_methods!(
            self,
            ActorType::Multisig,
            8,
            fil_actor_multisig_state::v8,
            [
                Constructor,
                Propose,
                Approve,
                Cancel,
                AddSigner,
                RemoveSigner,
                SwapSigner,
                ChangeNumApprovalsThreshold,
                LockBalance,
            ]
        );
        register_methods!(
            self,
            ActorType::Multisig,
            9,
            fil_actor_multisig_state::v9,
            [
                Constructor,
                Propose,
                Approve,
                Cancel,
                AddSigner,
                RemoveSigner,
                SwapSigner,
                ChangeNumApprovalsThreshold,
                LockBalance,
                UniversalReceiverHook,
            ]
        );
        register_methods!(
            self,
            ActorType::PaymentChannel,
            8,
            fil_actor_paych_state::v8,
            [Constructor, UpdateChannelState, Settle, Collect]
        );
    }

    fn register_verifreg(&mut self) {
        register_verifreg_core_methods!(self, 8, fil_actor_verifreg_state::v8);
        register_methods!(
            self,
            ActorType::VerifiedRegistry,
            8,
            fil_actor_verifreg_state::v8,
            [UseBytes, RestoreBytes]
        );

        register_verifreg_core_methods!(self, 9, fil_actor_verifreg_state::v9);
        register_methods!(
            self,
            ActorType::VerifiedRegistry,
            9,
            fil_actor_verifreg_state::v9,
            [
                RemoveExpiredAllocations,
                ClaimAllocations,
                GetClaims,
                ExtendClaimTerms,
                RemoveExpiredClaims,
                UniversalReceiverHook,
            ]
        );

        register_verifreg_core_methods!(self, 10, fil_actor_verifreg_state::v10);
        register_methods!(
            self,
            ActorType::VerifiedRegistry,
            10,
            fil_actor_verifreg_state::v10,
            [
                RemoveExpiredAllocations,
                GetClaims,
                ExtendClaimTerms,
                RemoveExpiredClaims,
                AddVerifiedClientExported,
                RemoveExpiredAllocationsExported,
                GetClaimsExported,
                ExtendClaimTermsExported,
                RemoveExpiredClaimsExported,
                UniversalReceiverHook,
            ]
        );

        register_verifreg_core_methods!(self, 12, fil_actor_verifreg_state::v12);
        register_methods!(
            self,
            ActorType::VerifiedRegistry,
            12,
            fil_actor_verifreg_state::v12,
            [
                RemoveExpiredAllocations,
                ClaimAllocations,
                GetClaims,
                ExtendClaimTerms,
                RemoveExpiredClaims,
                AddVerifiedClientExported,
                RemoveExpiredAllocationsExported,
                GetClaimsExported,
                ExtendClaimTermsExported,
                RemoveExpiredClaimsExported,
                UniversalReceiverHook,
            ]
        );
    }

    fn register_datacap(&mut self) {
        register_methods!(
            self,
            ActorType::DataCap,
            9,
            fil_actor_datacap_state::v9,
            [
                Constructor,
                BalanceOf,
                Mint,
                Destroy,
                Transfer,
                TransferFrom,
                IncreaseAllowance,
                DecreaseAllowance,
                RevokeAllowance,
                Burn,
                BurnFrom,
                Allowance,
                Name,
                Symbol,
                TotalSupply,
            ]
        );
        register_datacap_exported_methods!(self, 10, fil_actor_datacap_state::v10);
        register_datacap_exported_methods!(self, 16, fil_actor_datacap_state::v16);
    }

    fn register_fevm(&mut self) {
        register_methods!(
            self,
            ActorType::Evm,
            17,
            fil_actor_evm_state::v17,
            [
                Constructor,
                Resurrect,
                GetBytecode,
                GetBytecodeHash,
                GetStorageAt,
                InvokeContractDelegate,
                InvokeContract,
            ]
        );
        register_methods!(
            self,
            ActorType::Eam,
            16,
            fil_actor_eam_state::v16,
            [Constructor, Create, Create2, CreateExternal]
        );
        register_methods!(
            self,
            ActorType::EthAccount,
            17,
            fil_actor_ethaccount_state::v17,
            [Constructor]
        );
    }

    fn table(&self, kind: ActorType, version: Option<u32>) -> Option<&MethodTable> {
        let tables = self.tables.get(&kind)?;
        let closest = match version {
            Some(version) => tables.range(..=version).next_back(),
            None => tables.last_key_value(),
        };
        closest
            .or_else(|| tables.first_key_value())
            .map(|(_, table)| table)
    }

    /// Name of `method` on `kind`, if it is one of the actor's exports at
    /// `version`. An unknown version uses the newest registered methods.
    pub fn method_name(
        &self,
        kind: ActorType,
        version: Option<u32>,
        method: MethodNum,
    ) -> Option<&'static str> {
        if method == METHOD_SEND {
            return Some("Send");
        }
        self.table(kind, version)?.get(&method).copied()
    }
}

/// Looks `method` up in the builtin method registry.
pub fn method_name(kind: ActorType, version: Option<u32>, method: MethodNum) -> Option<&'static str> {
    METHODS.method_name(kind, version, method)
}
