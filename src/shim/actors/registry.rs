// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::str::FromStr;

use ahash::HashMap;
use anyhow::Context as _;
use cid::Cid;
use cid::multihash::Multihash;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Multicodec of raw binary content.
const IPLD_RAW: u64 = 0x55;
/// Multihash code of the identity "hash".
const IDENTITY_HASH: u64 = 0x00;

/// Builtin actor kinds, named as they appear in actor code names
/// (`fil/<version>/<name>`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum ActorType {
    #[strum(serialize = "system")]
    System,
    #[strum(serialize = "init")]
    Init,
    #[strum(serialize = "cron")]
    Cron,
    #[strum(serialize = "account")]
    Account,
    #[strum(serialize = "storagepower")]
    Power,
    #[strum(serialize = "storageminer")]
    Miner,
    #[strum(serialize = "storagemarket")]
    Market,
    #[strum(serialize = "paymentchannel")]
    PaymentChannel,
    #[strum(serialize = "multisig")]
    Multisig,
    #[strum(serialize = "reward")]
    Reward,
    #[strum(serialize = "verifiedregistry")]
    VerifiedRegistry,
    #[strum(serialize = "datacap")]
    DataCap,
    #[strum(serialize = "placeholder")]
    Placeholder,
    #[strum(serialize = "evm")]
    Evm,
    #[strum(serialize = "eam")]
    Eam,
    #[strum(serialize = "ethaccount")]
    EthAccount,
}

/// A recognised actor code: the actor kind and the actors version it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BuiltinActor {
    pub version: u32,
    pub kind: ActorType,
}

impl BuiltinActor {
    pub fn name(&self) -> String {
        format!("fil/{}/{}", self.version, self.kind)
    }
}

impl FromStr for BuiltinActor {
    type Err = anyhow::Error;

    /// Parses `fil/<version>/<name>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '/');
        let (Some("fil"), Some(version), Some(name)) = (parts.next(), parts.next(), parts.next())
        else {
            anyhow::bail!("malformed actor name: {s}");
        };
        Ok(Self {
            version: version
                .parse()
                .with_context(|| format!("invalid actors version in {s}"))?,
            kind: ActorType::from_str(name)
                .with_context(|| format!("unknown actor kind in {s}"))?,
        })
    }
}

/// Code CID of a builtin actor that predates actor bundles: the identity
/// multihash of its name.
pub fn builtin_code(version: u32, kind: ActorType) -> Cid {
    let name = BuiltinActor { version, kind }.name();
    // names are far below the 64-byte multihash capacity
    let hash = Multihash::<64>::wrap(IDENTITY_HASH, name.as_bytes())
        .expect("builtin actor names fit in an identity multihash");
    Cid::new_v1(IPLD_RAW, hash)
}

/// Resolves actor code CIDs to actor kinds.
///
/// Identity-hashed codes are decoded from their digest. Codes from actor
/// bundles are opaque and must be registered from the network's manifest.
#[derive(Clone, Debug, Default)]
pub struct ActorRegistry {
    manifest: HashMap<Cid, BuiltinActor>,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers bundle codes given as `(code CID, "fil/<version>/<name>")`.
    pub fn with_manifest<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> anyhow::Result<Self> {
        let mut manifest = HashMap::default();
        for (code, name) in entries {
            let code = Cid::from_str(code).with_context(|| format!("invalid code CID {code}"))?;
            manifest.insert(code, name.parse()?);
        }
        Ok(Self { manifest })
    }

    pub fn resolve(&self, code: &Cid) -> Option<BuiltinActor> {
        if let Some(actor) = self.manifest.get(code) {
            return Some(*actor);
        }
        if code.hash().code() != IDENTITY_HASH {
            return None;
        }
        std::str::from_utf8(code.hash().digest())
            .ok()
            .and_then(|name| name.parse().ok())
    }

    pub fn actor_type(&self, code: &Cid) -> Option<ActorType> {
        self.resolve(code).map(|actor| actor.kind)
    }

    /// Human readable code name, falling back to the CID itself.
    pub fn actor_name(&self, code: &Cid) -> String {
        match self.resolve(code) {
            Some(actor) => actor.name(),
            None => code.to_string(),
        }
    }
}
