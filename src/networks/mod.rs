// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::shim::clock::ChainEpoch;

pub mod mainnet {
    use crate::shim::clock::ChainEpoch;

    pub const SMOKE_HEIGHT: ChainEpoch = 51000;
}

pub mod calibnet {
    use crate::shim::clock::ChainEpoch;

    pub const SMOKE_HEIGHT: ChainEpoch = -2;
}

pub mod butterflynet {
    use crate::shim::clock::ChainEpoch;

    pub const SMOKE_HEIGHT: ChainEpoch = -2;
}

pub mod devnet {
    use crate::shim::clock::ChainEpoch;

    pub const SMOKE_HEIGHT: ChainEpoch = -2;
}

/// Builtin `filecoin` network chains the indexer knows upgrade heights for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkChain {
    #[default]
    Mainnet,
    Calibnet,
    Butterflynet,
    Devnet,
}

impl FromStr for NetworkChain {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(NetworkChain::Mainnet),
            "calibnet" | "calibrationnet" => Ok(NetworkChain::Calibnet),
            "butterflynet" => Ok(NetworkChain::Butterflynet),
            "devnet" => Ok(NetworkChain::Devnet),
            name => anyhow::bail!("unknown network: {name}"),
        }
    }
}

impl Display for NetworkChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkChain::Mainnet => write!(f, "mainnet"),
            NetworkChain::Calibnet => write!(f, "calibnet"),
            NetworkChain::Butterflynet => write!(f, "butterflynet"),
            NetworkChain::Devnet => write!(f, "devnet"),
        }
    }
}

impl NetworkChain {
    /// Epoch of the Smoke upgrade, which dropped the packing efficiency
    /// factor from the base fee computation.
    pub fn smoke_height(&self) -> ChainEpoch {
        match self {
            NetworkChain::Mainnet => mainnet::SMOKE_HEIGHT,
            NetworkChain::Calibnet => calibnet::SMOKE_HEIGHT,
            NetworkChain::Butterflynet => butterflynet::SMOKE_HEIGHT,
            NetworkChain::Devnet => devnet::SMOKE_HEIGHT,
        }
    }

    pub fn is_testnet(&self) -> bool {
        !matches!(self, NetworkChain::Mainnet)
    }
}
