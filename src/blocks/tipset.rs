// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;

use cid::Cid;
use itertools::Itertools as _;

use super::{BlockHeader, Error};
use crate::shim::{clock::ChainEpoch, econ::TokenAmount};

/// A set of CIDs forming a unique key for a tipset.
/// Equal keys will have equivalent iteration order, but note that the CIDs are
/// *not* maintained in the same order as the canonical iteration order of
/// blocks in a tipset (which is by ticket)
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TipsetKey(Vec<Cid>);

impl TipsetKey {
    pub fn cids(&self) -> &[Cid] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Cid>> for TipsetKey {
    fn from(cids: Vec<Cid>) -> Self {
        Self(cids)
    }
}

impl FromIterator<Cid> for TipsetKey {
    fn from_iter<T: IntoIterator<Item = Cid>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for TipsetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

/// An immutable set of blocks at the same height with the same parent set.
/// Blocks in a tipset are canonically ordered by ticket size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tipset {
    headers: Vec<BlockHeader>,
    key: TipsetKey,
}

impl Tipset {
    /// Builds a new tipset from a collection of headers. The headers must all
    /// share the epoch, the parents and the parent state root.
    pub fn new(headers: Vec<BlockHeader>) -> Result<Self, Error> {
        let first = headers.first().ok_or(Error::NoBlocks)?;
        for header in &headers[1..] {
            if header.epoch != first.epoch {
                return Err(Error::InvalidTipset(format!(
                    "epoch mismatch: {} != {}",
                    header.epoch, first.epoch
                )));
            }
            if header.parents != first.parents {
                return Err(Error::InvalidTipset(format!(
                    "parent mismatch: {} != {}",
                    header.parents, first.parents
                )));
            }
            if header.state_root != first.state_root {
                return Err(Error::InvalidTipset(format!(
                    "state root mismatch: {} != {}",
                    header.state_root, first.state_root
                )));
            }
        }
        let key = headers.iter().map(|h| h.cid).collect();
        Ok(Self { headers, key })
    }

    pub fn epoch(&self) -> ChainEpoch {
        self.min_ticket_block().epoch
    }

    pub fn key(&self) -> &TipsetKey {
        &self.key
    }

    pub fn cids(&self) -> &[Cid] {
        self.key.cids()
    }

    pub fn parents(&self) -> &TipsetKey {
        &self.min_ticket_block().parents
    }

    /// State root the blocks of this tipset were built on.
    pub fn parent_state(&self) -> &Cid {
        &self.min_ticket_block().state_root
    }

    pub fn parent_base_fee(&self) -> &TokenAmount {
        &self.min_ticket_block().parent_base_fee
    }

    pub fn block_headers(&self) -> &[BlockHeader] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// The first block of the tipset. Never panics: construction rejects
    /// empty tipsets.
    pub fn min_ticket_block(&self) -> &BlockHeader {
        &self.headers[0]
    }
}
