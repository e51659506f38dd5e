// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod signed_message;

use cid::Cid;

use crate::shim::message::Message;
use crate::utils::cid::cid_of_encoded;
pub use signed_message::SignedMessage;

/// CID of an unsigned message: `blake2b-256` over its canonical `dag-cbor`
/// encoding.
pub fn message_cid(message: &Message) -> anyhow::Result<Cid> {
    Ok(cid_of_encoded(&fvm_ipld_encoding::to_vec(message)?))
}

/// Length in bytes of the canonical encoding of an unsigned message.
pub fn message_size(message: &Message) -> anyhow::Result<usize> {
    Ok(fvm_ipld_encoding::to_vec(message)?.len())
}

/// A message as included in a block, either BLS-aggregated (stored unsigned)
/// or carrying its own signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainMessage {
    Unsigned(Message),
    Signed(SignedMessage),
}

impl ChainMessage {
    pub fn message(&self) -> &Message {
        match self {
            Self::Unsigned(m) => m,
            Self::Signed(sm) => sm.message(),
        }
    }

    pub fn cid(&self) -> anyhow::Result<Cid> {
        match self {
            Self::Unsigned(m) => message_cid(m),
            Self::Signed(sm) => sm.cid(),
        }
    }
}

/// Messages included in one block.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockMessages {
    pub bls_messages: Vec<Message>,
    pub secp_messages: Vec<SignedMessage>,
}

impl BlockMessages {
    /// BLS messages first, then secp messages, the order the node applies
    /// them in.
    pub fn into_chain_messages(self) -> impl Iterator<Item = ChainMessage> {
        self.bls_messages
            .into_iter()
            .map(ChainMessage::Unsigned)
            .chain(self.secp_messages.into_iter().map(ChainMessage::Signed))
    }

    pub fn len(&self) -> usize {
        self.bls_messages.len() + self.secp_messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A message applied on top of a block's parent state, paired with the CID
/// it was recorded under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentMessage {
    pub cid: Cid,
    pub message: Message,
}
