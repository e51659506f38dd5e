// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;
use fvm_ipld_encoding::tuple::*;

use crate::shim::{
    crypto::{Signature, SignatureType},
    message::Message,
};
use crate::utils::cid::CidCborExt as _;

/// Represents a wrapped message with signature bytes.
#[derive(PartialEq, Clone, Debug, Serialize_tuple, Deserialize_tuple, Eq)]
pub struct SignedMessage {
    pub message: Message,
    pub signature: Signature,
}

impl SignedMessage {
    pub fn new_unchecked(message: Message, signature: Signature) -> SignedMessage {
        SignedMessage { message, signature }
    }

    /// Returns reference to the unsigned message.
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Consumes self and returns it's unsigned message.
    pub fn into_message(self) -> Message {
        self.message
    }

    /// Checks if the signed message is a BLS message.
    pub fn is_bls(&self) -> bool {
        self.signature.signature_type() == SignatureType::BLS
    }

    /// BLS messages are identified by their unsigned message, all others by
    /// the signed envelope.
    pub fn cid(&self) -> anyhow::Result<Cid> {
        if self.is_bls() {
            super::message_cid(&self.message)
        } else {
            Ok(Cid::from_cbor_blake2b256(self)?)
        }
    }
}
