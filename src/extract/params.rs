// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Human readable rendering of message parameters.
//!
//! Parameters are decoded generically: the `dag-cbor` payload is read into
//! IPLD and written out as JSON. Byte strings become base64 strings, links
//! become `{"/": "<cid>"}` and integers outside the `i64`/`u64` range become
//! decimal strings.

use std::panic::{AssertUnwindSafe, catch_unwind};

use base64::{Engine as _, prelude::BASE64_STANDARD};
use ipld_core::ipld::Ipld;
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::shim::actors::{ActorType, methods::method_name};
use crate::shim::message::{Message, MethodNum};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("method {method} is not exported by {actor}")]
    UnknownMethod { actor: String, method: MethodNum },
    #[error("invalid cbor parameters: {0}")]
    Cbor(String),
    #[error("failed to render parameters as json: {0}")]
    Json(#[from] serde_json::Error),
    /// The decoder panicked.
    #[error("internal decoder error: {0}")]
    Internal(String),
}

/// A message's method name and its parameters rendered as JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedParams {
    pub method: String,
    pub params: Option<String>,
}

/// The actor a message is sent to, as far as it is known.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Destination {
    pub kind: Option<ActorType>,
    /// Actors version of the destination's code. `None` picks the newest
    /// known methods.
    pub version: Option<u32>,
}

/// Names `method` of `to` and renders `params`. Empty parameters render as
/// `None`.
pub fn decode_params(
    params: &[u8],
    method: MethodNum,
    to: Destination,
) -> Result<ParsedParams, DecodeError> {
    let name = to
        .kind
        .and_then(|kind| method_name(kind, to.version, method))
        .ok_or_else(|| DecodeError::UnknownMethod {
            actor: actor_label(to.kind),
            method,
        })?;
    Ok(ParsedParams {
        method: name.into(),
        params: render_params(params)?,
    })
}

/// Renders a `dag-cbor` payload as JSON, `None` when it is empty.
pub fn render_params(params: &[u8]) -> Result<Option<String>, DecodeError> {
    if params.is_empty() {
        return Ok(None);
    }
    cbor_to_json(params).map(Some)
}

/// Renders any `dag-cbor` object as JSON.
pub fn cbor_to_json(bytes: &[u8]) -> Result<String, DecodeError> {
    let ipld: Ipld =
        serde_ipld_dagcbor::from_slice(bytes).map_err(|e| DecodeError::Cbor(e.to_string()))?;
    Ok(serde_json::to_string(&IpldJsonRef(&ipld))?)
}

/// Like [`decode_params`], but never fails. A method that cannot be named is
/// called `<actor>.<method>`, and its parameters are still rendered when they
/// are well-formed. Parameters that fail to decode are dropped.
pub fn parse_params(message: &Message, to: Destination) -> ParsedParams {
    let method = message.method_num;
    let params = message.params.bytes();
    let numbered = || format!("{}.{method}", actor_label(to.kind));
    match guarded(|| decode_params(params, method, to)) {
        Ok(parsed) => parsed,
        Err(DecodeError::UnknownMethod { .. }) => {
            let params = guarded(|| render_params(params)).unwrap_or_else(|e| {
                warn!(
                    "failed to parse parameters of message from {} to {}: {e}",
                    message.from, message.to
                );
                None
            });
            ParsedParams {
                method: numbered(),
                params,
            }
        }
        Err(e) => {
            warn!(
                "failed to parse parameters of message from {} to {}: {e}",
                message.from, message.to
            );
            ParsedParams {
                method: numbered(),
                params: None,
            }
        }
    }
}

/// Runs `decode`, turning a panic into [`DecodeError::Internal`].
fn guarded<T>(decode: impl FnOnce() -> Result<T, DecodeError>) -> Result<T, DecodeError> {
    catch_unwind(AssertUnwindSafe(decode)).unwrap_or_else(|panic| {
        let msg = panic
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".into());
        Err(DecodeError::Internal(msg))
    })
}

fn actor_label(actor: Option<ActorType>) -> String {
    actor.map_or_else(|| "unknown".into(), |actor| actor.to_string())
}

struct IpldJsonRef<'a>(&'a Ipld);

impl Serialize for IpldJsonRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Ipld::Null => serializer.serialize_none(),
            Ipld::Bool(b) => serializer.serialize_bool(*b),
            Ipld::Integer(i) => {
                if let Ok(i) = i64::try_from(*i) {
                    serializer.serialize_i64(i)
                } else if let Ok(u) = u64::try_from(*i) {
                    serializer.serialize_u64(u)
                } else {
                    serializer.serialize_str(&i.to_string())
                }
            }
            Ipld::Float(f) => serializer.serialize_f64(*f),
            Ipld::String(s) => serializer.serialize_str(s),
            Ipld::Bytes(bytes) => serializer.serialize_str(&BASE64_STANDARD.encode(bytes)),
            Ipld::List(list) => serializer.collect_seq(list.iter().map(IpldJsonRef)),
            Ipld::Map(map) => {
                serializer.collect_map(map.iter().map(|(key, ipld)| (key, IpldJsonRef(ipld))))
            }
            Ipld::Link(cid) => serializer.collect_map([("/", cid.to_string())]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{dummy_cid, message};
    use fvm_ipld_encoding::{BytesSer, RawBytes, to_vec};

    fn to(kind: ActorType, version: u32) -> Destination {
        Destination {
            kind: Some(kind),
            version: Some(version),
        }
    }

    #[test]
    fn known_method_without_params() {
        let parsed = decode_params(&[], 0, to(ActorType::Account, 8)).unwrap();
        assert_eq!(
            parsed,
            ParsedParams {
                method: "Send".into(),
                params: None
            }
        );
    }

    #[test]
    fn params_render_as_json() {
        let cid = dummy_cid(1);
        let bytes = to_vec(&(7u64, BytesSer(&[1, 2, 3]), cid, "label")).unwrap();
        let parsed = decode_params(&bytes, 4, to(ActorType::Market, 8)).unwrap();
        assert_eq!(parsed.method, "PublishStorageDeals");
        let json: serde_json::Value =
            serde_json::from_str(parsed.params.as_deref().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([7, "AQID", { "/": cid.to_string() }, "label"])
        );
    }

    #[test]
    fn hashed_exports_are_named() {
        let mut msg = message(1, 2, 0);
        msg.method_num = fil_actor_evm_state::v17::Method::InvokeContract as MethodNum;
        msg.params = RawBytes::new(to_vec(&BytesSer(&[0xde, 0xad])).unwrap());
        let parsed = parse_params(&msg, to(ActorType::Evm, 16));
        assert_eq!(parsed.method, "InvokeContract");
        assert_eq!(parsed.params.as_deref(), Some(r#""3q0=""#));
    }

    #[test]
    fn undecodable_params_fall_back_to_numbered_method() {
        let mut msg = message(1, 2, 0);
        msg.method_num = 6;
        msg.params = RawBytes::new(vec![0xff, 0x00]);
        let parsed = parse_params(&msg, to(ActorType::Miner, 8));
        assert_eq!(parsed.method, "storageminer.6");
        assert_eq!(parsed.params, None);
    }

    #[test]
    fn unknown_methods_keep_well_formed_params() {
        assert!(matches!(
            decode_params(&[], 999, to(ActorType::Power, 8)),
            Err(DecodeError::UnknownMethod { .. })
        ));

        let mut msg = message(1, 4, 0);
        msg.method_num = 999;
        msg.params = RawBytes::new(to_vec(&(7u64, "hello")).unwrap());
        assert_eq!(
            parse_params(&msg, to(ActorType::Power, 8)),
            ParsedParams {
                method: "storagepower.999".into(),
                params: Some(r#"[7,"hello"]"#.into()),
            }
        );

        msg.method_num = 2;
        assert_eq!(
            parse_params(&msg, Destination::default()),
            ParsedParams {
                method: "unknown.2".into(),
                params: Some(r#"[7,"hello"]"#.into()),
            }
        );

        msg.params = RawBytes::new(vec![0xff]);
        assert_eq!(parse_params(&msg, Destination::default()).params, None);
    }

    #[test]
    fn panics_become_internal_errors() {
        let result: Result<(), _> = guarded(|| panic!("boom"));
        match result {
            Err(DecodeError::Internal(msg)) => assert_eq!(msg, "boom"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
