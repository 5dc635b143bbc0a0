//! Login (0x01) — Client → Server.

use bytes::Buf;

use crate::codec::Decode;
use crate::error::ProtoError;
use crate::types::VarUInt32;

/// Login packet: protocol version plus the two JWT payloads.
///
/// Wire format:
/// ```text
/// i32_be:     protocol_version
/// VarUInt32:  payload length
///   i32_le:   chain JSON length
///   bytes:    chain JSON ({"chain": ["jwt", ...]})
///   i32_le:   client data length
///   bytes:    client data JWT
/// ```
#[derive(Debug, Clone)]
pub struct LoginPacket {
    pub protocol_version: i32,
    /// JWT strings of the identity chain, in order.
    pub chain: Vec<String>,
    /// Raw client data JWT (skin, device info).
    pub client_data_jwt: String,
}

impl Decode for LoginPacket {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        if buf.remaining() < 4 {
            return Err(ProtoError::BufferTooShort {
                needed: 4,
                remaining: buf.remaining(),
            });
        }
        let protocol_version = buf.get_i32();

        let payload_length = VarUInt32::decode(buf)?.0 as usize;
        if buf.remaining() < payload_length {
            return Err(ProtoError::BufferTooShort {
                needed: payload_length,
                remaining: buf.remaining(),
            });
        }

        let chain_bytes = read_i32_prefixed(buf)?;
        let chain = parse_chain_json(&chain_bytes)?;

        let client_bytes = read_i32_prefixed(buf)?;
        let client_data_jwt =
            String::from_utf8(client_bytes).map_err(|_| ProtoError::InvalidUtf8)?;

        Ok(Self {
            protocol_version,
            chain,
            client_data_jwt,
        })
    }
}

fn read_i32_prefixed(buf: &mut impl Buf) -> Result<Vec<u8>, ProtoError> {
    if buf.remaining() < 4 {
        return Err(ProtoError::BufferTooShort {
            needed: 4,
            remaining: buf.remaining(),
        });
    }
    let length = buf.get_i32_le();
    if length < 0 {
        return Err(ProtoError::InvalidLogin(format!(
            "negative login segment length: {length}"
        )));
    }
    let length = length as usize;
    if buf.remaining() < length {
        return Err(ProtoError::BufferTooShort {
            needed: length,
            remaining: buf.remaining(),
        });
    }
    Ok(buf.copy_to_bytes(length).to_vec())
}

/// Parse the chain envelope: `{"chain": ["jwt1", "jwt2", ...]}`.
fn parse_chain_json(data: &[u8]) -> Result<Vec<String>, ProtoError> {
    let value: serde_json::Value =
        serde_json::from_slice(data).map_err(|e| ProtoError::JsonParse(e.to_string()))?;

    let array = value
        .get("chain")
        .and_then(|v| v.as_array())
        .ok_or_else(|| ProtoError::InvalidLogin("missing 'chain' array".into()))?;

    let mut chain = Vec::with_capacity(array.len());
    for item in array {
        let token = item
            .as_str()
            .ok_or_else(|| ProtoError::InvalidLogin("chain item is not a string".into()))?;
        chain.push(token.to_owned());
    }

    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};

    use crate::codec::Encode;

    /// Build raw login bytes for tests (mirrors the wire format above).
    pub fn build_login_bytes(protocol_version: i32, chain_json: &str, client_jwt: &str) -> BytesMut {
        let chain = chain_json.as_bytes();
        let client = client_jwt.as_bytes();
        let payload_len = 4 + chain.len() + 4 + client.len();

        let mut buf = BytesMut::new();
        buf.put_i32(protocol_version);
        VarUInt32(payload_len as u32).encode(&mut buf);
        buf.put_i32_le(chain.len() as i32);
        buf.put_slice(chain);
        buf.put_i32_le(client.len() as i32);
        buf.put_slice(client);
        buf
    }

    #[test]
    fn decode_login() {
        let chain_json = r#"{"chain":["h1.p1.s1","h2.p2.s2"]}"#;
        let buf = build_login_bytes(282, chain_json, "cd.p.s");

        let pkt = LoginPacket::decode(&mut buf.freeze()).unwrap();
        assert_eq!(pkt.protocol_version, 282);
        assert_eq!(pkt.chain, vec!["h1.p1.s1", "h2.p2.s2"]);
        assert_eq!(pkt.client_data_jwt, "cd.p.s");
    }

    #[test]
    fn decode_login_truncated() {
        let buf = BytesMut::from(&[0x00, 0x00, 0x01][..]);
        assert!(LoginPacket::decode(&mut buf.freeze()).is_err());
    }

    #[test]
    fn decode_login_bad_chain_json() {
        let buf = build_login_bytes(282, "not json", "cd");
        assert!(LoginPacket::decode(&mut buf.freeze()).is_err());
    }

    #[test]
    fn decode_login_missing_chain_key() {
        let buf = build_login_bytes(282, r#"{"other":[]}"#, "cd");
        assert!(LoginPacket::decode(&mut buf.freeze()).is_err());
    }

    #[test]
    fn decode_login_non_string_chain_item() {
        let buf = build_login_bytes(282, r#"{"chain":[42]}"#, "cd");
        assert!(LoginPacket::decode(&mut buf.freeze()).is_err());
    }
}
