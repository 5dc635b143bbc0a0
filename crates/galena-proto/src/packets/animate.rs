//! Animate (0x2C) — Bidirectional.
//!
//! The client reports arm swings; the server fans them out to viewers.

use bytes::{Buf, BufMut};

use crate::codec::{Decode, Encode};
use crate::error::ProtoError;
use crate::types::{VarInt, VarUInt64};

/// Arm swing action id.
pub const ACTION_SWING_ARM: i32 = 1;

/// Animate packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animate {
    pub action: i32,
    pub runtime_entity_id: u64,
}

impl Encode for Animate {
    fn encode(&self, buf: &mut impl BufMut) {
        VarInt(self.action).encode(buf);
        VarUInt64(self.runtime_entity_id).encode(buf);
    }
}

impl Decode for Animate {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            action: VarInt::decode(buf)?.0,
            runtime_entity_id: VarUInt64::decode(buf)?.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn roundtrip_swing() {
        let pkt = Animate {
            action: ACTION_SWING_ARM,
            runtime_entity_id: 42,
        };
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(Animate::decode(&mut buf.freeze()).unwrap(), pkt);
    }
}
