//! ChunkRadiusUpdated (0x46) — Server → Client.

use bytes::{Buf, BufMut};

use crate::codec::{Decode, Encode};
use crate::error::ProtoError;
use crate::types::VarInt;

/// The render distance the server accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRadiusUpdated {
    pub radius: i32,
}

impl Encode for ChunkRadiusUpdated {
    fn encode(&self, buf: &mut impl BufMut) {
        VarInt(self.radius).encode(buf);
    }
}

impl Decode for ChunkRadiusUpdated {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            radius: VarInt::decode(buf)?.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn roundtrip() {
        let pkt = ChunkRadiusUpdated { radius: 6 };
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(ChunkRadiusUpdated::decode(&mut buf.freeze()).unwrap(), pkt);
    }
}
