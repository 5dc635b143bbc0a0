//! RequestChunkRadius (0x45) — Client → Server.

use bytes::{Buf, BufMut};

use crate::codec::{Decode, Encode};
use crate::error::ProtoError;
use crate::types::VarInt;

/// The client's requested render distance in chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestChunkRadius {
    pub radius: i32,
}

impl Encode for RequestChunkRadius {
    fn encode(&self, buf: &mut impl BufMut) {
        VarInt(self.radius).encode(buf);
    }
}

impl Decode for RequestChunkRadius {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            radius: VarInt::decode(buf)?.0,
        })
    }
}
