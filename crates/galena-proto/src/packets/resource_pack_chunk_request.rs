//! ResourcePackChunkRequest (0x54) — Client → Server.

use bytes::{Buf, BufMut};

use crate::codec::{self, Decode, Encode};
use crate::error::ProtoError;

/// Client request for one chunk of a pack it was offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePackChunkRequest {
    pub pack_id: String,
    pub chunk_index: u32,
}

impl Encode for ResourcePackChunkRequest {
    fn encode(&self, buf: &mut impl BufMut) {
        codec::write_string(buf, &self.pack_id);
        buf.put_u32_le(self.chunk_index);
    }
}

impl Decode for ResourcePackChunkRequest {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let pack_id = codec::read_string(buf)?;
        if buf.remaining() < 4 {
            return Err(ProtoError::BufferTooShort {
                needed: 4,
                remaining: buf.remaining(),
            });
        }
        Ok(Self {
            pack_id,
            chunk_index: buf.get_u32_le(),
        })
    }
}
