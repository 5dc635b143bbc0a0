//! ResourcePackChunkData (0x53) — Server → Client.

use bytes::{Buf, BufMut};

use crate::codec::{self, Decode, Encode};
use crate::error::ProtoError;

/// One chunk of pack binary data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePackChunkData {
    pub pack_id: String,
    pub chunk_index: u32,
    /// Byte offset of this chunk within the pack.
    pub progress: u64,
    pub data: Vec<u8>,
}

impl Encode for ResourcePackChunkData {
    fn encode(&self, buf: &mut impl BufMut) {
        codec::write_string(buf, &self.pack_id);
        buf.put_u32_le(self.chunk_index);
        buf.put_u64_le(self.progress);
        codec::write_byte_array(buf, &self.data);
    }
}

impl Decode for ResourcePackChunkData {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let pack_id = codec::read_string(buf)?;
        if buf.remaining() < 12 {
            return Err(ProtoError::BufferTooShort {
                needed: 12,
                remaining: buf.remaining(),
            });
        }
        let chunk_index = buf.get_u32_le();
        let progress = buf.get_u64_le();
        let data = codec::read_byte_array(buf)?;
        Ok(Self {
            pack_id,
            chunk_index,
            progress,
            data,
        })
    }
}
