//! ResourcePackDataInfo (0x52) — Server → Client.
//!
//! Announces the chunked transfer of one pack after a SendPacks response.

use bytes::{Buf, BufMut};

use crate::codec::{self, Decode, Encode};
use crate::error::ProtoError;

/// Transfer metadata for one pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePackDataInfo {
    pub pack_id: String,
    /// Maximum chunk size in bytes.
    pub max_chunk_size: u32,
    pub chunk_count: u32,
    /// Total pack size in bytes.
    pub pack_size: u64,
    /// Hex SHA-256 of the pack archive.
    pub pack_hash: String,
}

impl Encode for ResourcePackDataInfo {
    fn encode(&self, buf: &mut impl BufMut) {
        codec::write_string(buf, &self.pack_id);
        buf.put_u32_le(self.max_chunk_size);
        buf.put_u32_le(self.chunk_count);
        buf.put_u64_le(self.pack_size);
        codec::write_string(buf, &self.pack_hash);
    }
}

impl Decode for ResourcePackDataInfo {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let pack_id = codec::read_string(buf)?;
        if buf.remaining() < 16 {
            return Err(ProtoError::BufferTooShort {
                needed: 16,
                remaining: buf.remaining(),
            });
        }
        let max_chunk_size = buf.get_u32_le();
        let chunk_count = buf.get_u32_le();
        let pack_size = buf.get_u64_le();
        let pack_hash = codec::read_string(buf)?;
        Ok(Self {
            pack_id,
            max_chunk_size,
            chunk_count,
            pack_size,
            pack_hash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn roundtrip() {
        let pkt = ResourcePackDataInfo {
            pack_id: "abcd_1.0.0".into(),
            max_chunk_size: 1_048_576,
            chunk_count: 3,
            pack_size: 2_500_000,
            pack_hash: "deadbeef".into(),
        };
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(ResourcePackDataInfo::decode(&mut buf.freeze()).unwrap(), pkt);
    }
}
