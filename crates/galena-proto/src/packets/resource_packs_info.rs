//! ResourcePacksInfo (0x06) — Server → Client.

use bytes::{Buf, BufMut};

use crate::codec::{self, Decode, Encode};
use crate::error::ProtoError;
use crate::types::VarUInt32;

/// One pack advertised to the client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackInfoEntry {
    pub uuid: String,
    pub version: String,
    pub size: u64,
}

/// Advertises the packs the client must (or may) download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePacksInfo {
    pub must_accept: bool,
    pub behavior_packs: Vec<PackInfoEntry>,
    pub resource_packs: Vec<PackInfoEntry>,
}

fn encode_entries(buf: &mut impl BufMut, entries: &[PackInfoEntry]) {
    VarUInt32(entries.len() as u32).encode(buf);
    for entry in entries {
        codec::write_string(buf, &entry.uuid);
        codec::write_string(buf, &entry.version);
        buf.put_u64_le(entry.size);
    }
}

fn decode_entries(buf: &mut impl Buf) -> Result<Vec<PackInfoEntry>, ProtoError> {
    let count = VarUInt32::decode(buf)?.0 as usize;
    let mut entries = Vec::with_capacity(count.min(64));
    for _ in 0..count {
        let uuid = codec::read_string(buf)?;
        let version = codec::read_string(buf)?;
        if buf.remaining() < 8 {
            return Err(ProtoError::BufferTooShort {
                needed: 8,
                remaining: buf.remaining(),
            });
        }
        entries.push(PackInfoEntry {
            uuid,
            version,
            size: buf.get_u64_le(),
        });
    }
    Ok(entries)
}

impl Encode for ResourcePacksInfo {
    fn encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.must_accept as u8);
        encode_entries(buf, &self.behavior_packs);
        encode_entries(buf, &self.resource_packs);
    }
}

impl Decode for ResourcePacksInfo {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        if !buf.has_remaining() {
            return Err(ProtoError::BufferTooShort {
                needed: 1,
                remaining: 0,
            });
        }
        Ok(Self {
            must_accept: buf.get_u8() != 0,
            behavior_packs: decode_entries(buf)?,
            resource_packs: decode_entries(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_empty() {
        let mut buf = BytesMut::new();
        ResourcePacksInfo::default().encode(&mut buf);
        // must_accept + two zero counts
        assert_eq!(&buf[..], &[0x00, 0x00, 0x00]);
    }

    #[test]
    fn roundtrip_with_packs() {
        let pkt = ResourcePacksInfo {
            must_accept: true,
            behavior_packs: Vec::new(),
            resource_packs: vec![PackInfoEntry {
                uuid: "0000-1111".into(),
                version: "1.0.0".into(),
                size: 2048,
            }],
        };
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(ResourcePacksInfo::decode(&mut buf.freeze()).unwrap(), pkt);
    }
}
