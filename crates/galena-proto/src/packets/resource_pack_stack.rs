//! ResourcePackStack (0x07) — Server → Client.

use bytes::{Buf, BufMut};

use crate::codec::{self, Decode, Encode};
use crate::error::ProtoError;
use crate::types::VarUInt32;

/// One pack in the application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackPackEntry {
    pub uuid: String,
    pub version: String,
    pub sub_pack_name: String,
}

/// Tells the client the order in which accepted packs apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePackStack {
    pub must_accept: bool,
    pub behavior_packs: Vec<StackPackEntry>,
    pub resource_packs: Vec<StackPackEntry>,
    pub experimental: bool,
}

fn encode_entries(buf: &mut impl BufMut, entries: &[StackPackEntry]) {
    VarUInt32(entries.len() as u32).encode(buf);
    for entry in entries {
        codec::write_string(buf, &entry.uuid);
        codec::write_string(buf, &entry.version);
        codec::write_string(buf, &entry.sub_pack_name);
    }
}

fn decode_entries(buf: &mut impl Buf) -> Result<Vec<StackPackEntry>, ProtoError> {
    let count = VarUInt32::decode(buf)?.0 as usize;
    let mut entries = Vec::with_capacity(count.min(64));
    for _ in 0..count {
        entries.push(StackPackEntry {
            uuid: codec::read_string(buf)?,
            version: codec::read_string(buf)?,
            sub_pack_name: codec::read_string(buf)?,
        });
    }
    Ok(entries)
}

impl Encode for ResourcePackStack {
    fn encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.must_accept as u8);
        encode_entries(buf, &self.behavior_packs);
        encode_entries(buf, &self.resource_packs);
        buf.put_u8(self.experimental as u8);
    }
}

impl Decode for ResourcePackStack {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        if !buf.has_remaining() {
            return Err(ProtoError::BufferTooShort {
                needed: 1,
                remaining: 0,
            });
        }
        let must_accept = buf.get_u8() != 0;
        let behavior_packs = decode_entries(buf)?;
        let resource_packs = decode_entries(buf)?;
        if !buf.has_remaining() {
            return Err(ProtoError::BufferTooShort {
                needed: 1,
                remaining: 0,
            });
        }
        Ok(Self {
            must_accept,
            behavior_packs,
            resource_packs,
            experimental: buf.get_u8() != 0,
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
        ResourcePackStack::default().encode(&mut buf);
        assert_eq!(&buf[..], &[0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn roundtrip() {
        let pkt = ResourcePackStack {
            must_accept: true,
            behavior_packs: Vec::new(),
            resource_packs: vec![StackPackEntry {
                uuid: "abcd".into(),
                version: "1.0.0".into(),
                sub_pack_name: String::new(),
            }],
            experimental: false,
        };
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(ResourcePackStack::decode(&mut buf.freeze()).unwrap(), pkt);
    }
}
