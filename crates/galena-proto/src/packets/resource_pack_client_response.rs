//! ResourcePackClientResponse (0x08) — Client → Server.

use bytes::{Buf, BufMut};

use crate::codec::{self, Decode, Encode};
use crate::error::ProtoError;
use crate::types::VarUInt32;

/// Client verdict on the advertised packs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResourcePackResponseStatus {
    Refused = 1,
    SendPacks = 2,
    HaveAllPacks = 3,
    Completed = 4,
}

impl ResourcePackResponseStatus {
    fn from_u8(v: u8) -> Result<Self, ProtoError> {
        match v {
            1 => Ok(Self::Refused),
            2 => Ok(Self::SendPacks),
            3 => Ok(Self::HaveAllPacks),
            4 => Ok(Self::Completed),
            other => Err(ProtoError::InvalidData(format!(
                "unknown resource pack response status: {other}"
            ))),
        }
    }
}

/// The client's answer to ResourcePacksInfo / ResourcePackStack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePackClientResponse {
    pub status: ResourcePackResponseStatus,
    /// UUIDs (optionally `uuid_version`) of the packs the client wants.
    pub pack_ids: Vec<String>,
}

impl Encode for ResourcePackClientResponse {
    fn encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.status as u8);
        VarUInt32(self.pack_ids.len() as u32).encode(buf);
        for id in &self.pack_ids {
            codec::write_string(buf, id);
        }
    }
}

impl Decode for ResourcePackClientResponse {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        if !buf.has_remaining() {
            return Err(ProtoError::BufferTooShort {
                needed: 1,
                remaining: 0,
            });
        }
        let status = ResourcePackResponseStatus::from_u8(buf.get_u8())?;
        let count = VarUInt32::decode(buf)?.0 as usize;
        let mut pack_ids = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            pack_ids.push(codec::read_string(buf)?);
        }
        Ok(Self { status, pack_ids })
    }
}
