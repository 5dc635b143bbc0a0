//! Compact item stack representation used by spawn-era packets.

use bytes::{Buf, BufMut};

use crate::codec::{Decode, Encode};
use crate::error::ProtoError;
use crate::types::VarInt;

/// An item stack on the wire. A runtime id of 0 means "air"/empty and
/// carries no further fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStack {
    pub runtime_id: i32,
    pub count: i32,
    pub metadata: i32,
}

impl ItemStack {
    pub fn empty() -> Self {
        Self {
            runtime_id: 0,
            count: 0,
            metadata: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runtime_id == 0
    }
}

impl Encode for ItemStack {
    fn encode(&self, buf: &mut impl BufMut) {
        VarInt(self.runtime_id).encode(buf);
        if self.runtime_id == 0 {
            return;
        }
        VarInt(self.count).encode(buf);
        VarInt(self.metadata).encode(buf);
    }
}

impl Decode for ItemStack {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let runtime_id = VarInt::decode(buf)?.0;
        if runtime_id == 0 {
            return Ok(Self::empty());
        }
        let count = VarInt::decode(buf)?.0;
        let metadata = VarInt::decode(buf)?.0;
        Ok(Self {
            runtime_id,
            count,
            metadata,
        })
    }
}
