//! UpdateBlock (0x15) — Server → Client.

use bytes::BufMut;

use crate::codec::Encode;
use crate::types::{BlockPos, VarUInt32};

/// Block update flag: forward the change to neighbours.
pub const FLAG_NEIGHBORS: u32 = 0b0001;
/// Block update flag: the change came from the network.
pub const FLAG_NETWORK: u32 = 0b0010;

/// Replaces a single block on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateBlock {
    pub position: BlockPos,
    pub block_runtime_id: u32,
    pub flags: u32,
    pub layer: u32,
}

impl UpdateBlock {
    pub fn new(position: BlockPos, block_runtime_id: u32) -> Self {
        Self {
            position,
            block_runtime_id,
            flags: FLAG_NEIGHBORS | FLAG_NETWORK,
            layer: 0,
        }
    }
}

impl Encode for UpdateBlock {
    fn encode(&self, buf: &mut impl BufMut) {
        self.position.encode(buf);
        VarUInt32(self.block_runtime_id).encode(buf);
        VarUInt32(self.flags).encode(buf);
        VarUInt32(self.layer).encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_has_default_flags() {
        let pkt = UpdateBlock::new(BlockPos::new(0, 7, 0), 0);
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert!(!buf.is_empty());
        assert_eq!(pkt.flags, 0b0011);
    }
}
