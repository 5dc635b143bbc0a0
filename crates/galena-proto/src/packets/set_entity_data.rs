//! SetEntityData (0x27) — Server → Client.

use bytes::BufMut;

use crate::codec::Encode;
use crate::packets::metadata::{encode_metadata, EntityMetadataEntry};
use crate::types::VarUInt64;

/// Pushes updated entity metadata to a viewer.
#[derive(Debug, Clone)]
pub struct SetEntityData {
    pub runtime_entity_id: u64,
    pub metadata: Vec<EntityMetadataEntry>,
}

impl Encode for SetEntityData {
    fn encode(&self, buf: &mut impl BufMut) {
        VarUInt64(self.runtime_entity_id).encode(buf);
        encode_metadata(buf, &self.metadata);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packets::metadata::{keys, MetadataValue};
    use bytes::BytesMut;

    #[test]
    fn encode_starts_with_runtime_id() {
        let pkt = SetEntityData {
            runtime_entity_id: 3,
            metadata: vec![EntityMetadataEntry::new(
                keys::FLAGS,
                MetadataValue::Long(0),
            )],
        };
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(buf[0], 3); // VarUInt64(3)
        assert_eq!(buf[1], 1); // one metadata entry
    }
}
