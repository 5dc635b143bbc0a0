//! RemoveEntity (0x0E) — Server → Client.

use bytes::BufMut;

use crate::codec::Encode;
use crate::types::VarLong;

/// Despawns an entity on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveEntity {
    pub entity_unique_id: i64,
}

impl Encode for RemoveEntity {
    fn encode(&self, buf: &mut impl BufMut) {
        VarLong(self.entity_unique_id).encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_zigzags_unique_id() {
        let mut buf = BytesMut::new();
        RemoveEntity { entity_unique_id: 1 }.encode(&mut buf);
        assert_eq!(&buf[..], &[0x02]);
    }
}
