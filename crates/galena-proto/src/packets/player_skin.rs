//! PlayerSkin (0x5D) — Server → Client.

use bytes::BufMut;

use crate::codec::Encode;
use crate::packets::skin::Skin;
use crate::types::Uuid;

/// Pushes a player's skin to a viewer.
#[derive(Debug, Clone)]
pub struct PlayerSkin {
    pub uuid: Uuid,
    pub skin: Skin,
}

impl Encode for PlayerSkin {
    fn encode(&self, buf: &mut impl BufMut) {
        self.uuid.encode(buf);
        self.skin.encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_starts_with_uuid() {
        let pkt = PlayerSkin {
            uuid: Uuid::new(0xAA, 0xBB),
            skin: Skin::default(),
        };
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert!(buf.len() > 16);
        assert_eq!(buf[0], 0xAA); // low byte of most_significant, LE
    }
}
