//! AddPlayer (0x0C) — Server → Client.
//!
//! Spawns a remote player entity for the receiving client.

use bytes::BufMut;

use crate::codec::{write_string, Encode};
use crate::item_stack::ItemStack;
use crate::packets::metadata::{encode_metadata, EntityMetadataEntry};
use crate::types::{Uuid, VarLong, VarUInt64, Vec3};

/// Spawns another player in the receiver's world.
#[derive(Debug, Clone)]
pub struct AddPlayer {
    pub uuid: Uuid,
    pub username: String,
    pub entity_unique_id: i64,
    pub runtime_entity_id: u64,
    pub platform_chat_id: String,
    pub position: Vec3,
    pub velocity: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
    pub held_item: ItemStack,
    pub metadata: Vec<EntityMetadataEntry>,
}

impl Encode for AddPlayer {
    fn encode(&self, buf: &mut impl BufMut) {
        self.uuid.encode(buf);
        write_string(buf, &self.username);
        VarLong(self.entity_unique_id).encode(buf);
        VarUInt64(self.runtime_entity_id).encode(buf);
        write_string(buf, &self.platform_chat_id);
        self.position.encode(buf);
        self.velocity.encode(buf);
        buf.put_f32_le(self.pitch);
        buf.put_f32_le(self.yaw);
        buf.put_f32_le(self.head_yaw);
        self.held_item.encode(buf);
        encode_metadata(buf, &self.metadata);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packets::metadata::default_player_metadata;
    use bytes::BytesMut;

    #[test]
    fn encode_starts_with_uuid_and_name() {
        let pkt = AddPlayer {
            uuid: Uuid::new(1, 2),
            username: "Steve".into(),
            entity_unique_id: 2,
            runtime_entity_id: 2,
            platform_chat_id: String::new(),
            position: Vec3::new(0.5, 7.62, 0.5),
            velocity: Vec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            head_yaw: 0.0,
            held_item: ItemStack::empty(),
            metadata: default_player_metadata("Steve", 0),
        };
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(buf[16], 5); // username length after the 16-byte UUID
        assert_eq!(&buf[17..22], b"Steve");
    }
}
