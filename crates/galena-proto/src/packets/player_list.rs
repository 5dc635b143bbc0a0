//! PlayerList (0x3F) — Server → Client.
//!
//! Maintains the tab list: entries are added with identity and skin data,
//! removed by UUID only.

use bytes::BufMut;

use crate::codec::{write_string, Encode};
use crate::packets::skin::Skin;
use crate::types::{Uuid, VarLong, VarUInt32};

/// One "Add" entry.
#[derive(Debug, Clone)]
pub struct PlayerListAddEntry {
    pub uuid: Uuid,
    pub entity_unique_id: i64,
    pub username: String,
    pub skin: Skin,
    pub xuid: String,
    pub platform_chat_id: String,
}

/// PlayerList with action Add (0).
#[derive(Debug, Clone)]
pub struct PlayerListAdd {
    pub entries: Vec<PlayerListAddEntry>,
}

/// PlayerList with action Remove (1).
#[derive(Debug, Clone)]
pub struct PlayerListRemove {
    pub uuids: Vec<Uuid>,
}

impl Encode for PlayerListAdd {
    fn encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(0); // action = Add
        VarUInt32(self.entries.len() as u32).encode(buf);
        for entry in &self.entries {
            entry.uuid.encode(buf);
            VarLong(entry.entity_unique_id).encode(buf);
            write_string(buf, &entry.username);
            entry.skin.encode(buf);
            write_string(buf, &entry.xuid);
            write_string(buf, &entry.platform_chat_id);
        }
    }
}

impl Encode for PlayerListRemove {
    fn encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(1); // action = Remove
        VarUInt32(self.uuids.len() as u32).encode(buf);
        for uuid in &self.uuids {
            uuid.encode(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_remove_single() {
        let pkt = PlayerListRemove {
            uuids: vec![Uuid::new(1, 2)],
        };
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(buf[0], 1);
        assert_eq!(buf[1], 1);
        assert_eq!(buf.len(), 1 + 1 + 16);
    }

    #[test]
    fn encode_add_single() {
        let pkt = PlayerListAdd {
            entries: vec![PlayerListAddEntry {
                uuid: Uuid::new(1, 2),
                entity_unique_id: 1,
                username: "Steve".into(),
                skin: Skin::default(),
                xuid: String::new(),
                platform_chat_id: String::new(),
            }],
        };
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(buf[0], 0);
        assert_eq!(buf[1], 1);
        assert!(buf.len() > 16);
    }
}
