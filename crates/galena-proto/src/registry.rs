//! Packet registry: maps wire ids to decoders producing tagged packets.
//!
//! Every decode constructs a fresh value; nothing is shared between calls.
//! Server → client packets are encode-only and never registered here.

use std::collections::HashMap;

use crate::error::ProtoError;
use crate::packets::{
    id, Animate, ClientHandshake, InventoryTransaction, LoginPacket, MovePlayer, PlayerAction,
    RequestChunkRadius, ResourcePackChunkRequest, ResourcePackClientResponse, Text,
};
use crate::codec::Decode;

/// A decoded inbound packet, tagged by type.
#[derive(Debug, Clone)]
pub enum GamePacket {
    Login(LoginPacket),
    ClientHandshake(ClientHandshake),
    ResourcePackClientResponse(ResourcePackClientResponse),
    ResourcePackChunkRequest(ResourcePackChunkRequest),
    RequestChunkRadius(RequestChunkRadius),
    MovePlayer(MovePlayer),
    Text(Text),
    PlayerAction(PlayerAction),
    Animate(Animate),
    InventoryTransaction(InventoryTransaction),
}

impl GamePacket {
    /// The wire id of this packet.
    pub fn id(&self) -> u8 {
        match self {
            Self::Login(_) => id::LOGIN,
            Self::ClientHandshake(_) => id::CLIENT_HANDSHAKE,
            Self::ResourcePackClientResponse(_) => id::RESOURCE_PACK_CLIENT_RESPONSE,
            Self::ResourcePackChunkRequest(_) => id::RESOURCE_PACK_CHUNK_REQUEST,
            Self::RequestChunkRadius(_) => id::REQUEST_CHUNK_RADIUS,
            Self::MovePlayer(_) => id::MOVE_PLAYER,
            Self::Text(_) => id::TEXT,
            Self::PlayerAction(_) => id::PLAYER_ACTION,
            Self::Animate(_) => id::ANIMATE,
            Self::InventoryTransaction(_) => id::INVENTORY_TRANSACTION,
        }
    }
}

/// Decoder constructing one packet type from its payload.
pub type PacketDecoder = fn(&mut &[u8]) -> Result<GamePacket, ProtoError>;

/// Registry of inbound packet decoders for one protocol version.
pub struct PacketRegistry {
    decoders: HashMap<u8, PacketDecoder>,
}

impl PacketRegistry {
    /// An empty registry; useful for tests.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// The full inbound packet set of the target protocol version.
    pub fn latest() -> Self {
        let mut registry = Self::empty();
        registry.register(id::LOGIN, |buf| {
            Ok(GamePacket::Login(LoginPacket::decode(buf)?))
        });
        registry.register(id::CLIENT_HANDSHAKE, |buf| {
            Ok(GamePacket::ClientHandshake(ClientHandshake::decode(buf)?))
        });
        registry.register(id::RESOURCE_PACK_CLIENT_RESPONSE, |buf| {
            Ok(GamePacket::ResourcePackClientResponse(
                ResourcePackClientResponse::decode(buf)?,
            ))
        });
        registry.register(id::RESOURCE_PACK_CHUNK_REQUEST, |buf| {
            Ok(GamePacket::ResourcePackChunkRequest(
                ResourcePackChunkRequest::decode(buf)?,
            ))
        });
        registry.register(id::REQUEST_CHUNK_RADIUS, |buf| {
            Ok(GamePacket::RequestChunkRadius(RequestChunkRadius::decode(
                buf,
            )?))
        });
        registry.register(id::MOVE_PLAYER, |buf| {
            Ok(GamePacket::MovePlayer(MovePlayer::decode(buf)?))
        });
        registry.register(id::TEXT, |buf| Ok(GamePacket::Text(Text::decode(buf)?)));
        registry.register(id::PLAYER_ACTION, |buf| {
            Ok(GamePacket::PlayerAction(PlayerAction::decode(buf)?))
        });
        registry.register(id::ANIMATE, |buf| {
            Ok(GamePacket::Animate(Animate::decode(buf)?))
        });
        registry.register(id::INVENTORY_TRANSACTION, |buf| {
            Ok(GamePacket::InventoryTransaction(
                InventoryTransaction::decode(buf)?,
            ))
        });
        registry
    }

    pub fn register(&mut self, packet_id: u8, decoder: PacketDecoder) {
        self.decoders.insert(packet_id, decoder);
    }

    pub fn is_registered(&self, packet_id: u8) -> bool {
        self.decoders.contains_key(&packet_id)
    }

    /// Decode one record (`packet_id:u8 || payload`) into a tagged packet.
    pub fn decode(&self, record: &[u8]) -> Result<GamePacket, ProtoError> {
        let (&packet_id, mut payload) = record
            .split_first()
            .ok_or(ProtoError::EmptyFrame)?;
        let decoder = self
            .decoders
            .get(&packet_id)
            .ok_or(ProtoError::UnknownPacketId(packet_id))?;
        decoder(&mut payload)
    }
}

impl Default for PacketRegistry {
    fn default() -> Self {
        Self::latest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::encode_packet;
    use crate::packets::Animate;

    #[test]
    fn latest_registers_inbound_set() {
        let registry = PacketRegistry::latest();
        for packet_id in [
            id::LOGIN,
            id::CLIENT_HANDSHAKE,
            id::RESOURCE_PACK_CLIENT_RESPONSE,
            id::RESOURCE_PACK_CHUNK_REQUEST,
            id::REQUEST_CHUNK_RADIUS,
            id::MOVE_PLAYER,
            id::TEXT,
            id::PLAYER_ACTION,
            id::ANIMATE,
            id::INVENTORY_TRANSACTION,
        ] {
            assert!(registry.is_registered(packet_id), "0x{packet_id:02X}");
        }
        assert!(!registry.is_registered(id::PLAY_STATUS));
        assert!(!registry.is_registered(id::START_GAME));
    }

    #[test]
    fn decode_tags_by_id() {
        let registry = PacketRegistry::latest();
        let record = encode_packet(
            id::ANIMATE,
            &Animate {
                action: 1,
                runtime_entity_id: 9,
            },
        );
        match registry.decode(&record).unwrap() {
            GamePacket::Animate(pkt) => assert_eq!(pkt.runtime_entity_id, 9),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn decode_unknown_id() {
        let registry = PacketRegistry::latest();
        assert!(matches!(
            registry.decode(&[0xEE, 0x00]),
            Err(ProtoError::UnknownPacketId(0xEE))
        ));
    }

    #[test]
    fn decode_empty_record() {
        let registry = PacketRegistry::latest();
        assert!(registry.decode(&[]).is_err());
    }

    #[test]
    fn decoders_return_fresh_values() {
        let registry = PacketRegistry::latest();
        let record = encode_packet(
            id::ANIMATE,
            &Animate {
                action: 1,
                runtime_entity_id: 1,
            },
        );
        let first = registry.decode(&record).unwrap();
        let second = registry.decode(&record).unwrap();
        // Tag equality, value independence: both decode to the same content
        // from the same bytes but are distinct values.
        match (first, second) {
            (GamePacket::Animate(a), GamePacket::Animate(b)) => assert_eq!(a, b),
            _ => panic!("wrong variants"),
        }
    }
}
