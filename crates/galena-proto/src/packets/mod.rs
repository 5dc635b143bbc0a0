//! Game packet definitions for the target protocol version.

pub mod add_player;
pub mod animate;
pub mod chunk_radius_updated;
pub mod client_handshake;
pub mod crafting_data;
pub mod disconnect;
pub mod inventory_transaction;
pub mod login;
pub mod metadata;
pub mod move_player;
pub mod play_status;
pub mod player_action;
pub mod player_list;
pub mod player_skin;
pub mod remove_entity;
pub mod request_chunk_radius;
pub mod resource_pack_chunk_data;
pub mod resource_pack_chunk_request;
pub mod resource_pack_client_response;
pub mod resource_pack_data_info;
pub mod resource_pack_stack;
pub mod resource_packs_info;
pub mod server_handshake;
pub mod set_entity_data;
pub mod skin;
pub mod start_game;
pub mod text;
pub mod update_attributes;
pub mod update_block;

pub use add_player::AddPlayer;
pub use animate::Animate;
pub use chunk_radius_updated::ChunkRadiusUpdated;
pub use client_handshake::ClientHandshake;
pub use crafting_data::CraftingData;
pub use disconnect::Disconnect;
pub use inventory_transaction::{InventoryTransaction, TransactionData, UseItemAction};
pub use login::LoginPacket;
pub use metadata::{EntityMetadataEntry, MetadataValue};
pub use move_player::{MoveMode, MovePlayer};
pub use play_status::{PlayStatus, PlayStatusType};
pub use player_action::{PlayerAction, PlayerActionType};
pub use player_list::{PlayerListAdd, PlayerListAddEntry, PlayerListRemove};
pub use player_skin::PlayerSkin;
pub use remove_entity::RemoveEntity;
pub use request_chunk_radius::RequestChunkRadius;
pub use resource_pack_chunk_data::ResourcePackChunkData;
pub use resource_pack_chunk_request::ResourcePackChunkRequest;
pub use resource_pack_client_response::{ResourcePackClientResponse, ResourcePackResponseStatus};
pub use resource_pack_data_info::ResourcePackDataInfo;
pub use resource_pack_stack::{ResourcePackStack, StackPackEntry};
pub use resource_packs_info::{PackInfoEntry, ResourcePacksInfo};
pub use server_handshake::ServerHandshake;
pub use set_entity_data::SetEntityData;
pub use skin::Skin;
pub use start_game::StartGame;
pub use text::{Text, TextType};
pub use update_attributes::{AttributeEntry, UpdateAttributes};
pub use update_block::UpdateBlock;

/// Game packet ids.
pub mod id {
    pub const LOGIN: u8 = 0x01;
    pub const PLAY_STATUS: u8 = 0x02;
    pub const SERVER_HANDSHAKE: u8 = 0x03;
    pub const CLIENT_HANDSHAKE: u8 = 0x04;
    pub const DISCONNECT: u8 = 0x05;
    pub const RESOURCE_PACKS_INFO: u8 = 0x06;
    pub const RESOURCE_PACK_STACK: u8 = 0x07;
    pub const RESOURCE_PACK_CLIENT_RESPONSE: u8 = 0x08;
    pub const TEXT: u8 = 0x09;
    pub const START_GAME: u8 = 0x0B;
    pub const ADD_PLAYER: u8 = 0x0C;
    pub const REMOVE_ENTITY: u8 = 0x0E;
    pub const MOVE_PLAYER: u8 = 0x13;
    pub const UPDATE_BLOCK: u8 = 0x15;
    pub const UPDATE_ATTRIBUTES: u8 = 0x1D;
    pub const INVENTORY_TRANSACTION: u8 = 0x1E;
    pub const PLAYER_ACTION: u8 = 0x24;
    pub const SET_ENTITY_DATA: u8 = 0x27;
    pub const ANIMATE: u8 = 0x2C;
    pub const CRAFTING_DATA: u8 = 0x34;
    pub const PLAYER_LIST: u8 = 0x3F;
    pub const REQUEST_CHUNK_RADIUS: u8 = 0x45;
    pub const CHUNK_RADIUS_UPDATED: u8 = 0x46;
    pub const RESOURCE_PACK_DATA_INFO: u8 = 0x52;
    pub const RESOURCE_PACK_CHUNK_DATA: u8 = 0x53;
    pub const RESOURCE_PACK_CHUNK_REQUEST: u8 = 0x54;
    pub const PLAYER_SKIN: u8 = 0x5D;
}

/// The single protocol version this server speaks.
pub const LATEST_PROTOCOL: i32 = 282;

/// Game version string matching [`LATEST_PROTOCOL`].
pub const GAME_VERSION: &str = "1.6.0";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let ids = [
            id::LOGIN,
            id::PLAY_STATUS,
            id::SERVER_HANDSHAKE,
            id::CLIENT_HANDSHAKE,
            id::DISCONNECT,
            id::RESOURCE_PACKS_INFO,
            id::RESOURCE_PACK_STACK,
            id::RESOURCE_PACK_CLIENT_RESPONSE,
            id::TEXT,
            id::START_GAME,
            id::ADD_PLAYER,
            id::REMOVE_ENTITY,
            id::MOVE_PLAYER,
            id::UPDATE_BLOCK,
            id::UPDATE_ATTRIBUTES,
            id::INVENTORY_TRANSACTION,
            id::PLAYER_ACTION,
            id::SET_ENTITY_DATA,
            id::ANIMATE,
            id::CRAFTING_DATA,
            id::PLAYER_LIST,
            id::REQUEST_CHUNK_RADIUS,
            id::CHUNK_RADIUS_UPDATED,
            id::RESOURCE_PACK_DATA_INFO,
            id::RESOURCE_PACK_CHUNK_DATA,
            id::RESOURCE_PACK_CHUNK_REQUEST,
            id::PLAYER_SKIN,
        ];
        let mut seen = std::collections::HashSet::new();
        for id in ids {
            assert!(seen.insert(id), "duplicate packet id 0x{id:02X}");
        }
    }
}
