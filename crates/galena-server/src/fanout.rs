//! Viewer fanout: building and dispatching spawn, list, skin and leave
//! packets across the sessions that watch a player.

use bytes::Bytes;
use tracing::info;

use galena_proto::batch::encode_packet;
use galena_proto::item_stack::ItemStack;
use galena_proto::packets::{
    id, AddPlayer, PlayerListAdd, PlayerListAddEntry, PlayerListRemove, PlayerSkin, RemoveEntity,
    Text,
};

use crate::player::Player;
use crate::session::Session;
use crate::ServerContext;

/// The tab-list entry describing `player`.
pub fn player_list_entry(player: &Player) -> PlayerListAddEntry {
    PlayerListAddEntry {
        uuid: player.uuid,
        entity_unique_id: player.entity_unique_id(),
        username: player.username.clone(),
        skin: player.skin.clone(),
        xuid: player.xuid.clone(),
        platform_chat_id: String::new(),
    }
}

/// Encoded PlayerList(Add) carrying the given entries.
pub fn list_add_record(entries: Vec<PlayerListAddEntry>) -> Bytes {
    encode_packet(id::PLAYER_LIST, &PlayerListAdd { entries })
}

/// Encoded AddPlayer spawning `player`.
pub fn add_player_record(player: &Player) -> Bytes {
    encode_packet(
        id::ADD_PLAYER,
        &AddPlayer {
            uuid: player.uuid,
            username: player.username.clone(),
            entity_unique_id: player.entity_unique_id(),
            runtime_entity_id: player.runtime_id,
            platform_chat_id: String::new(),
            position: player.position,
            velocity: galena_proto::types::Vec3::ZERO,
            pitch: player.pitch,
            yaw: player.yaw,
            head_yaw: player.head_yaw,
            held_item: ItemStack::empty(),
            metadata: player.metadata(),
        },
    )
}

/// Encoded PlayerSkin for `player`.
pub fn skin_record(player: &Player) -> Bytes {
    encode_packet(
        id::PLAYER_SKIN,
        &PlayerSkin {
            uuid: player.uuid,
            skin: player.skin.clone(),
        },
    )
}

/// Spawn `player` on `target`'s client: AddPlayer followed by its skin.
pub fn spawn_to(target: &Session, player: &Player) {
    target.send(vec![add_player_record(player), skin_record(player)]);
}

/// Send one record to every registered session.
pub fn broadcast_to_all(ctx: &ServerContext, record: Bytes) {
    for session in ctx.sessions.all() {
        session.send(vec![record.clone()]);
    }
}

/// Tear a departed session out of the world: remove it from every viewer
/// set and despawn it on the remaining clients.
///
/// The session must already be removed from the manager so the broadcast
/// only reaches the survivors.
pub fn broadcast_leave(ctx: &ServerContext, session: &Session) {
    let (uuid, entity_unique_id, display_name) = {
        let guard = session.player();
        match guard.as_ref() {
            Some(player) => (
                player.uuid,
                player.entity_unique_id(),
                player.display_name.clone(),
            ),
            None => return,
        }
    };

    let records = vec![
        encode_packet(id::REMOVE_ENTITY, &RemoveEntity { entity_unique_id }),
        encode_packet(id::PLAYER_LIST, &PlayerListRemove { uuids: vec![uuid] }),
        encode_packet(
            id::TEXT,
            &Text::system(format!("§e{display_name} left the game")),
        ),
    ];

    for other in ctx.sessions.all() {
        if let Some(player) = other.player_mut().as_mut() {
            player.remove_viewer(session.addr);
        }
        other.send(records.clone());
    }

    info!("{display_name} left the game");
}

#[cfg(test)]
mod tests {
    use super::*;
    use galena_proto::packets::Skin;
    use galena_proto::types::{Uuid, Vec3};

    fn test_player() -> Player {
        Player::new(
            Uuid::new(1, 2),
            "777".into(),
            7,
            "Steve".into(),
            Skin::default(),
            4,
            Vec3::new(0.5, 7.0, 0.5),
        )
    }

    #[test]
    fn records_carry_packet_ids() {
        let player = test_player();
        assert_eq!(add_player_record(&player)[0], id::ADD_PLAYER);
        assert_eq!(skin_record(&player)[0], id::PLAYER_SKIN);
        assert_eq!(list_add_record(vec![player_list_entry(&player)])[0], id::PLAYER_LIST);
    }

    #[test]
    fn list_entry_mirrors_player_identity() {
        let player = test_player();
        let entry = player_list_entry(&player);
        assert_eq!(entry.uuid, player.uuid);
        assert_eq!(entry.username, "Steve");
        assert_eq!(entry.xuid, "777");
        assert_eq!(entry.entity_unique_id, 4);
    }
}
