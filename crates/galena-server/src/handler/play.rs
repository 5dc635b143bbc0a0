//! In-world handlers: spawn completion, movement, chat, actions and block
//! breaking.

use std::sync::Arc;

use tracing::{debug, info};

use galena_proto::batch::encode_packet;
use galena_proto::packets::metadata::entity_flags;
use galena_proto::packets::{
    id, Animate, ChunkRadiusUpdated, PlayStatus, PlayStatusType, PlayerActionType, SetEntityData,
    Text, TextType, TransactionData, UpdateAttributes, UpdateBlock, UseItemAction,
};
use galena_proto::registry::GamePacket;

use crate::fanout;
use crate::session::{Phase, Session};
use crate::world::AIR_RUNTIME_ID;
use crate::ServerContext;

/// Completes the spawn: accept a chunk radius, exchange player lists, cross
/// spawn with every session already in the world and release the client.
pub fn handle_request_chunk_radius(
    ctx: &ServerContext,
    session: &Arc<Session>,
    packet: GamePacket,
) -> bool {
    let GamePacket::RequestChunkRadius(request) = packet else {
        return false;
    };

    {
        let state = session.state();
        if state.phase != Phase::AwaitingChunkRadius {
            debug!(
                "unexpected RequestChunkRadius from {} in {:?}",
                session.addr, state.phase
            );
            return false;
        }
    }

    let radius = request.radius.clamp(1, ctx.config.world.max_view_distance);
    session.state().view_distance = radius;
    session.send(vec![encode_packet(
        id::CHUNK_RADIUS_UPDATED,
        &ChunkRadiusUpdated { radius },
    )]);

    let (my_entry, my_add, my_skin, runtime_id, display_name) = {
        let guard = session.player();
        let Some(player) = guard.as_ref() else {
            debug!("RequestChunkRadius from {} before login", session.addr);
            return false;
        };
        (
            fanout::player_list_entry(player),
            fanout::add_player_record(player),
            fanout::skin_record(player),
            player.runtime_id,
            player.display_name.clone(),
        )
    };

    let spawned: Vec<Arc<Session>> = ctx
        .sessions
        .all()
        .into_iter()
        .filter(|other| other.addr != session.addr && other.state().phase == Phase::Spawned)
        .collect();

    // Tab lists: everyone already in the world learns about the newcomer,
    // the newcomer learns about everyone.
    let mut known_entries = Vec::with_capacity(spawned.len());
    for other in &spawned {
        other.send(vec![fanout::list_add_record(vec![my_entry.clone()])]);
        if let Some(player) = other.player().as_ref() {
            known_entries.push(fanout::player_list_entry(player));
        }
    }
    session.send(vec![fanout::list_add_record(known_entries)]);

    // Cross spawn and cross view.
    for other in &spawned {
        if let Some(player) = other.player().as_ref() {
            fanout::spawn_to(session, player);
        }
        if let Some(player) = other.player_mut().as_mut() {
            player.add_viewer(session.addr);
        }
        if let Some(player) = session.player_mut().as_mut() {
            player.add_viewer(other.addr);
        }
        other.send(vec![my_add.clone(), my_skin.clone()]);
    }

    // Own entity state.
    let metadata = session
        .player()
        .as_ref()
        .map(|p| p.metadata())
        .unwrap_or_default();
    session.send(vec![
        encode_packet(
            id::SET_ENTITY_DATA,
            &SetEntityData {
                runtime_entity_id: runtime_id,
                metadata,
            },
        ),
        encode_packet(
            id::UPDATE_ATTRIBUTES,
            &UpdateAttributes::player_defaults(runtime_id),
        ),
    ]);

    fanout::broadcast_to_all(
        ctx,
        encode_packet(
            id::TEXT,
            &Text::system(format!("§e{display_name} has joined the server")),
        ),
    );

    session.send(vec![encode_packet(
        id::PLAY_STATUS,
        &PlayStatus::new(PlayStatusType::PlayerSpawn),
    )]);

    {
        let mut state = session.state();
        state.connected = true;
        state.phase = Phase::Spawned;
    }
    info!("{display_name} spawned with view distance {radius}");
    true
}

pub fn handle_move_player(
    _ctx: &ServerContext,
    session: &Arc<Session>,
    packet: GamePacket,
) -> bool {
    let GamePacket::MovePlayer(movement) = packet else {
        return false;
    };

    if session.state().phase != Phase::Spawned {
        debug!("MovePlayer from {} before spawn", session.addr);
        return false;
    }

    let mut guard = session.player_mut();
    let Some(player) = guard.as_mut() else {
        return false;
    };
    player.sync_move(
        movement.position,
        movement.pitch,
        movement.yaw,
        movement.head_yaw,
        movement.on_ground,
    );
    true
}

pub fn handle_text(ctx: &ServerContext, session: &Arc<Session>, packet: GamePacket) -> bool {
    let GamePacket::Text(text) = packet else {
        return false;
    };

    if session.state().phase != Phase::Spawned {
        debug!("Text from {} before spawn", session.addr);
        return false;
    }
    if text.text_type != TextType::Chat {
        return false;
    }

    let (display_name, xuid) = {
        let guard = session.player();
        let Some(player) = guard.as_ref() else {
            return false;
        };
        (player.display_name.clone(), player.xuid.clone())
    };

    let line = format!("<{display_name}> {}", text.message);
    let outgoing = Text {
        text_type: TextType::Chat,
        needs_translation: false,
        source_name: display_name,
        message: line.clone(),
        parameters: Vec::new(),
        xuid,
        platform_chat_id: text.platform_chat_id,
    };
    fanout::broadcast_to_all(ctx, encode_packet(id::TEXT, &outgoing));
    info!("{line}");
    true
}

pub fn handle_player_action(
    _ctx: &ServerContext,
    session: &Arc<Session>,
    packet: GamePacket,
) -> bool {
    let GamePacket::PlayerAction(action) = packet else {
        return false;
    };

    if session.state().phase != Phase::Spawned {
        debug!("PlayerAction from {} before spawn", session.addr);
        return false;
    }

    let mut guard = session.player_mut();
    let Some(player) = guard.as_mut() else {
        return false;
    };
    match action.action {
        PlayerActionType::StartSneak => player.set_flag(entity_flags::SNEAKING, true),
        PlayerActionType::StopSneak => player.set_flag(entity_flags::SNEAKING, false),
        PlayerActionType::StartSprint => player.set_flag(entity_flags::SPRINTING, true),
        PlayerActionType::StopSprint => player.set_flag(entity_flags::SPRINTING, false),
        PlayerActionType::Other(other) => {
            debug!("ignoring player action {other} from {}", session.addr);
        }
    }
    true
}

pub fn handle_animate(ctx: &ServerContext, session: &Arc<Session>, packet: GamePacket) -> bool {
    let GamePacket::Animate(animate) = packet else {
        return false;
    };

    if session.state().phase != Phase::Spawned {
        debug!("Animate from {} before spawn", session.addr);
        return false;
    }

    let (runtime_id, viewers) = {
        let guard = session.player();
        let Some(player) = guard.as_ref() else {
            return false;
        };
        (player.runtime_id, player.viewers().collect::<Vec<_>>())
    };

    let record = encode_packet(
        id::ANIMATE,
        &Animate {
            action: animate.action,
            runtime_entity_id: runtime_id,
        },
    );
    for viewer in viewers {
        if let Some(target) = ctx.sessions.get_by_addr(viewer) {
            target.send(vec![record.clone()]);
        }
    }
    true
}

pub fn handle_inventory_transaction(
    ctx: &ServerContext,
    session: &Arc<Session>,
    packet: GamePacket,
) -> bool {
    let GamePacket::InventoryTransaction(transaction) = packet else {
        return false;
    };

    if session.state().phase != Phase::Spawned {
        debug!("InventoryTransaction from {} before spawn", session.addr);
        return false;
    }

    match transaction.data {
        TransactionData::UseItem {
            action: UseItemAction::BreakBlock,
            block_position,
            ..
        } => {
            ctx.world.set_block(block_position, AIR_RUNTIME_ID);
            let record = encode_packet(
                id::UPDATE_BLOCK,
                &UpdateBlock::new(block_position, AIR_RUNTIME_ID),
            );
            for other in ctx.sessions.all() {
                if other.state().phase == Phase::Spawned {
                    other.send(vec![record.clone()]);
                }
            }
            debug!("{} broke block at {block_position}", session.addr);
        }
        TransactionData::UseItem {
            action: UseItemAction::ClickBlock,
            ..
        } => {
            // Block placing is not implemented in the session core.
            debug!("ignoring block placement from {}", session.addr);
        }
        _ => {}
    }
    true
}
