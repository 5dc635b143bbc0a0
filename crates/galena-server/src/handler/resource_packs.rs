//! Resource pack negotiation and the spawn kickoff.

use std::sync::Arc;

use tracing::{debug, info};

use galena_proto::batch::encode_packet;
use galena_proto::packets::{
    id, CraftingData, ResourcePackChunkData, ResourcePackStack, ResourcePackResponseStatus,
    StartGame,
};
use galena_proto::registry::GamePacket;
use galena_proto::types::ChunkPos;

use crate::packs::{strip_version, PACK_CHUNK_SIZE};
use crate::session::{Phase, Session};
use crate::ServerContext;

pub fn handle_client_response(
    ctx: &ServerContext,
    session: &Arc<Session>,
    packet: GamePacket,
) -> bool {
    let GamePacket::ResourcePackClientResponse(response) = packet else {
        return false;
    };

    {
        let state = session.state();
        if state.phase != Phase::AwaitingResourcePacks {
            debug!(
                "unexpected ResourcePackClientResponse from {} in {:?}",
                session.addr, state.phase
            );
            return false;
        }
    }

    match response.status {
        ResourcePackResponseStatus::Refused => {
            info!("{} refused the resource packs", session.addr);
            ctx.kick(session, "You must accept the resource packs to play.", false);
            true
        }
        ResourcePackResponseStatus::SendPacks => {
            let mut records = Vec::with_capacity(response.pack_ids.len());
            for pack_id in &response.pack_ids {
                let Some(pack) = ctx.packs.get(strip_version(pack_id)) else {
                    info!("{} requested unknown pack {pack_id}", session.addr);
                    ctx.kick(session, "Unknown resource pack requested.", false);
                    return true;
                };
                records.push(encode_packet(id::RESOURCE_PACK_DATA_INFO, &pack.data_info()));
            }
            session.send(records);
            true
        }
        ResourcePackResponseStatus::HaveAllPacks => {
            let stack = ResourcePackStack {
                must_accept: ctx.config.packs.force_resource_packs && !ctx.packs.is_empty(),
                behavior_packs: Vec::new(),
                resource_packs: ctx.packs.stack_entries(),
                experimental: false,
            };
            session.send(vec![encode_packet(id::RESOURCE_PACK_STACK, &stack)]);
            true
        }
        ResourcePackResponseStatus::Completed => {
            begin_spawn(ctx, session);
            true
        }
    }
}

/// Pack exchange is done: put the player entity into the world and ship the
/// world initialisation packets. StartGame must only go out once the spawn
/// chunk is actually loaded, so it is sent from the load callback.
fn begin_spawn(ctx: &ServerContext, session: &Arc<Session>) {
    let Some((entity_unique_id, runtime_id)) = session
        .player()
        .as_ref()
        .map(|p| (p.entity_unique_id(), p.runtime_id))
    else {
        debug!("spawn requested by {} before login", session.addr);
        return;
    };

    let spawn_point = ctx.world.spawn_point();
    ctx.world.load_chunk(ChunkPos::new(0, 0), |_chunk| {
        let mut start_game = StartGame::new(entity_unique_id, runtime_id, spawn_point);
        start_game.world_name = ctx.config.world.name.clone();
        start_game.level_id = ctx.config.world.name.clone();
        session.send(vec![
            encode_packet(id::START_GAME, &start_game),
            encode_packet(id::CRAFTING_DATA, &CraftingData::default()),
        ]);
    });

    session.state().phase = Phase::AwaitingChunkRadius;
    info!("sent world initialisation to {}", session.addr);
}

pub fn handle_chunk_request(
    ctx: &ServerContext,
    session: &Arc<Session>,
    packet: GamePacket,
) -> bool {
    let GamePacket::ResourcePackChunkRequest(request) = packet else {
        return false;
    };

    {
        let state = session.state();
        if state.phase != Phase::AwaitingResourcePacks {
            debug!(
                "unexpected ResourcePackChunkRequest from {} in {:?}",
                session.addr, state.phase
            );
            return false;
        }
    }

    let Some(pack) = ctx.packs.get(strip_version(&request.pack_id)) else {
        info!(
            "{} requested a chunk of unknown pack {}",
            session.addr, request.pack_id
        );
        ctx.kick(session, "Unknown resource pack requested.", false);
        return true;
    };

    let chunk = ResourcePackChunkData {
        pack_id: request.pack_id.clone(),
        chunk_index: request.chunk_index,
        progress: request.chunk_index as u64 * PACK_CHUNK_SIZE as u64,
        data: pack.chunk(request.chunk_index).to_vec(),
    };
    session.send(vec![encode_packet(id::RESOURCE_PACK_CHUNK_DATA, &chunk)]);
    debug!(
        "sent chunk {}/{} of pack {} to {}",
        request.chunk_index + 1,
        pack.chunk_count(),
        request.pack_id,
        session.addr
    );
    true
}
