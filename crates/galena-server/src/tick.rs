//! The shared 20 Hz tick driver.
//!
//! Each tick visits every spawned session: entity-data updates go out to the
//! viewer set when dirty, and movement is broadcast to the viewer set
//! unconditionally.

use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use galena_proto::batch::encode_packet;
use galena_proto::packets::{id, MovePlayer, SetEntityData};

use crate::session::Phase;
use crate::ServerContext;

/// Tick cadence: 20 Hz.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Run one tick over all spawned sessions.
pub fn tick_once(ctx: &ServerContext) {
    ctx.current_tick.fetch_add(1, Ordering::Relaxed);

    for session in ctx.sessions.all() {
        if session.state().phase != Phase::Spawned {
            continue;
        }

        let (entity_data, movement, viewers) = {
            let mut guard = session.player_mut();
            let Some(player) = guard.as_mut() else {
                continue;
            };

            let entity_data = player.take_entity_data_dirty().then(|| {
                encode_packet(
                    id::SET_ENTITY_DATA,
                    &SetEntityData {
                        runtime_entity_id: player.runtime_id,
                        metadata: player.metadata(),
                    },
                )
            });
            player.take_movement_dirty();
            let movement = encode_packet(
                id::MOVE_PLAYER,
                &MovePlayer::normal(
                    player.runtime_id,
                    player.position,
                    player.pitch,
                    player.yaw,
                    player.head_yaw,
                    player.on_ground,
                ),
            );
            let viewers: Vec<SocketAddr> = player.viewers().collect();
            (entity_data, movement, viewers)
        };

        for viewer in viewers {
            let Some(target) = ctx.sessions.get_by_addr(viewer) else {
                continue; // viewer disconnected mid-tick
            };
            if let Some(record) = &entity_data {
                target.queue([record.clone()]);
            }
            target.send(vec![movement.clone()]);
        }
    }
}

/// Drive ticks forever at [`TICK_INTERVAL`].
pub async fn run(ctx: Arc<ServerContext>) {
    let mut interval = tokio::time::interval(TICK_INTERVAL);
    loop {
        interval.tick().await;
        tick_once(&ctx);
    }
}
