//! Handler table: drives the protocol state machine.
//!
//! Handlers are synchronous, run on the session's pump task, and report
//! whether they consumed the packet. They mutate the session and player and
//! queue outbound packets; they never touch the transport directly.

mod login;
mod play;
mod resource_packs;

use std::collections::HashMap;
use std::sync::Arc;

use galena_proto::packets::id;
use galena_proto::registry::GamePacket;

use crate::session::Session;
use crate::ServerContext;

/// One registered packet handler.
pub type HandlerFn = fn(&ServerContext, &Arc<Session>, GamePacket) -> bool;

/// Maps packet ids to handlers.
pub struct HandlerTable {
    handlers: HashMap<u8, HandlerFn>,
}

impl HandlerTable {
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, packet_id: u8, handler: HandlerFn) {
        self.handlers.insert(packet_id, handler);
    }

    pub fn is_registered(&self, packet_id: u8) -> bool {
        self.handlers.contains_key(&packet_id)
    }

    /// Dispatch a packet to its handler. Unregistered packets are unhandled.
    pub fn dispatch(&self, ctx: &ServerContext, session: &Arc<Session>, packet: GamePacket) -> bool {
        match self.handlers.get(&packet.id()) {
            Some(handler) => handler(ctx, session, packet),
            None => false,
        }
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.register(id::LOGIN, login::handle_login);
        table.register(id::CLIENT_HANDSHAKE, login::handle_client_handshake);
        table.register(
            id::RESOURCE_PACK_CLIENT_RESPONSE,
            resource_packs::handle_client_response,
        );
        table.register(
            id::RESOURCE_PACK_CHUNK_REQUEST,
            resource_packs::handle_chunk_request,
        );
        table.register(id::REQUEST_CHUNK_RADIUS, play::handle_request_chunk_radius);
        table.register(id::MOVE_PLAYER, play::handle_move_player);
        table.register(id::TEXT, play::handle_text);
        table.register(id::PLAYER_ACTION, play::handle_player_action);
        table.register(id::ANIMATE, play::handle_animate);
        table.register(
            id::INVENTORY_TRANSACTION,
            play::handle_inventory_transaction,
        );
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_covers_inbound_set() {
        let table = HandlerTable::default();
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
            assert!(table.is_registered(packet_id), "0x{packet_id:02X}");
        }
        assert!(!table.is_registered(id::PLAY_STATUS));
    }
}
