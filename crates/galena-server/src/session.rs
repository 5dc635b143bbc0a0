//! Per-client session: protocol phase, identity, ciphers and the inbound
//! frame path.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::Bytes;
use tracing::{debug, error, warn};

use galena_crypto::{BatchDecryptor, BatchEncryptor};
use galena_proto::batch;
use galena_proto::codec::Encode;
use galena_proto::error::ProtoError;
use galena_proto::types::Uuid;

use crate::player::Player;
use crate::transport::TransportHandle;
use crate::ServerContext;

/// Protocol phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Session object exists; nothing received yet.
    Unconnected,
    /// Transport link is up; the Login packet is expected next.
    AwaitingLogin,
    /// ServerHandshake sent; waiting for the encrypted ClientHandshake.
    AwaitingHandshake,
    /// Login accepted; resource pack negotiation in progress.
    AwaitingResourcePacks,
    /// World initialisation sent; waiting for RequestChunkRadius.
    AwaitingChunkRadius,
    /// Fully in-world.
    Spawned,
}

/// Mutable session state behind the state lock.
#[derive(Debug)]
pub struct SessionState {
    pub phase: Phase,
    pub name: String,
    pub xuid: String,
    pub uuid: Uuid,
    pub device_os: i32,
    pub protocol: i32,
    pub view_distance: i32,
    /// Set when the spawn sequence completes.
    pub connected: bool,
    pub decryptor: Option<BatchDecryptor>,
}

struct OutboundQueue {
    records: Vec<Bytes>,
    encryptor: Option<BatchEncryptor>,
    compression_level: u32,
}

/// One connected client.
///
/// Lock order within a session: state, then player, then outbound. Two
/// session states are never locked at once.
pub struct Session {
    pub addr: SocketAddr,
    transport: TransportHandle,
    state: Mutex<SessionState>,
    player: RwLock<Option<Player>>,
    outbound: Mutex<OutboundQueue>,
}

impl Session {
    pub fn new(addr: SocketAddr, transport: TransportHandle, compression_level: u32) -> Arc<Self> {
        Arc::new(Self {
            addr,
            transport,
            state: Mutex::new(SessionState {
                phase: Phase::Unconnected,
                name: String::new(),
                xuid: String::new(),
                uuid: Uuid::ZERO,
                device_os: 0,
                protocol: 0,
                view_distance: 0,
                connected: false,
                decryptor: None,
            }),
            player: RwLock::new(None),
            outbound: Mutex::new(OutboundQueue {
                records: Vec::new(),
                encryptor: None,
                compression_level,
            }),
        })
    }

    pub fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn player(&self) -> RwLockReadGuard<'_, Option<Player>> {
        self.player.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn player_mut(&self) -> RwLockWriteGuard<'_, Option<Player>> {
        self.player.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_player(&self, player: Player) {
        *self.player_mut() = Some(player);
    }

    /// Queue encoded records without flushing.
    pub fn queue(&self, records: impl IntoIterator<Item = Bytes>) {
        let mut out = self.outbound.lock().unwrap_or_else(|e| e.into_inner());
        out.records.extend(records);
    }

    /// Emit everything queued so far as a single batch.
    pub fn flush(&self) {
        let frame = {
            let mut out = self.outbound.lock().unwrap_or_else(|e| e.into_inner());
            if out.records.is_empty() {
                return;
            }
            let records = std::mem::take(&mut out.records);
            let body = match batch::encode_batch(&records, out.compression_level) {
                Ok(body) => body,
                Err(e) => {
                    error!("failed to encode batch for {}: {e}", self.addr);
                    return;
                }
            };
            let body = match out.encryptor.as_mut() {
                Some(enc) => enc.encrypt(&body),
                None => body,
            };
            batch::add_marker(&body)
        };
        self.transport.send(self.addr, frame);
    }

    /// Queue records and emit them as one batch.
    pub fn send(&self, records: Vec<Bytes>) {
        self.queue(records);
        self.flush();
    }

    /// Convenience: send a single packet as its own batch.
    pub fn send_packet(&self, packet_id: u8, packet: &impl Encode) {
        self.send(vec![batch::encode_packet(packet_id, packet)]);
    }

    /// Install both cipher directions. Call only after the handshake batch
    /// has been flushed; everything sent or received afterwards is encrypted.
    pub fn enable_encryption(&self, secret: &[u8; 32], iv: &[u8; 16]) {
        self.outbound
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .encryptor = Some(BatchEncryptor::new(secret, iv));
        self.state().decryptor = Some(BatchDecryptor::new(secret, iv));
    }

    /// Whether the cipher layer is active.
    pub fn encryption_enabled(&self) -> bool {
        self.state().decryptor.is_some()
    }

    /// Process one raw frame from the transport: strip the marker, decrypt,
    /// inflate, split and dispatch every record through the handler table.
    ///
    /// Malformed frames and batches are dropped without touching the session;
    /// the transport's reliability layer is expected to recover.
    pub fn handle_frame(self: &Arc<Self>, ctx: &ServerContext, frame: &[u8]) {
        let body = match batch::strip_marker(frame) {
            Ok(body) => body,
            Err(e) => {
                debug!("dropping frame from {}: {e}", self.addr);
                return;
            }
        };

        let plain = {
            let mut state = self.state();
            match state.decryptor.as_mut() {
                Some(decryptor) => match decryptor.decrypt(body) {
                    Ok(plain) => plain,
                    Err(e) => {
                        warn!("dropping batch from {}: {e}", self.addr);
                        return;
                    }
                },
                None => Bytes::copy_from_slice(body),
            }
        };

        let records = match batch::decode_batch(&plain) {
            Ok(records) => records,
            Err(e) => {
                debug!("dropping undecodable batch from {}: {e}", self.addr);
                return;
            }
        };

        for record in records {
            let packet = match ctx.registry.decode(&record) {
                Ok(packet) => packet,
                Err(ProtoError::UnknownPacketId(id)) => {
                    debug!("unknown game packet 0x{id:02X} from {}", self.addr);
                    continue;
                }
                Err(e) => {
                    debug!("bad game packet from {}: {e}", self.addr);
                    continue;
                }
            };

            let packet_id = packet.id();
            let handled = ctx.handlers.dispatch(ctx, self, packet);
            if !handled {
                debug!("unhandled game packet 0x{packet_id:02X} from {}", self.addr);
            }
            // One batch per handler invocation, in enqueue order.
            self.flush();
        }
    }

    /// Send a Disconnect packet and close the transport link.
    pub fn disconnect(&self, message: &str, hide_screen: bool) {
        let packet = if hide_screen {
            galena_proto::packets::Disconnect::silent()
        } else {
            galena_proto::packets::Disconnect::with_message(message)
        };
        self.send_packet(galena_proto::packets::id::DISCONNECT, &packet);
        self.transport.close(self.addr);
    }
}
