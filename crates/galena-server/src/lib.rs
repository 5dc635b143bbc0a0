//! Session layer of a Bedrock Edition server: accepts transport payloads,
//! authenticates clients, frames encrypted/compressed batches and drives each
//! player from handshake to in-world spawn.

pub mod config;
pub mod fanout;
pub mod handler;
pub mod packs;
pub mod player;
pub mod session;
pub mod session_manager;
pub mod tick;
pub mod transport;
pub mod world;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::{debug, info};

use galena_proto::registry::PacketRegistry;
use galena_proto::types::Vec3;

use crate::config::ServerConfig;
use crate::handler::HandlerTable;
use crate::packs::PackStore;
use crate::session::{Phase, Session};
use crate::session_manager::SessionManager;
use crate::transport::{TransportEvent, TransportHandle};
use crate::world::World;

/// Shared server state handed to every handler invocation.
pub struct ServerContext {
    pub config: ServerConfig,
    pub registry: PacketRegistry,
    pub handlers: HandlerTable,
    pub sessions: SessionManager,
    pub world: World,
    pub packs: PackStore,
    pub transport: TransportHandle,
    pub current_tick: AtomicU64,
    next_entity_id: AtomicU64,
}

impl ServerContext {
    pub fn new(config: ServerConfig, packs: PackStore, transport: TransportHandle) -> Arc<Self> {
        Arc::new(Self {
            config,
            registry: PacketRegistry::latest(),
            handlers: HandlerTable::default(),
            sessions: SessionManager::new(),
            world: World::new(Vec3::new(0.5, 7.0, 0.5)),
            packs,
            transport,
            current_tick: AtomicU64::new(0),
            next_entity_id: AtomicU64::new(1),
        })
    }

    /// Allocate a fresh runtime entity id.
    pub fn allocate_entity_id(&self) -> u64 {
        self.next_entity_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Create a session for a transport address. Its phase advances from
    /// [`Phase::Unconnected`] once the transport link is confirmed.
    pub fn open_session(&self, addr: SocketAddr) -> Arc<Session> {
        Session::new(
            addr,
            self.transport.clone(),
            self.config.network.compression_level,
        )
    }

    /// Kick: enqueue the disconnect packet, then take the session out of the
    /// world. Handlers hitting the removed session afterwards are no-ops.
    pub fn kick(&self, session: &Arc<Session>, message: &str, hide_screen: bool) {
        info!("kicking {}: {message}", session.addr);
        session.disconnect(message, hide_screen);
        self.finish_disconnect(session);
    }

    /// Cleanup for a session that is gone (kicked, timed out or dropped by
    /// the transport).
    pub fn drop_session(&self, session: &Arc<Session>) {
        self.transport.close(session.addr);
        self.finish_disconnect(session);
    }

    fn finish_disconnect(&self, session: &Arc<Session>) {
        let was_connected = session.state().connected;
        self.sessions.remove(session.addr);
        if was_connected {
            fanout::broadcast_leave(self, session);
        }
    }
}

struct Pump {
    session: Arc<Session>,
    tx: mpsc::UnboundedSender<Bytes>,
}

/// The server router: owns pre-login sessions, spawns one pump task per
/// connection and the shared tick driver.
pub struct Server {
    ctx: Arc<ServerContext>,
    pumps: HashMap<SocketAddr, Pump>,
}

impl Server {
    pub fn new(ctx: Arc<ServerContext>) -> Self {
        Self {
            ctx,
            pumps: HashMap::new(),
        }
    }

    pub fn context(&self) -> &Arc<ServerContext> {
        &self.ctx
    }

    /// Route transport events until the stream closes.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<TransportEvent>) {
        tokio::spawn(tick::run(Arc::clone(&self.ctx)));

        while let Some(event) = events.recv().await {
            match event {
                TransportEvent::Connected { addr } => {
                    self.accept(addr);
                }
                TransportEvent::Payload { addr, payload } => {
                    // Sessions come into being with the first payload from an
                    // unknown transport handle.
                    if !self.pumps.contains_key(&addr) {
                        self.accept(addr);
                    }
                    if let Some(pump) = self.pumps.get(&addr) {
                        let _ = pump.tx.send(payload);
                    }
                }
                TransportEvent::Disconnected { addr } => {
                    if let Some(pump) = self.pumps.remove(&addr) {
                        debug!("transport dropped {addr}");
                        self.ctx.drop_session(&pump.session);
                    }
                }
            }
        }
    }

    fn accept(&mut self, addr: SocketAddr) {
        let session = self.ctx.open_session(addr);
        session.state().phase = Phase::AwaitingLogin;

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(pump_session(
            Arc::clone(&self.ctx),
            Arc::clone(&session),
            rx,
            Duration::from_secs(self.ctx.config.network.idle_timeout_secs),
        ));
        self.pumps.insert(addr, Pump { session, tx });
        debug!("session opened for {addr}");
    }
}

/// Per-session inbound pump: drains frames in order and runs the handlers
/// synchronously, so no two handlers of one session ever overlap. Sessions
/// idle past the grace period are evicted.
async fn pump_session(
    ctx: Arc<ServerContext>,
    session: Arc<Session>,
    mut rx: mpsc::UnboundedReceiver<Bytes>,
    idle_timeout: Duration,
) {
    loop {
        match tokio::time::timeout(idle_timeout, rx.recv()).await {
            Ok(Some(frame)) => session.handle_frame(&ctx, &frame),
            Ok(None) => break, // router dropped the connection
            Err(_) => {
                info!("evicting idle session {}", session.addr);
                ctx.kick(&session, "Connection timed out.", true);
                break;
            }
        }
    }
}
