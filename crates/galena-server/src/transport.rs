//! Transport interface between the session layer and the datagram carrier.
//!
//! The session layer only sees [`TransportEvent`]s and talks back through a
//! [`TransportHandle`]. Production deployments put a RakNet-style reliable
//! transport behind this interface; [`UdpTransport`] is the plain-UDP
//! development stand-in (one datagram per frame, reliability left to the
//! carrier).

use std::collections::HashSet;
use std::io;
use std::net::SocketAddr;

use bytes::Bytes;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Events delivered by the transport.
#[derive(Debug)]
pub enum TransportEvent {
    Connected { addr: SocketAddr },
    Disconnected { addr: SocketAddr },
    Payload { addr: SocketAddr, payload: Bytes },
}

/// Commands accepted by the transport.
#[derive(Debug)]
pub enum TransportCommand {
    Send { addr: SocketAddr, frame: Bytes },
    Close { addr: SocketAddr },
}

/// Cheap-to-clone sender used by sessions to reach the transport.
#[derive(Debug, Clone)]
pub struct TransportHandle {
    tx: mpsc::UnboundedSender<TransportCommand>,
}

impl TransportHandle {
    /// A handle plus the receiving end of its command stream.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TransportCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn send(&self, addr: SocketAddr, frame: Bytes) {
        let _ = self.tx.send(TransportCommand::Send { addr, frame });
    }

    pub fn close(&self, addr: SocketAddr) {
        let _ = self.tx.send(TransportCommand::Close { addr });
    }
}

/// Development transport: raw UDP, one datagram per frame.
pub struct UdpTransport {
    socket: UdpSocket,
    events: mpsc::UnboundedSender<TransportEvent>,
    commands: mpsc::UnboundedReceiver<TransportCommand>,
    known: HashSet<SocketAddr>,
}

impl UdpTransport {
    /// Bind and return the transport, its event stream and a handle to it.
    pub async fn bind(
        addr: SocketAddr,
    ) -> io::Result<(
        Self,
        mpsc::UnboundedReceiver<TransportEvent>,
        TransportHandle,
    )> {
        let socket = UdpSocket::bind(addr).await?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (handle, commands_rx) = TransportHandle::channel();
        Ok((
            Self {
                socket,
                events: events_tx,
                commands: commands_rx,
                known: HashSet::new(),
            },
            events_rx,
            handle,
        ))
    }

    /// Drive the socket until the command channel closes.
    pub async fn run(mut self) {
        let mut buf = vec![0u8; 65_535];
        loop {
            tokio::select! {
                received = self.socket.recv_from(&mut buf) => {
                    match received {
                        Ok((len, addr)) => {
                            if self.known.insert(addr) {
                                debug!("new connection from {addr}");
                                let _ = self.events.send(TransportEvent::Connected { addr });
                            }
                            let _ = self.events.send(TransportEvent::Payload {
                                addr,
                                payload: Bytes::copy_from_slice(&buf[..len]),
                            });
                        }
                        Err(e) => warn!("udp receive error: {e}"),
                    }
                }
                command = self.commands.recv() => {
                    match command {
                        Some(TransportCommand::Send { addr, frame }) => {
                            if let Err(e) = self.socket.send_to(&frame, addr).await {
                                warn!("udp send to {addr} failed: {e}");
                            }
                        }
                        Some(TransportCommand::Close { addr }) => {
                            if self.known.remove(&addr) {
                                let _ = self.events.send(TransportEvent::Disconnected { addr });
                            }
                        }
                        None => break,
                    }
                }
            }
        }
    }
}
