//! Concurrent multi-index session registry.
//!
//! One reader-writer lock guards all four indices, so an add or remove
//! updates every index atomically: a live session is always reachable under
//! its name, UUID, XUID and transport address, and under nothing else.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use galena_proto::types::Uuid;

use crate::session::Session;

/// The lookup keys a session is registered under.
#[derive(Debug, Clone)]
pub struct SessionKeys {
    pub name: String,
    pub uuid: Uuid,
    pub xuid: String,
}

struct Entry {
    keys: SessionKeys,
    session: Arc<Session>,
}

#[derive(Default)]
struct Indexes {
    by_addr: HashMap<SocketAddr, Entry>,
    by_name: HashMap<String, SocketAddr>,
    by_uuid: HashMap<Uuid, SocketAddr>,
    by_xuid: HashMap<String, SocketAddr>,
}

/// Registry of logged-in sessions.
#[derive(Default)]
pub struct SessionManager {
    inner: RwLock<Indexes>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under all four keys.
    pub fn add(&self, keys: SessionKeys, session: Arc<Session>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let addr = session.addr;
        inner.by_name.insert(keys.name.clone(), addr);
        inner.by_uuid.insert(keys.uuid, addr);
        inner.by_xuid.insert(keys.xuid.clone(), addr);
        inner.by_addr.insert(addr, Entry { keys, session });
    }

    /// Remove a session by transport address, dropping it from every index.
    pub fn remove(&self, addr: SocketAddr) -> Option<Arc<Session>> {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let entry = inner.by_addr.remove(&addr)?;
        inner.by_name.remove(&entry.keys.name);
        inner.by_uuid.remove(&entry.keys.uuid);
        inner.by_xuid.remove(&entry.keys.xuid);
        Some(entry.session)
    }

    pub fn get_by_addr(&self, addr: SocketAddr) -> Option<Arc<Session>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.by_addr.get(&addr).map(|e| Arc::clone(&e.session))
    }

    pub fn get_by_name(&self, name: &str) -> Option<Arc<Session>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let addr = inner.by_name.get(name)?;
        inner.by_addr.get(addr).map(|e| Arc::clone(&e.session))
    }

    pub fn get_by_uuid(&self, uuid: Uuid) -> Option<Arc<Session>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let addr = inner.by_uuid.get(&uuid)?;
        inner.by_addr.get(addr).map(|e| Arc::clone(&e.session))
    }

    pub fn get_by_xuid(&self, xuid: &str) -> Option<Arc<Session>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let addr = inner.by_xuid.get(xuid)?;
        inner.by_addr.get(addr).map(|e| Arc::clone(&e.session))
    }

    pub fn has_addr(&self, addr: SocketAddr) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .by_addr
            .contains_key(&addr)
    }

    pub fn has_name(&self, name: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .by_name
            .contains_key(name)
    }

    pub fn has_uuid(&self, uuid: Uuid) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .by_uuid
            .contains_key(&uuid)
    }

    pub fn has_xuid(&self, xuid: &str) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .by_xuid
            .contains_key(xuid)
    }

    pub fn count(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .by_addr
            .len()
    }

    /// Snapshot of every registered session.
    pub fn all(&self) -> Vec<Arc<Session>> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .by_addr
            .values()
            .map(|e| Arc::clone(&e.session))
            .collect()
    }
}
