//! Resource pack store: UUID → pack bytes plus transfer metadata.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use galena_proto::packets::{PackInfoEntry, ResourcePackDataInfo, StackPackEntry};

/// Packs are streamed to clients in chunks of this size.
pub const PACK_CHUNK_SIZE: usize = 1_048_576;

/// One loaded pack archive.
pub struct ResourcePack {
    pub uuid: String,
    pub version: String,
    data: Vec<u8>,
    sha256_hex: String,
}

impl ResourcePack {
    pub fn new(uuid: impl Into<String>, version: impl Into<String>, data: Vec<u8>) -> Self {
        let digest = Sha256::digest(&data);
        let sha256_hex = digest.iter().map(|b| format!("{b:02x}")).collect();
        Self {
            uuid: uuid.into(),
            version: version.into(),
            data,
            sha256_hex,
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn chunk_count(&self) -> u32 {
        self.data.len().div_ceil(PACK_CHUNK_SIZE) as u32
    }

    /// One chunk of pack data; empty for an out-of-range index.
    pub fn chunk(&self, index: u32) -> &[u8] {
        let start = index as usize * PACK_CHUNK_SIZE;
        if start >= self.data.len() {
            return &[];
        }
        let end = (start + PACK_CHUNK_SIZE).min(self.data.len());
        &self.data[start..end]
    }

    /// The wire id form: `uuid_version`.
    pub fn wire_id(&self) -> String {
        format!("{}_{}", self.uuid, self.version)
    }

    pub fn data_info(&self) -> ResourcePackDataInfo {
        ResourcePackDataInfo {
            pack_id: self.wire_id(),
            max_chunk_size: PACK_CHUNK_SIZE as u32,
            chunk_count: self.chunk_count(),
            pack_size: self.size(),
            pack_hash: self.sha256_hex.clone(),
        }
    }
}

/// All packs the server offers, keyed by UUID.
#[derive(Default)]
pub struct PackStore {
    packs: HashMap<String, ResourcePack>,
}

impl PackStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load `<uuid>.mcpack` archives from a directory. A missing directory
    /// yields an empty store.
    pub fn load_dir(path: impl AsRef<Path>) -> io::Result<Self> {
        let mut store = Self::empty();
        let dir = match std::fs::read_dir(path.as_ref()) {
            Ok(dir) => dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(store),
            Err(e) => return Err(e),
        };
        for entry in dir {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("mcpack") {
                continue;
            }
            let Some(uuid) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match std::fs::read(&path) {
                Ok(data) => {
                    info!("loaded resource pack {uuid} ({} bytes)", data.len());
                    store.register(ResourcePack::new(uuid, "1.0.0", data));
                }
                Err(e) => warn!("failed to read pack {}: {e}", path.display()),
            }
        }
        Ok(store)
    }

    pub fn register(&mut self, pack: ResourcePack) {
        self.packs.insert(pack.uuid.clone(), pack);
    }

    pub fn is_loaded(&self, uuid: &str) -> bool {
        self.packs.contains_key(uuid)
    }

    pub fn get(&self, uuid: &str) -> Option<&ResourcePack> {
        self.packs.get(uuid)
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// Entries for ResourcePacksInfo.
    pub fn info_entries(&self) -> Vec<PackInfoEntry> {
        self.packs
            .values()
            .map(|pack| PackInfoEntry {
                uuid: pack.uuid.clone(),
                version: pack.version.clone(),
                size: pack.size(),
            })
            .collect()
    }

    /// Entries for ResourcePackStack.
    pub fn stack_entries(&self) -> Vec<StackPackEntry> {
        self.packs
            .values()
            .map(|pack| StackPackEntry {
                uuid: pack.uuid.clone(),
                version: pack.version.clone(),
                sub_pack_name: String::new(),
            })
            .collect()
    }
}

/// Requests may carry `uuid_version`; indices are by bare UUID.
pub fn strip_version(pack_id: &str) -> &str {
    pack_id.split('_').next().unwrap_or(pack_id)
}
