//! Minimal world collaborator: holds the spawn chunk area and block
//! overrides. The session layer only ever loads the spawn chunk and sets
//! single blocks; everything else belongs to a real world subsystem.

use std::collections::HashMap;
use std::sync::Mutex;

use galena_proto::types::{BlockPos, ChunkPos, Vec3};

/// Runtime id of air.
pub const AIR_RUNTIME_ID: u32 = 0;
/// Runtime id of the flat-world surface block.
pub const GRASS_RUNTIME_ID: u32 = 2;
/// Runtime id of the flat-world filler block.
pub const DIRT_RUNTIME_ID: u32 = 3;
/// Runtime id of the flat-world floor block.
pub const BEDROCK_RUNTIME_ID: u32 = 7;

/// Height of the flat terrain surface.
const SURFACE_Y: i32 = 4;

/// One 16x16 column: a flat base plus sparse overrides.
#[derive(Debug, Default)]
pub struct Chunk {
    overrides: HashMap<(i32, i32, i32), u32>,
}

impl Chunk {
    fn base_block(y: i32) -> u32 {
        match y {
            0 => BEDROCK_RUNTIME_ID,
            y if y < SURFACE_Y => DIRT_RUNTIME_ID,
            y if y == SURFACE_Y => GRASS_RUNTIME_ID,
            _ => AIR_RUNTIME_ID,
        }
    }

    pub fn block_at(&self, x: i32, y: i32, z: i32) -> u32 {
        self.overrides
            .get(&(x, y, z))
            .copied()
            .unwrap_or_else(|| Self::base_block(y))
    }

    pub fn set_block(&mut self, x: i32, y: i32, z: i32, runtime_id: u32) {
        self.overrides.insert((x, y, z), runtime_id);
    }
}

/// The world facade used by the spawn and block-break paths.
pub struct World {
    spawn_point: Vec3,
    chunks: Mutex<HashMap<ChunkPos, Chunk>>,
}

impl World {
    pub fn new(spawn_point: Vec3) -> Self {
        Self {
            spawn_point,
            chunks: Mutex::new(HashMap::new()),
        }
    }

    pub fn spawn_point(&self) -> Vec3 {
        self.spawn_point
    }

    /// Ensure the chunk is loaded and run `f` with it. The callback runs
    /// only once the chunk exists; spawn sequencing relies on that.
    pub fn load_chunk<R>(&self, pos: ChunkPos, f: impl FnOnce(&Chunk) -> R) -> R {
        let mut chunks = self.chunks.lock().unwrap_or_else(|e| e.into_inner());
        let chunk = chunks.entry(pos).or_default();
        f(chunk)
    }

    /// Set a block, loading the containing chunk if needed.
    pub fn set_block(&self, pos: BlockPos, runtime_id: u32) {
        let mut chunks = self.chunks.lock().unwrap_or_else(|e| e.into_inner());
        chunks
            .entry(pos.chunk_pos())
            .or_default()
            .set_block(pos.x, pos.y, pos.z, runtime_id);
    }

    pub fn block_at(&self, pos: BlockPos) -> u32 {
        let mut chunks = self.chunks.lock().unwrap_or_else(|e| e.into_inner());
        chunks
            .entry(pos.chunk_pos())
            .or_default()
            .block_at(pos.x, pos.y, pos.z)
    }
}
