//! StartGame (0x0B) — Server → Client.

use bytes::BufMut;

use crate::codec::{write_string, Encode};
use crate::packets::GAME_VERSION;
use crate::types::{BlockPos, VarInt, VarLong, VarUInt32, VarUInt64, Vec2, Vec3};

/// World initialisation for the joining player.
#[derive(Debug, Clone)]
pub struct StartGame {
    pub entity_unique_id: i64,
    pub runtime_entity_id: u64,
    pub player_gamemode: i32,
    pub position: Vec3,
    /// Pitch, yaw.
    pub rotation: Vec2,
    pub seed: i32,
    pub dimension: i32,
    pub generator: i32,
    pub world_gamemode: i32,
    pub difficulty: i32,
    pub spawn_position: BlockPos,
    pub achievements_disabled: bool,
    pub day_cycle_stop_time: i32,
    pub rain_level: f32,
    pub lightning_level: f32,
    pub commands_enabled: bool,
    pub texture_packs_required: bool,
    pub level_id: String,
    pub world_name: String,
    pub current_tick: u64,
    pub enchantment_seed: i32,
}

impl StartGame {
    /// Baseline values for a flat overworld spawn; callers fill in the
    /// player-specific ids and positions.
    pub fn new(entity_unique_id: i64, runtime_entity_id: u64, position: Vec3) -> Self {
        Self {
            entity_unique_id,
            runtime_entity_id,
            player_gamemode: 0,
            position,
            rotation: Vec2::ZERO,
            seed: 0,
            dimension: 0,
            generator: 2, // flat
            world_gamemode: 0,
            difficulty: 1,
            spawn_position: BlockPos::from_vec3(&position),
            achievements_disabled: true,
            day_cycle_stop_time: -1,
            rain_level: 0.0,
            lightning_level: 0.0,
            commands_enabled: true,
            texture_packs_required: false,
            level_id: "level".into(),
            world_name: "world".into(),
            current_tick: 0,
            enchantment_seed: 0,
        }
    }
}

impl Encode for StartGame {
    fn encode(&self, buf: &mut impl BufMut) {
        VarLong(self.entity_unique_id).encode(buf);
        VarUInt64(self.runtime_entity_id).encode(buf);
        VarInt(self.player_gamemode).encode(buf);
        self.position.encode(buf);
        self.rotation.encode(buf);
        VarInt(self.seed).encode(buf);
        VarInt(self.dimension).encode(buf);
        VarInt(self.generator).encode(buf);
        VarInt(self.world_gamemode).encode(buf);
        VarInt(self.difficulty).encode(buf);
        self.spawn_position.encode(buf);
        buf.put_u8(self.achievements_disabled as u8);
        VarInt(self.day_cycle_stop_time).encode(buf);
        buf.put_f32_le(self.rain_level);
        buf.put_f32_le(self.lightning_level);
        buf.put_u8(self.commands_enabled as u8);
        buf.put_u8(self.texture_packs_required as u8);
        VarUInt32(0).encode(buf); // game rules
        write_string(buf, &self.level_id);
        write_string(buf, &self.world_name);
        write_string(buf, GAME_VERSION);
        buf.put_u64_le(self.current_tick);
        VarInt(self.enchantment_seed).encode(buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_contains_world_name_and_version() {
        let mut pkt = StartGame::new(1, 1, Vec3::new(0.5, 7.62, 0.5));
        pkt.world_name = "galena".into();
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        let encoded = &buf[..];
        assert!(encoded.windows(6).any(|w| w == b"galena"));
        assert!(encoded
            .windows(GAME_VERSION.len())
            .any(|w| w == GAME_VERSION.as_bytes()));
    }

    #[test]
    fn defaults_are_flat_overworld() {
        let pkt = StartGame::new(1, 1, Vec3::ZERO);
        assert_eq!(pkt.dimension, 0);
        assert_eq!(pkt.generator, 2);
        assert_eq!(pkt.day_cycle_stop_time, -1);
    }
}
