//! The player entity facade: identity, appearance, kinematics and the
//! viewer set consumed by the spawn and movement paths.

use std::collections::HashSet;
use std::net::SocketAddr;

use galena_proto::packets::metadata::{default_player_metadata, EntityMetadataEntry};
use galena_proto::packets::Skin;
use galena_proto::types::{Uuid, Vec3};

/// Per-player entity state. Lives inside its session and is mutated by the
/// handler table and the tick driver.
#[derive(Debug)]
pub struct Player {
    pub uuid: Uuid,
    pub xuid: String,
    pub platform: i32,
    pub username: String,
    pub display_name: String,
    pub skin: Skin,
    /// Server-assigned id, valid for the lifetime of the session.
    pub runtime_id: u64,
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
    pub on_ground: bool,
    movement_dirty: bool,
    entity_data_dirty: bool,
    flags: i64,
    viewers: HashSet<SocketAddr>,
}

impl Player {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        uuid: Uuid,
        xuid: String,
        platform: i32,
        name: String,
        skin: Skin,
        runtime_id: u64,
        position: Vec3,
    ) -> Self {
        Self {
            uuid,
            xuid,
            platform,
            display_name: name.clone(),
            username: name,
            skin,
            runtime_id,
            position,
            pitch: 0.0,
            yaw: 0.0,
            head_yaw: 0.0,
            on_ground: true,
            movement_dirty: false,
            entity_data_dirty: false,
            flags: 0,
            viewers: HashSet::new(),
        }
    }

    /// The signed form of the runtime id, used on the wire as the unique id.
    pub fn entity_unique_id(&self) -> i64 {
        self.runtime_id as i64
    }

    /// Accept a client movement update. Pitch and yaw are normalised modulo
    /// 360; head yaw is kept raw.
    pub fn sync_move(&mut self, position: Vec3, pitch: f32, yaw: f32, head_yaw: f32, on_ground: bool) {
        self.position = position;
        self.pitch = pitch % 360.0;
        self.yaw = yaw % 360.0;
        self.head_yaw = head_yaw;
        self.on_ground = on_ground;
        self.movement_dirty = true;
    }

    /// Set or clear one entity flag bit, marking entity data dirty on change.
    pub fn set_flag(&mut self, bit: u8, on: bool) {
        let mask = 1i64 << bit;
        let next = if on {
            self.flags | mask
        } else {
            self.flags & !mask
        };
        if next != self.flags {
            self.flags = next;
            self.entity_data_dirty = true;
        }
    }

    pub fn has_flag(&self, bit: u8) -> bool {
        self.flags & (1i64 << bit) != 0
    }

    /// Current metadata snapshot for AddPlayer / SetEntityData.
    pub fn metadata(&self) -> Vec<EntityMetadataEntry> {
        default_player_metadata(&self.display_name, self.flags)
    }

    pub fn add_viewer(&mut self, addr: SocketAddr) {
        self.viewers.insert(addr);
    }

    pub fn remove_viewer(&mut self, addr: SocketAddr) {
        self.viewers.remove(&addr);
    }

    pub fn viewers(&self) -> impl Iterator<Item = SocketAddr> + '_ {
        self.viewers.iter().copied()
    }

    pub fn has_viewer(&self, addr: SocketAddr) -> bool {
        self.viewers.contains(&addr)
    }

    pub fn take_movement_dirty(&mut self) -> bool {
        std::mem::take(&mut self.movement_dirty)
    }

    pub fn take_entity_data_dirty(&mut self) -> bool {
        std::mem::take(&mut self.entity_data_dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galena_proto::packets::metadata::entity_flags;

    fn test_player() -> Player {
        Player::new(
            Uuid::new(1, 2),
            "12345".into(),
            7,
            "Steve".into(),
            Skin::default(),
            1,
            Vec3::new(0.5, 7.0, 0.5),
        )
    }

    #[test]
    fn sync_move_normalises_rotation() {
        let mut player = test_player();
        player.sync_move(Vec3::new(1.0, 7.0, 1.0), 400.0, -370.0, 725.0, false);
        assert_eq!(player.pitch, 40.0);
        assert_eq!(player.yaw, -10.0);
        assert_eq!(player.head_yaw, 725.0); // kept raw
        assert!(!player.on_ground);
        assert!(player.take_movement_dirty());
        assert!(!player.take_movement_dirty());
    }

    #[test]
    fn flags_mark_entity_data_dirty_once() {
        let mut player = test_player();
        player.set_flag(entity_flags::SNEAKING, true);
        assert!(player.has_flag(entity_flags::SNEAKING));
        assert!(player.take_entity_data_dirty());

        // Setting the same value again is not a change.
        player.set_flag(entity_flags::SNEAKING, true);
        assert!(!player.take_entity_data_dirty());

        player.set_flag(entity_flags::SNEAKING, false);
        assert!(!player.has_flag(entity_flags::SNEAKING));
        assert!(player.take_entity_data_dirty());
    }

    #[test]
    fn viewer_set_add_remove() {
        let mut player = test_player();
        let addr: SocketAddr = "127.0.0.1:40001".parse().unwrap();
        player.add_viewer(addr);
        assert!(player.has_viewer(addr));
        assert_eq!(player.viewers().count(), 1);
        player.remove_viewer(addr);
        assert!(!player.has_viewer(addr));
    }

    #[test]
    fn metadata_carries_flags_and_name() {
        let mut player = test_player();
        player.set_flag(entity_flags::SPRINTING, true);
        let meta = player.metadata();
        assert!(!meta.is_empty());
    }
}
