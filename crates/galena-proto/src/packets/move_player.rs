//! MovePlayer (0x13) — Bidirectional.
//!
//! The client reports its own movement; the server broadcasts other players'
//! movement and issues position corrections.

use bytes::{Buf, BufMut};

use crate::codec::{Decode, Encode};
use crate::error::ProtoError;
use crate::types::{VarUInt64, Vec3};

/// Movement mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MoveMode {
    Normal = 0,
    Reset = 1,
    Teleport = 2,
    Rotation = 3,
}

impl MoveMode {
    fn from_u8(v: u8) -> Result<Self, ProtoError> {
        match v {
            0 => Ok(Self::Normal),
            1 => Ok(Self::Reset),
            2 => Ok(Self::Teleport),
            3 => Ok(Self::Rotation),
            _ => Err(ProtoError::InvalidData(format!(
                "unknown MovePlayer mode: {v}"
            ))),
        }
    }
}

/// MovePlayer packet.
#[derive(Debug, Clone, PartialEq)]
pub struct MovePlayer {
    pub runtime_entity_id: u64,
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub head_yaw: f32,
    pub mode: MoveMode,
    pub on_ground: bool,
    pub ridden_runtime_id: u64,
}

impl MovePlayer {
    /// Broadcast packet for a player's normal movement.
    pub fn normal(
        runtime_entity_id: u64,
        position: Vec3,
        pitch: f32,
        yaw: f32,
        head_yaw: f32,
        on_ground: bool,
    ) -> Self {
        Self {
            runtime_entity_id,
            position,
            pitch,
            yaw,
            head_yaw,
            mode: MoveMode::Normal,
            on_ground,
            ridden_runtime_id: 0,
        }
    }
}

impl Encode for MovePlayer {
    fn encode(&self, buf: &mut impl BufMut) {
        VarUInt64(self.runtime_entity_id).encode(buf);
        self.position.encode(buf);
        buf.put_f32_le(self.pitch);
        buf.put_f32_le(self.yaw);
        buf.put_f32_le(self.head_yaw);
        buf.put_u8(self.mode as u8);
        buf.put_u8(self.on_ground as u8);
        VarUInt64(self.ridden_runtime_id).encode(buf);
    }
}

impl Decode for MovePlayer {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let runtime_entity_id = VarUInt64::decode(buf)?.0;
        let position = Vec3::decode(buf)?;
        if buf.remaining() < 14 {
            return Err(ProtoError::BufferTooShort {
                needed: 14,
                remaining: buf.remaining(),
            });
        }
        let pitch = buf.get_f32_le();
        let yaw = buf.get_f32_le();
        let head_yaw = buf.get_f32_le();
        let mode = MoveMode::from_u8(buf.get_u8())?;
        let on_ground = buf.get_u8() != 0;
        let ridden_runtime_id = VarUInt64::decode(buf)?.0;

        Ok(Self {
            runtime_entity_id,
            position,
            pitch,
            yaw,
            head_yaw,
            mode,
            on_ground,
            ridden_runtime_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn roundtrip_normal() {
        let pkt = MovePlayer::normal(7, Vec3::new(10.0, 65.0, 20.0), -5.0, 90.0, 88.0, true);
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(MovePlayer::decode(&mut buf.freeze()).unwrap(), pkt);
    }

    #[test]
    fn roundtrip_reset() {
        let pkt = MovePlayer {
            mode: MoveMode::Reset,
            ..MovePlayer::normal(1, Vec3::new(0.5, 7.62, 0.5), 0.0, 0.0, 0.0, true)
        };
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(MovePlayer::decode(&mut buf.freeze()).unwrap().mode, MoveMode::Reset);
    }

    #[test]
    fn decode_rejects_unknown_mode() {
        let pkt = MovePlayer::normal(1, Vec3::ZERO, 0.0, 0.0, 0.0, false);
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        let mut raw = buf.to_vec();
        // mode byte sits after runtime id (1) + position (12) + rotations (12)
        raw[25] = 9;
        assert!(MovePlayer::decode(&mut &raw[..]).is_err());
    }
}
