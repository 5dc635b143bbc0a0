//! PlayerAction (0x24) — Client → Server.

use bytes::{Buf, BufMut};

use crate::codec::{Decode, Encode};
use crate::error::ProtoError;
use crate::types::{BlockPos, VarInt, VarUInt64};

/// Action kinds the session machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerActionType {
    StartSprint,
    StopSprint,
    StartSneak,
    StopSneak,
    /// Any other action id; carried through for logging.
    Other(i32),
}

impl PlayerActionType {
    pub fn from_i32(v: i32) -> Self {
        match v {
            9 => Self::StartSprint,
            10 => Self::StopSprint,
            11 => Self::StartSneak,
            12 => Self::StopSneak,
            other => Self::Other(other),
        }
    }

    pub fn to_i32(self) -> i32 {
        match self {
            Self::StartSprint => 9,
            Self::StopSprint => 10,
            Self::StartSneak => 11,
            Self::StopSneak => 12,
            Self::Other(v) => v,
        }
    }
}

/// PlayerAction packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerAction {
    pub runtime_entity_id: u64,
    pub action: PlayerActionType,
    pub block_position: BlockPos,
    pub face: i32,
}

impl Encode for PlayerAction {
    fn encode(&self, buf: &mut impl BufMut) {
        VarUInt64(self.runtime_entity_id).encode(buf);
        VarInt(self.action.to_i32()).encode(buf);
        self.block_position.encode(buf);
        VarInt(self.face).encode(buf);
    }
}

impl Decode for PlayerAction {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            runtime_entity_id: VarUInt64::decode(buf)?.0,
            action: PlayerActionType::from_i32(VarInt::decode(buf)?.0),
            block_position: BlockPos::decode(buf)?,
            face: VarInt::decode(buf)?.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    fn roundtrip(action: PlayerActionType) -> PlayerAction {
        let pkt = PlayerAction {
            runtime_entity_id: 1,
            action,
            block_position: BlockPos::new(0, 0, 0),
            face: 1,
        };
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        PlayerAction::decode(&mut buf.freeze()).unwrap()
    }

    #[test]
    fn sneak_sprint_actions_map() {
        assert_eq!(roundtrip(PlayerActionType::StartSprint).action, PlayerActionType::StartSprint);
        assert_eq!(roundtrip(PlayerActionType::StopSprint).action, PlayerActionType::StopSprint);
        assert_eq!(roundtrip(PlayerActionType::StartSneak).action, PlayerActionType::StartSneak);
        assert_eq!(roundtrip(PlayerActionType::StopSneak).action, PlayerActionType::StopSneak);
    }

    #[test]
    fn unknown_action_carried_through() {
        assert_eq!(roundtrip(PlayerActionType::Other(99)).action, PlayerActionType::Other(99));
    }

    #[test]
    fn decode_truncated_rejected() {
        let data = [0x01u8];
        assert!(PlayerAction::decode(&mut &data[..]).is_err());
    }
}
