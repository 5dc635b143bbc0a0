//! PlayStatus (0x02) — Server → Client.

use bytes::{Buf, BufMut};

use crate::codec::{Decode, Encode};
use crate::error::ProtoError;

/// Status codes for the PlayStatus packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PlayStatusType {
    /// Login accepted.
    LoginSuccess = 0,
    /// Client is too old.
    FailedClient = 1,
    /// Server is too old.
    FailedServer = 2,
    /// Player may spawn into the world.
    PlayerSpawn = 3,
}

/// Sent by the server to report login progress or spawn readiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayStatus {
    pub status: PlayStatusType,
}

impl PlayStatus {
    pub fn new(status: PlayStatusType) -> Self {
        Self { status }
    }
}

impl Encode for PlayStatus {
    fn encode(&self, buf: &mut impl BufMut) {
        buf.put_i32(self.status as i32); // BE
    }
}

impl Decode for PlayStatus {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        if buf.remaining() < 4 {
            return Err(ProtoError::BufferTooShort {
                needed: 4,
                remaining: buf.remaining(),
            });
        }
        let status = match buf.get_i32() {
            0 => PlayStatusType::LoginSuccess,
            1 => PlayStatusType::FailedClient,
            2 => PlayStatusType::FailedServer,
            3 => PlayStatusType::PlayerSpawn,
            other => {
                return Err(ProtoError::InvalidData(format!(
                    "unknown PlayStatus code: {other}"
                )))
            }
        };
        Ok(Self { status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_login_success() {
        let mut buf = BytesMut::new();
        PlayStatus::new(PlayStatusType::LoginSuccess).encode(&mut buf);
        assert_eq!(&buf[..], &[0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn encode_spawn() {
        let mut buf = BytesMut::new();
        PlayStatus::new(PlayStatusType::PlayerSpawn).encode(&mut buf);
        assert_eq!(&buf[..], &[0x00, 0x00, 0x00, 0x03]);
    }

    #[test]
    fn roundtrip() {
        let pkt = PlayStatus::new(PlayStatusType::FailedServer);
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(PlayStatus::decode(&mut buf.freeze()).unwrap(), pkt);
    }

    #[test]
    fn decode_rejects_unknown_code() {
        let data = bytes::Bytes::from_static(&[0x00, 0x00, 0x00, 0x63]);
        assert!(PlayStatus::decode(&mut data.clone()).is_err());
    }
}
