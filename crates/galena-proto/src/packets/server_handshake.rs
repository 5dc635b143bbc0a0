//! ServerHandshake (0x03) — Server → Client.

use bytes::{Buf, BufMut};

use crate::codec::{self, Decode, Encode};
use crate::error::ProtoError;

/// Initiates the encryption handshake.
///
/// Carries a JWT signed with ES384 containing the server's ephemeral public
/// key (`x5u`) and the random salt used for key derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerHandshake {
    pub jwt: String,
}

impl Encode for ServerHandshake {
    fn encode(&self, buf: &mut impl BufMut) {
        codec::write_string(buf, &self.jwt);
    }
}

impl Decode for ServerHandshake {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            jwt: codec::read_string(buf)?,
        })
    }
}
