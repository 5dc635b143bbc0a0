//! ClientHandshake (0x04) — Client → Server.

use bytes::Buf;

use crate::codec::Decode;
use crate::error::ProtoError;

/// Confirms the encryption handshake. The packet has no fields; its arrival
/// (already encrypted) proves the client derived the same key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientHandshake;

impl Decode for ClientHandshake {
    fn decode(_buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self)
    }
}
