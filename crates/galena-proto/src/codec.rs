//! Wire encoding/decoding traits and string/byte-array helpers.

use bytes::{Buf, BufMut};

use crate::error::ProtoError;
use crate::types::VarUInt32;

/// Encode a value onto a buffer.
pub trait Encode {
    fn encode(&self, buf: &mut impl BufMut);
}

/// Decode a value from a buffer.
pub trait Decode: Sized {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError>;
}

/// Write a Bedrock string (VarUInt32 length + UTF-8).
pub fn write_string(buf: &mut impl BufMut, s: &str) {
    VarUInt32(s.len() as u32).encode(buf);
    buf.put_slice(s.as_bytes());
}

/// Read a Bedrock string (VarUInt32 length + UTF-8).
pub fn read_string(buf: &mut impl Buf) -> Result<String, ProtoError> {
    let data = read_byte_array(buf)?;
    String::from_utf8(data).map_err(|_| ProtoError::InvalidUtf8)
}

/// Write a length-prefixed byte array (VarUInt32 length + bytes).
pub fn write_byte_array(buf: &mut impl BufMut, data: &[u8]) {
    VarUInt32(data.len() as u32).encode(buf);
    buf.put_slice(data);
}

/// Read a length-prefixed byte array (VarUInt32 length + bytes).
pub fn read_byte_array(buf: &mut impl Buf) -> Result<Vec<u8>, ProtoError> {
    let len = VarUInt32::decode(buf)?.0 as usize;
    if buf.remaining() < len {
        return Err(ProtoError::BufferTooShort {
            needed: len,
            remaining: buf.remaining(),
        });
    }
    Ok(buf.copy_to_bytes(len).to_vec())
}
