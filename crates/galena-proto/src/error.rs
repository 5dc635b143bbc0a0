//! Protocol-level errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("buffer too short: need {needed} more bytes, have {remaining}")]
    BufferTooShort { needed: usize, remaining: usize },

    #[error("VarInt encoding error: {0}")]
    VarInt(#[from] crate::types::VarIntError),

    #[error("invalid UTF-8 string")]
    InvalidUtf8,

    #[error("bad frame marker: 0x{0:02X}")]
    BadFrameMarker(u8),

    #[error("empty frame")]
    EmptyFrame,

    #[error("zlib inflate error: {0}")]
    Inflate(String),

    #[error("zlib deflate error: {0}")]
    Deflate(String),

    #[error("truncated record: length prefix {length}, {remaining} bytes left")]
    TruncatedRecord { length: usize, remaining: usize },

    #[error("unknown packet id: 0x{0:02X}")]
    UnknownPacketId(u8),

    #[error("JWT decode error: {0}")]
    JwtDecode(String),

    #[error("JSON parse error: {0}")]
    JsonParse(String),

    #[error("invalid login data: {0}")]
    InvalidLogin(String),

    #[error("invalid field: {0}")]
    InvalidData(String),
}
