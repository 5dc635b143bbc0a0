//! Base wire types: variable-length integers, vectors, UUIDs, positions.

use std::fmt;

use bytes::{Buf, BufMut};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{Decode, Encode};
use crate::error::ProtoError;

#[derive(Debug, Error)]
pub enum VarIntError {
    #[error("buffer too short")]
    BufferTooShort,
    #[error("varint is too long (more than {max_bytes} bytes)")]
    TooManyBytes { max_bytes: usize },
}

/// Unsigned LEB128 varints. Bedrock uses these for lengths, packet ids and
/// runtime entity ids.
macro_rules! unsigned_varint {
    ($name:ident, $int:ty, $max_bytes:expr) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub $int);

        impl $name {
            pub const MAX_BYTES: usize = $max_bytes;
        }

        impl Encode for $name {
            fn encode(&self, buf: &mut impl BufMut) {
                let mut value = self.0;
                loop {
                    if value & !0x7F == 0 {
                        buf.put_u8(value as u8);
                        return;
                    }
                    buf.put_u8((value & 0x7F | 0x80) as u8);
                    value >>= 7;
                }
            }
        }

        impl Decode for $name {
            fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
                let mut result: $int = 0;
                let mut shift: u32 = 0;
                for _ in 0..Self::MAX_BYTES {
                    if !buf.has_remaining() {
                        return Err(VarIntError::BufferTooShort.into());
                    }
                    let byte = buf.get_u8();
                    result |= ((byte & 0x7F) as $int) << shift;
                    if byte & 0x80 == 0 {
                        return Ok($name(result));
                    }
                    shift += 7;
                }
                Err(VarIntError::TooManyBytes {
                    max_bytes: Self::MAX_BYTES,
                }
                .into())
            }
        }

        impl From<$int> for $name {
            fn from(v: $int) -> Self {
                $name(v)
            }
        }

        impl From<$name> for $int {
            fn from(v: $name) -> Self {
                v.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

unsigned_varint!(VarUInt32, u32, 5);
unsigned_varint!(VarUInt64, u64, 10);

/// Signed varints are the unsigned encoding of the ZigZag mapping.
macro_rules! zigzag_varint {
    ($name:ident, $int:ty, $uint:ty, $unsigned:ident, $bits:expr) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub $int);

        impl Encode for $name {
            fn encode(&self, buf: &mut impl BufMut) {
                let zigzag = ((self.0 << 1) ^ (self.0 >> ($bits - 1))) as $uint;
                $unsigned(zigzag).encode(buf);
            }
        }

        impl Decode for $name {
            fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
                let zigzag = $unsigned::decode(buf)?.0;
                Ok($name((zigzag >> 1) as $int ^ -((zigzag & 1) as $int)))
            }
        }

        impl From<$int> for $name {
            fn from(v: $int) -> Self {
                $name(v)
            }
        }

        impl From<$name> for $int {
            fn from(v: $name) -> Self {
                v.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

zigzag_varint!(VarInt, i32, u32, VarUInt32, 32);
zigzag_varint!(VarLong, i64, u64, VarUInt64, 64);

// ---------------------------------------------------------------------------
// Vec3 (f32 x, y, z, little-endian)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Vec3) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl Encode for Vec3 {
    fn encode(&self, buf: &mut impl BufMut) {
        buf.put_f32_le(self.x);
        buf.put_f32_le(self.y);
        buf.put_f32_le(self.z);
    }
}

impl Decode for Vec3 {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        if buf.remaining() < 12 {
            return Err(ProtoError::BufferTooShort {
                needed: 12,
                remaining: buf.remaining(),
            });
        }
        Ok(Self {
            x: buf.get_f32_le(),
            y: buf.get_f32_le(),
            z: buf.get_f32_le(),
        })
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Vec2 (f32 x, z, little-endian)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub z: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };

    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }
}

impl Encode for Vec2 {
    fn encode(&self, buf: &mut impl BufMut) {
        buf.put_f32_le(self.x);
        buf.put_f32_le(self.z);
    }
}

impl Decode for Vec2 {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        if buf.remaining() < 8 {
            return Err(ProtoError::BufferTooShort {
                needed: 8,
                remaining: buf.remaining(),
            });
        }
        Ok(Self {
            x: buf.get_f32_le(),
            z: buf.get_f32_le(),
        })
    }
}

// ---------------------------------------------------------------------------
// Uuid (Bedrock wire form: two u64, little-endian)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uuid {
    pub most_significant: u64,
    pub least_significant: u64,
}

impl Uuid {
    pub const ZERO: Self = Self {
        most_significant: 0,
        least_significant: 0,
    };

    pub fn new(most: u64, least: u64) -> Self {
        Self {
            most_significant: most,
            least_significant: least,
        }
    }

    /// Parse a hyphenated UUID string (`8-4-4-4-12` hex groups).
    pub fn parse(s: &str) -> Result<Self, ProtoError> {
        let hex: String = s.chars().filter(|c| *c != '-').collect();
        if hex.len() != 32 {
            return Err(ProtoError::InvalidData(format!("bad UUID: {s:?}")));
        }
        let value = u128::from_str_radix(&hex, 16)
            .map_err(|_| ProtoError::InvalidData(format!("bad UUID: {s:?}")))?;
        Ok(Self {
            most_significant: (value >> 64) as u64,
            least_significant: value as u64,
        })
    }
}

impl Encode for Uuid {
    fn encode(&self, buf: &mut impl BufMut) {
        buf.put_u64_le(self.most_significant);
        buf.put_u64_le(self.least_significant);
    }
}

impl Decode for Uuid {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        if buf.remaining() < 16 {
            return Err(ProtoError::BufferTooShort {
                needed: 16,
                remaining: buf.remaining(),
            });
        }
        Ok(Self {
            most_significant: buf.get_u64_le(),
            least_significant: buf.get_u64_le(),
        })
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = ((self.most_significant as u128) << 64) | self.least_significant as u128;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            (v >> 96) as u32,
            (v >> 80) as u16,
            (v >> 64) as u16,
            (v >> 48) as u16,
            v & 0xFFFF_FFFF_FFFF,
        )
    }
}

// ---------------------------------------------------------------------------
// BlockPos (signed block coordinates; y is unsigned on the wire)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn chunk_pos(&self) -> ChunkPos {
        ChunkPos::new(self.x >> 4, self.z >> 4)
    }

    pub fn from_vec3(v: &Vec3) -> Self {
        Self {
            x: v.x.floor() as i32,
            y: v.y.floor() as i32,
            z: v.z.floor() as i32,
        }
    }
}

impl Encode for BlockPos {
    fn encode(&self, buf: &mut impl BufMut) {
        VarInt(self.x).encode(buf);
        VarUInt32(self.y as u32).encode(buf);
        VarInt(self.z).encode(buf);
    }
}

impl Decode for BlockPos {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let x = VarInt::decode(buf)?.0;
        let y = VarUInt32::decode(buf)?.0 as i32;
        let z = VarInt::decode(buf)?.0;
        Ok(Self { x, y, z })
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// ChunkPos
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for ChunkPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    fn roundtrip<T: Encode + Decode + PartialEq + fmt::Debug>(value: T) {
        let mut buf = BytesMut::new();
        value.encode(&mut buf);
        let decoded = T::decode(&mut buf.freeze()).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn varuint32_roundtrip() {
        for v in [0u32, 1, 127, 128, 255, 300, 100_000, u32::MAX] {
            roundtrip(VarUInt32(v));
        }
    }

    #[test]
    fn varuint64_roundtrip() {
        for v in [0u64, 1, 127, 128, u32::MAX as u64, u64::MAX] {
            roundtrip(VarUInt64(v));
        }
    }

    #[test]
    fn varint_roundtrip() {
        for v in [0i32, 1, -1, 127, -128, 100_000, -100_000, i32::MAX, i32::MIN] {
            roundtrip(VarInt(v));
        }
    }

    #[test]
    fn varlong_roundtrip() {
        for v in [
            0i64,
            1,
            -1,
            1_000_000_000,
            -1_000_000_000,
            i64::MAX,
            i64::MIN,
        ] {
            roundtrip(VarLong(v));
        }
    }

    #[test]
    fn varuint_is_plain_leb128() {
        // VarUInt32(1) encodes as [0x01]; the ZigZag VarInt(1) encodes as [0x02].
        let mut buf = BytesMut::new();
        VarUInt32(1).encode(&mut buf);
        assert_eq!(&buf[..], &[0x01]);

        let mut buf = BytesMut::new();
        VarInt(1).encode(&mut buf);
        assert_eq!(&buf[..], &[0x02]);
    }

    #[test]
    fn varint_negative_one_is_single_byte() {
        let mut buf = BytesMut::new();
        VarInt(-1).encode(&mut buf);
        assert_eq!(&buf[..], &[0x01]);
    }

    #[test]
    fn varuint32_too_long_rejected() {
        let data = [0x80u8, 0x80, 0x80, 0x80, 0x80, 0x01];
        assert!(VarUInt32::decode(&mut &data[..]).is_err());
    }

    #[test]
    fn varuint32_truncated_rejected() {
        assert!(VarUInt32::decode(&mut &[][..]).is_err());
        assert!(VarUInt32::decode(&mut &[0x80u8][..]).is_err());
    }

    #[test]
    fn vec3_roundtrip() {
        roundtrip(Vec3::new(1.5, -2.0, 3.25));
        let mut buf = BytesMut::new();
        Vec3::ZERO.encode(&mut buf);
        assert_eq!(buf.len(), 12);
    }

    #[test]
    fn vec2_roundtrip() {
        roundtrip(Vec2::new(90.0, -45.5));
    }

    #[test]
    fn uuid_roundtrip() {
        roundtrip(Uuid::new(0x0123456789ABCDEF, 0xFEDCBA9876543210));
    }

    #[test]
    fn uuid_parse_display() {
        let s = "12345678-1234-1234-1234-123456789012";
        let uuid = Uuid::parse(s).unwrap();
        assert_eq!(uuid.to_string(), s);
    }

    #[test]
    fn uuid_parse_rejects_garbage() {
        assert!(Uuid::parse("not-a-uuid").is_err());
        assert!(Uuid::parse("").is_err());
        assert!(Uuid::parse("12345678-1234-1234-1234-12345678901g").is_err());
    }

    #[test]
    fn blockpos_roundtrip() {
        roundtrip(BlockPos::new(100, 64, -200));
        roundtrip(BlockPos::new(-1, 0, -1));
    }

    #[test]
    fn blockpos_chunk_pos() {
        assert_eq!(BlockPos::new(15, 64, 15).chunk_pos(), ChunkPos::new(0, 0));
        assert_eq!(BlockPos::new(16, 64, 16).chunk_pos(), ChunkPos::new(1, 1));
        assert_eq!(BlockPos::new(-1, 64, -1).chunk_pos(), ChunkPos::new(-1, -1));
        assert_eq!(
            BlockPos::new(-17, 64, -17).chunk_pos(),
            ChunkPos::new(-2, -2)
        );
    }

    #[test]
    fn blockpos_from_vec3_floors() {
        let pos = BlockPos::from_vec3(&Vec3::new(1.9, 64.5, -0.1));
        assert_eq!(pos, BlockPos::new(1, 64, -1));
    }
}
