//! Entity metadata entries shared by AddPlayer and SetEntityData.

use bytes::BufMut;

use crate::codec::{write_string, Encode};
use crate::types::{VarInt, VarLong, VarUInt32};

/// Entity flag bit positions within the FLAGS metadata long.
pub mod entity_flags {
    pub const ON_FIRE: u8 = 0;
    pub const SNEAKING: u8 = 1;
    pub const RIDING: u8 = 2;
    pub const SPRINTING: u8 = 3;
}

/// Metadata keys used by the player facade.
pub mod keys {
    pub const FLAGS: u32 = 0;
    pub const NAMETAG: u32 = 4;
    pub const SCALE: u32 = 23;
    pub const BOUNDING_BOX_WIDTH: u32 = 38;
    pub const BOUNDING_BOX_HEIGHT: u32 = 39;
}

/// Typed metadata value. The wire type id is derived from the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Byte(u8),
    Short(i16),
    Int(i32),
    Float(f32),
    String(String),
    Long(i64),
}

impl MetadataValue {
    fn type_id(&self) -> u32 {
        match self {
            Self::Byte(_) => 0,
            Self::Short(_) => 1,
            Self::Int(_) => 2,
            Self::Float(_) => 3,
            Self::String(_) => 4,
            Self::Long(_) => 7,
        }
    }
}

/// One metadata entry: key, implied type id, value.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMetadataEntry {
    pub key: u32,
    pub value: MetadataValue,
}

impl EntityMetadataEntry {
    pub fn new(key: u32, value: MetadataValue) -> Self {
        Self { key, value }
    }
}

/// Encode a metadata list: VarUInt32 count, then key/type/value triples.
pub fn encode_metadata(buf: &mut impl BufMut, entries: &[EntityMetadataEntry]) {
    VarUInt32(entries.len() as u32).encode(buf);
    for entry in entries {
        VarUInt32(entry.key).encode(buf);
        VarUInt32(entry.value.type_id()).encode(buf);
        match &entry.value {
            MetadataValue::Byte(v) => buf.put_u8(*v),
            MetadataValue::Short(v) => buf.put_i16_le(*v),
            MetadataValue::Int(v) => VarInt(*v).encode(buf),
            MetadataValue::Float(v) => buf.put_f32_le(*v),
            MetadataValue::String(v) => write_string(buf, v),
            MetadataValue::Long(v) => VarLong(*v).encode(buf),
        }
    }
}

/// Default metadata for a player entity: flags, nametag, scale, bounding box.
pub fn default_player_metadata(display_name: &str, flags: i64) -> Vec<EntityMetadataEntry> {
    vec![
        EntityMetadataEntry::new(keys::FLAGS, MetadataValue::Long(flags)),
        EntityMetadataEntry::new(
            keys::NAMETAG,
            MetadataValue::String(display_name.to_string()),
        ),
        EntityMetadataEntry::new(keys::SCALE, MetadataValue::Float(1.0)),
        EntityMetadataEntry::new(keys::BOUNDING_BOX_WIDTH, MetadataValue::Float(0.6)),
        EntityMetadataEntry::new(keys::BOUNDING_BOX_HEIGHT, MetadataValue::Float(1.8)),
    ]
}
