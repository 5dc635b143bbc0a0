//! UpdateAttributes (0x1D) — Server → Client.

use bytes::BufMut;

use crate::codec::{write_string, Encode};
use crate::types::{VarUInt32, VarUInt64};

/// One entity attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeEntry {
    pub min: f32,
    pub max: f32,
    pub current: f32,
    pub default: f32,
    pub name: String,
}

impl AttributeEntry {
    pub fn new(name: &str, min: f32, max: f32, current: f32, default: f32) -> Self {
        Self {
            min,
            max,
            current,
            default,
            name: name.to_string(),
        }
    }
}

/// Sends an entity's attribute map to a client.
#[derive(Debug, Clone)]
pub struct UpdateAttributes {
    pub runtime_entity_id: u64,
    pub attributes: Vec<AttributeEntry>,
}

impl UpdateAttributes {
    /// The default attribute map of a freshly spawned player.
    pub fn player_defaults(runtime_entity_id: u64) -> Self {
        Self {
            runtime_entity_id,
            attributes: vec![
                AttributeEntry::new("minecraft:health", 0.0, 20.0, 20.0, 20.0),
                AttributeEntry::new("minecraft:movement", 0.0, f32::MAX, 0.1, 0.1),
                AttributeEntry::new("minecraft:absorption", 0.0, f32::MAX, 0.0, 0.0),
                AttributeEntry::new("minecraft:attack_damage", 0.0, f32::MAX, 1.0, 1.0),
            ],
        }
    }
}

impl Encode for UpdateAttributes {
    fn encode(&self, buf: &mut impl BufMut) {
        VarUInt64(self.runtime_entity_id).encode(buf);
        VarUInt32(self.attributes.len() as u32).encode(buf);
        for attr in &self.attributes {
            buf.put_f32_le(attr.min);
            buf.put_f32_le(attr.max);
            buf.put_f32_le(attr.current);
            buf.put_f32_le(attr.default);
            write_string(buf, &attr.name);
        }
    }
}
