//! CraftingData (0x34) — Server → Client.
//!
//! The recipe book. The networking core ships an empty book; recipe content
//! belongs to the game layer.

use bytes::BufMut;

use crate::codec::Encode;
use crate::types::VarUInt32;

/// Recipe definitions sent during spawn.
#[derive(Debug, Clone, Default)]
pub struct CraftingData {
    pub clear_recipes: bool,
}

impl Encode for CraftingData {
    fn encode(&self, buf: &mut impl BufMut) {
        VarUInt32(0).encode(buf); // recipe count
        buf.put_u8(self.clear_recipes as u8);
    }
}
