//! InventoryTransaction (0x1E) — Client → Server.
//!
//! Only the UseItem transaction carries data the session machine acts on;
//! other transaction kinds are decoded far enough to be skipped cleanly.

use bytes::{Buf, BufMut};

use crate::codec::{Decode, Encode};
use crate::error::ProtoError;
use crate::item_stack::ItemStack;
use crate::types::{BlockPos, VarInt, VarUInt32, Vec3};

/// UseItem action kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum UseItemAction {
    ClickBlock = 0,
    ClickAir = 1,
    BreakBlock = 2,
}

impl UseItemAction {
    fn from_u32(v: u32) -> Result<Self, ProtoError> {
        match v {
            0 => Ok(Self::ClickBlock),
            1 => Ok(Self::ClickAir),
            2 => Ok(Self::BreakBlock),
            other => Err(ProtoError::InvalidData(format!(
                "unknown UseItem action: {other}"
            ))),
        }
    }
}

/// Transaction payload by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum TransactionData {
    /// Normal / mismatch transactions; nothing the session machine needs.
    Plain { transaction_type: u32 },
    UseItem {
        action: UseItemAction,
        block_position: BlockPos,
        face: i32,
        hotbar_slot: i32,
        held_item: ItemStack,
        player_position: Vec3,
        click_position: Vec3,
    },
}

/// InventoryTransaction packet.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryTransaction {
    pub data: TransactionData,
}

const TYPE_NORMAL: u32 = 0;
const TYPE_MISMATCH: u32 = 1;
const TYPE_USE_ITEM: u32 = 2;

impl Encode for InventoryTransaction {
    fn encode(&self, buf: &mut impl BufMut) {
        match &self.data {
            TransactionData::Plain { transaction_type } => {
                VarUInt32(*transaction_type).encode(buf);
                VarUInt32(0).encode(buf); // no actions
            }
            TransactionData::UseItem {
                action,
                block_position,
                face,
                hotbar_slot,
                held_item,
                player_position,
                click_position,
            } => {
                VarUInt32(TYPE_USE_ITEM).encode(buf);
                VarUInt32(0).encode(buf); // no actions
                VarUInt32(*action as u32).encode(buf);
                block_position.encode(buf);
                VarInt(*face).encode(buf);
                VarInt(*hotbar_slot).encode(buf);
                held_item.encode(buf);
                player_position.encode(buf);
                click_position.encode(buf);
            }
        }
    }
}

impl Decode for InventoryTransaction {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        let transaction_type = VarUInt32::decode(buf)?.0;

        // Inventory change actions; parsed only to advance the cursor.
        let action_count = VarUInt32::decode(buf)?.0 as usize;
        for _ in 0..action_count {
            skip_action(buf)?;
        }

        let data = match transaction_type {
            TYPE_NORMAL | TYPE_MISMATCH => TransactionData::Plain { transaction_type },
            TYPE_USE_ITEM => {
                let action = UseItemAction::from_u32(VarUInt32::decode(buf)?.0)?;
                let block_position = BlockPos::decode(buf)?;
                let face = VarInt::decode(buf)?.0;
                let hotbar_slot = VarInt::decode(buf)?.0;
                let held_item = ItemStack::decode(buf)?;
                let player_position = Vec3::decode(buf)?;
                let click_position = Vec3::decode(buf)?;
                TransactionData::UseItem {
                    action,
                    block_position,
                    face,
                    hotbar_slot,
                    held_item,
                    player_position,
                    click_position,
                }
            }
            other => {
                return Err(ProtoError::InvalidData(format!(
                    "unknown transaction type: {other}"
                )))
            }
        };

        Ok(Self { data })
    }
}

/// One inventory change action: source type, slot, old item, new item.
fn skip_action(buf: &mut impl Buf) -> Result<(), ProtoError> {
    let _source_type = VarUInt32::decode(buf)?;
    let _slot = VarUInt32::decode(buf)?;
    let _old = ItemStack::decode(buf)?;
    let _new = ItemStack::decode(buf)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn roundtrip_break_block() {
        let pkt = InventoryTransaction {
            data: TransactionData::UseItem {
                action: UseItemAction::BreakBlock,
                block_position: BlockPos::new(3, 6, -2),
                face: 1,
                hotbar_slot: 0,
                held_item: ItemStack::empty(),
                player_position: Vec3::new(0.5, 7.62, 0.5),
                click_position: Vec3::ZERO,
            },
        };
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(InventoryTransaction::decode(&mut buf.freeze()).unwrap(), pkt);
    }

    #[test]
    fn roundtrip_plain() {
        let pkt = InventoryTransaction {
            data: TransactionData::Plain { transaction_type: 0 },
        };
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(InventoryTransaction::decode(&mut buf.freeze()).unwrap(), pkt);
    }

    #[test]
    fn decode_skips_actions() {
        let mut buf = BytesMut::new();
        VarUInt32(0).encode(&mut buf); // Normal
        VarUInt32(2).encode(&mut buf); // two actions
        for _ in 0..2 {
            VarUInt32(0).encode(&mut buf); // source type
            VarUInt32(5).encode(&mut buf); // slot
            ItemStack::empty().encode(&mut buf);
            ItemStack {
                runtime_id: 1,
                count: 64,
                metadata: 0,
            }
            .encode(&mut buf);
        }
        let pkt = InventoryTransaction::decode(&mut buf.freeze()).unwrap();
        assert_eq!(
            pkt.data,
            TransactionData::Plain { transaction_type: 0 }
        );
    }

    #[test]
    fn decode_rejects_unknown_type() {
        let mut buf = BytesMut::new();
        VarUInt32(9).encode(&mut buf);
        VarUInt32(0).encode(&mut buf);
        assert!(InventoryTransaction::decode(&mut buf.freeze()).is_err());
    }
}
