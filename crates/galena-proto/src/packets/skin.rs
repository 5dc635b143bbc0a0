//! Player skin data shared by PlayerList, PlayerSkin and the player facade.

use bytes::{Buf, BufMut};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::codec::{self, Decode, Encode};
use crate::error::ProtoError;
use crate::jwt::ClientData;

/// Appearance data for one player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Skin {
    pub skin_id: String,
    /// RGBA bitmap.
    pub skin_data: Vec<u8>,
    /// RGBA bitmap; empty when the player has no cape.
    pub cape_data: Vec<u8>,
    pub geometry_name: String,
    /// Geometry definition JSON.
    pub geometry_data: String,
}

impl Skin {
    /// Build a skin from the login's client data JWT. Invalid base64 fields
    /// degrade to empty rather than failing the login.
    pub fn from_client_data(data: &ClientData) -> Self {
        Self {
            skin_id: data.skin_id.clone(),
            skin_data: STANDARD.decode(&data.skin_data).unwrap_or_default(),
            cape_data: STANDARD.decode(&data.cape_data).unwrap_or_default(),
            geometry_name: data.skin_geometry_name.clone(),
            geometry_data: String::from_utf8(
                STANDARD.decode(&data.skin_geometry).unwrap_or_default(),
            )
            .unwrap_or_default(),
        }
    }
}

impl Encode for Skin {
    fn encode(&self, buf: &mut impl BufMut) {
        codec::write_string(buf, &self.skin_id);
        codec::write_byte_array(buf, &self.skin_data);
        codec::write_byte_array(buf, &self.cape_data);
        codec::write_string(buf, &self.geometry_name);
        codec::write_string(buf, &self.geometry_data);
    }
}

impl Decode for Skin {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        Ok(Self {
            skin_id: codec::read_string(buf)?,
            skin_data: codec::read_byte_array(buf)?,
            cape_data: codec::read_byte_array(buf)?,
            geometry_name: codec::read_string(buf)?,
            geometry_data: codec::read_string(buf)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn roundtrip() {
        let skin = Skin {
            skin_id: "Standard_Custom".into(),
            skin_data: vec![0xFF; 64],
            cape_data: Vec::new(),
            geometry_name: "geometry.humanoid.custom".into(),
            geometry_data: "{}".into(),
        };
        let mut buf = BytesMut::new();
        skin.encode(&mut buf);
        assert_eq!(Skin::decode(&mut buf.freeze()).unwrap(), skin);
    }

    #[test]
    fn from_client_data_decodes_base64() {
        let data = ClientData {
            skin_id: "s".into(),
            skin_data: STANDARD.encode([1u8, 2, 3, 4]),
            skin_geometry: STANDARD.encode(b"{\"bones\":[]}"),
            ..ClientData::default()
        };
        let skin = Skin::from_client_data(&data);
        assert_eq!(skin.skin_data, vec![1, 2, 3, 4]);
        assert_eq!(skin.geometry_data, "{\"bones\":[]}");
        assert!(skin.cape_data.is_empty());
    }

    #[test]
    fn from_client_data_tolerates_bad_base64() {
        let data = ClientData {
            skin_data: "!!not base64!!".into(),
            ..ClientData::default()
        };
        let skin = Skin::from_client_data(&data);
        assert!(skin.skin_data.is_empty());
    }
}
