//! Text (0x09) — Bidirectional.
//!
//! Chat, system and translated messages. The wire format has conditional
//! fields depending on the text type.

use bytes::{Buf, BufMut};

use crate::codec::{read_string, write_string, Decode, Encode};
use crate::error::ProtoError;
use crate::types::VarUInt32;

/// Text message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TextType {
    Raw = 0,
    Chat = 1,
    Translation = 2,
    Popup = 3,
    JukeboxPopup = 4,
    Tip = 5,
    System = 6,
    Whisper = 7,
    Announcement = 8,
}

impl TextType {
    fn from_u8(v: u8) -> Result<Self, ProtoError> {
        match v {
            0 => Ok(Self::Raw),
            1 => Ok(Self::Chat),
            2 => Ok(Self::Translation),
            3 => Ok(Self::Popup),
            4 => Ok(Self::JukeboxPopup),
            5 => Ok(Self::Tip),
            6 => Ok(Self::System),
            7 => Ok(Self::Whisper),
            8 => Ok(Self::Announcement),
            _ => Err(ProtoError::InvalidData(format!("unknown TextType: {v}"))),
        }
    }

    fn has_source(self) -> bool {
        matches!(self, Self::Chat | Self::Whisper | Self::Announcement)
    }

    fn has_parameters(self) -> bool {
        matches!(self, Self::Translation | Self::Popup | Self::JukeboxPopup)
    }
}

/// Text packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub text_type: TextType,
    pub needs_translation: bool,
    pub source_name: String,
    pub message: String,
    pub parameters: Vec<String>,
    pub xuid: String,
    pub platform_chat_id: String,
}

impl Text {
    /// Raw server → client message.
    pub fn raw(message: impl Into<String>) -> Self {
        Self {
            text_type: TextType::Raw,
            needs_translation: false,
            source_name: String::new(),
            message: message.into(),
            parameters: Vec::new(),
            xuid: String::new(),
            platform_chat_id: String::new(),
        }
    }

    /// System message (join/leave broadcasts and the like).
    pub fn system(message: impl Into<String>) -> Self {
        Self {
            text_type: TextType::System,
            ..Self::raw(message)
        }
    }

    /// Chat message attributed to a player.
    pub fn chat(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            text_type: TextType::Chat,
            source_name: source.into(),
            ..Self::raw(message)
        }
    }
}

impl Encode for Text {
    fn encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.text_type as u8);
        buf.put_u8(self.needs_translation as u8);

        if self.text_type.has_source() {
            write_string(buf, &self.source_name);
        }

        write_string(buf, &self.message);

        if self.text_type.has_parameters() {
            VarUInt32(self.parameters.len() as u32).encode(buf);
            for param in &self.parameters {
                write_string(buf, param);
            }
        }

        write_string(buf, &self.xuid);
        write_string(buf, &self.platform_chat_id);
    }
}

impl Decode for Text {
    fn decode(buf: &mut impl Buf) -> Result<Self, ProtoError> {
        if buf.remaining() < 2 {
            return Err(ProtoError::BufferTooShort {
                needed: 2,
                remaining: buf.remaining(),
            });
        }
        let text_type = TextType::from_u8(buf.get_u8())?;
        let needs_translation = buf.get_u8() != 0;

        let source_name = if text_type.has_source() {
            read_string(buf)?
        } else {
            String::new()
        };

        let message = read_string(buf)?;

        let parameters = if text_type.has_parameters() {
            let count = VarUInt32::decode(buf)?.0 as usize;
            let mut params = Vec::with_capacity(count.min(64));
            for _ in 0..count {
                params.push(read_string(buf)?);
            }
            params
        } else {
            Vec::new()
        };

        let xuid = read_string(buf)?;
        let platform_chat_id = read_string(buf)?;

        Ok(Self {
            text_type,
            needs_translation,
            source_name,
            message,
            parameters,
            xuid,
            platform_chat_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    fn roundtrip(pkt: Text) -> Text {
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        Text::decode(&mut buf.freeze()).unwrap()
    }

    #[test]
    fn roundtrip_raw() {
        let decoded = roundtrip(Text::raw("Hello, world!"));
        assert_eq!(decoded.text_type, TextType::Raw);
        assert_eq!(decoded.message, "Hello, world!");
        assert_eq!(decoded.source_name, "");
    }

    #[test]
    fn roundtrip_system() {
        let decoded = roundtrip(Text::system("Steve left the game"));
        assert_eq!(decoded.text_type, TextType::System);
        assert_eq!(decoded.message, "Steve left the game");
    }

    #[test]
    fn roundtrip_chat_keeps_source() {
        let mut pkt = Text::chat("Steve", "hello");
        pkt.xuid = "12345".into();
        let decoded = roundtrip(pkt.clone());
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn roundtrip_translation_parameters() {
        let pkt = Text {
            text_type: TextType::Translation,
            needs_translation: true,
            source_name: String::new(),
            message: "chat.type.text".into(),
            parameters: vec!["Steve".into(), "hello".into()],
            xuid: String::new(),
            platform_chat_id: String::new(),
        };
        assert_eq!(roundtrip(pkt.clone()), pkt);
    }

    #[test]
    fn decode_rejects_unknown_type() {
        let mut buf = BytesMut::new();
        buf.put_u8(0x40);
        buf.put_u8(0x00);
        assert!(Text::decode(&mut buf.freeze()).is_err());
    }
}
