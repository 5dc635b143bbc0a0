//! Disconnect (0x05) — Server → Client.

use bytes::BufMut;

use crate::codec::{self, Encode};

/// Disconnects a client, optionally with a message on the disconnect screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disconnect {
    /// If true, the client shows no disconnect screen.
    pub hide_screen: bool,
    pub message: String,
}

impl Disconnect {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            hide_screen: false,
            message: message.into(),
        }
    }

    pub fn silent() -> Self {
        Self {
            hide_screen: true,
            message: String::new(),
        }
    }
}

impl Encode for Disconnect {
    fn encode(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.hide_screen as u8);
        if !self.hide_screen {
            codec::write_string(buf, &self.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn encode_with_message() {
        let pkt = Disconnect::with_message("Outdated server.");
        let mut buf = BytesMut::new();
        pkt.encode(&mut buf);
        assert_eq!(buf[0], 0x00);
        assert_eq!(buf[1] as usize, "Outdated server.".len());
        assert_eq!(&buf[2..], b"Outdated server.");
    }

    #[test]
    fn encode_silent() {
        let mut buf = BytesMut::new();
        Disconnect::silent().encode(&mut buf);
        assert_eq!(&buf[..], &[0x01]);
    }
}
