//! Game packet batch framing (the 0xFE payload layer).
//!
//! Wire form: `0xFE || [encrypt(] zlib( Σ VarUInt32-len(record) ) [)]` where
//! each record is `packet_id:u8 || payload`. Encryption is applied by the
//! session between the marker and the zlib layer; this module handles the
//! marker, the compression envelope and the record framing.

use std::io::{Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::codec::{Decode, Encode};
use crate::error::ProtoError;
use crate::types::VarUInt32;

/// Marker byte identifying a game packet frame on the transport.
pub const FRAME_MARKER: u8 = 0xFE;

/// Default zlib compression level for outgoing batches.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 7;

/// Strip and validate the frame marker, returning the frame body.
pub fn strip_marker(frame: &[u8]) -> Result<&[u8], ProtoError> {
    match frame.first() {
        Some(&FRAME_MARKER) => Ok(&frame[1..]),
        Some(&other) => Err(ProtoError::BadFrameMarker(other)),
        None => Err(ProtoError::EmptyFrame),
    }
}

/// Prepend the frame marker to an encoded (and possibly encrypted) body.
pub fn add_marker(body: &[u8]) -> Bytes {
    let mut out = BytesMut::with_capacity(1 + body.len());
    out.put_u8(FRAME_MARKER);
    out.put_slice(body);
    out.freeze()
}

/// Inflate a batch body and split it into records.
///
/// Each returned `Bytes` is one record: `packet_id:u8 || payload`. Empty
/// records are skipped.
pub fn decode_batch(body: &[u8]) -> Result<Vec<Bytes>, ProtoError> {
    let mut inflated = Vec::new();
    ZlibDecoder::new(body)
        .read_to_end(&mut inflated)
        .map_err(|e| ProtoError::Inflate(e.to_string()))?;
    let inflated = Bytes::from(inflated);

    let mut records = Vec::new();
    let mut cursor = &inflated[..];
    while cursor.has_remaining() {
        let length = VarUInt32::decode(&mut cursor)?.0 as usize;
        if cursor.remaining() < length {
            return Err(ProtoError::TruncatedRecord {
                length,
                remaining: cursor.remaining(),
            });
        }
        let offset = inflated.len() - cursor.remaining();
        if length > 0 {
            records.push(inflated.slice(offset..offset + length));
        }
        cursor.advance(length);
    }

    Ok(records)
}

/// Join records with length prefixes and deflate the result.
pub fn encode_batch(records: &[Bytes], level: u32) -> Result<Bytes, ProtoError> {
    let mut plain = BytesMut::new();
    for record in records {
        VarUInt32(record.len() as u32).encode(&mut plain);
        plain.put_slice(record);
    }

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder
        .write_all(&plain)
        .map_err(|e| ProtoError::Deflate(e.to_string()))?;
    let deflated = encoder
        .finish()
        .map_err(|e| ProtoError::Deflate(e.to_string()))?;

    Ok(Bytes::from(deflated))
}

/// Serialize a packet into a record: `packet_id:u8 || encoded fields`.
pub fn encode_packet(packet_id: u8, packet: &impl Encode) -> Bytes {
    let mut buf = BytesMut::new();
    buf.put_u8(packet_id);
    packet.encode(&mut buf);
    buf.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(id: u8, payload: &[u8]) -> Bytes {
        let mut buf = BytesMut::new();
        buf.put_u8(id);
        buf.put_slice(payload);
        buf.freeze()
    }

    #[test]
    fn batch_roundtrip_single() {
        let record = make_record(0x01, b"login data");
        let body = encode_batch(std::slice::from_ref(&record), DEFAULT_COMPRESSION_LEVEL).unwrap();
        let decoded = decode_batch(&body).unwrap();
        assert_eq!(decoded, vec![record]);
    }

    #[test]
    fn batch_roundtrip_multiple() {
        let records = vec![
            make_record(0x02, b"status"),
            make_record(0x06, b"packs info"),
            make_record(0x09, b"text"),
        ];
        let body = encode_batch(&records, DEFAULT_COMPRESSION_LEVEL).unwrap();
        let decoded = decode_batch(&body).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn batch_roundtrip_empty() {
        let body = encode_batch(&[], DEFAULT_COMPRESSION_LEVEL).unwrap();
        let decoded = decode_batch(&body).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn batch_preserves_wire_order() {
        let records: Vec<Bytes> = (0u8..20)
            .map(|i| make_record(i, format!("payload {i}").as_bytes()))
            .collect();
        let body = encode_batch(&records, DEFAULT_COMPRESSION_LEVEL).unwrap();
        let decoded = decode_batch(&body).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_batch(&[0xDE, 0xAD, 0xBE, 0xEF]).is_err());
    }

    #[test]
    fn decode_rejects_truncated_record() {
        // Valid zlib stream whose inflated form claims a longer record than present.
        let mut plain = BytesMut::new();
        VarUInt32(200).encode(&mut plain);
        plain.put_slice(b"short");
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(6));
        encoder.write_all(&plain).unwrap();
        let body = encoder.finish().unwrap();
        assert!(matches!(
            decode_batch(&body),
            Err(ProtoError::TruncatedRecord { .. })
        ));
    }

    #[test]
    fn marker_stripped_and_restored() {
        let framed = add_marker(b"body");
        assert_eq!(framed[0], FRAME_MARKER);
        assert_eq!(strip_marker(&framed).unwrap(), b"body");
    }

    #[test]
    fn marker_rejects_foreign_frames() {
        assert!(matches!(
            strip_marker(&[0x01, 0x02]),
            Err(ProtoError::BadFrameMarker(0x01))
        ));
        assert!(matches!(strip_marker(&[]), Err(ProtoError::EmptyFrame)));
    }

    #[test]
    fn encode_packet_prepends_id() {
        struct Probe;
        impl Encode for Probe {
            fn encode(&self, buf: &mut impl BufMut) {
                buf.put_u8(0xAA);
            }
        }
        let record = encode_packet(0x13, &Probe);
        assert_eq!(&record[..], &[0x13, 0xAA]);
    }
}
