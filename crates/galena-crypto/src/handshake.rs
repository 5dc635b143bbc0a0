//! ES384-signed JWT for the ServerHandshake packet.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use p384::ecdsa::{signature::Signer, Signature};

use crate::ecdh::ServerKeyPair;
use crate::CryptoError;

/// Build the handshake JWT carrying the server's public key and the salt.
///
/// ```text
/// header:  {"alg":"ES384","x5u":"<base64 server pubkey DER>"}
/// payload: {"salt":"<base64 16-byte salt>"}
/// ```
///
/// The client derives the same AES key from the salt and the ECDH secret;
/// the signature proves the key belongs to whoever it negotiated with.
pub fn create_handshake_jwt(
    keypair: &ServerKeyPair,
    salt: &[u8; 16],
) -> Result<String, CryptoError> {
    let header = serde_json::json!({
        "alg": "ES384",
        "x5u": keypair.public_key_base64(),
    });
    let payload = serde_json::json!({
        "salt": STANDARD.encode(salt),
    });

    let header_b64 = URL_SAFE_NO_PAD
        .encode(serde_json::to_vec(&header).map_err(|e| CryptoError::JwtSign(e.to_string()))?);
    let payload_b64 = URL_SAFE_NO_PAD
        .encode(serde_json::to_vec(&payload).map_err(|e| CryptoError::JwtSign(e.to_string()))?);
    let message = format!("{header_b64}.{payload_b64}");

    let signature: Signature = keypair
        .signing_key()
        .try_sign(message.as_bytes())
        .map_err(|e| CryptoError::JwtSign(e.to_string()))?;

    Ok(format!(
        "{message}.{}",
        URL_SAFE_NO_PAD.encode(signature.to_bytes())
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use p384::ecdsa::signature::Verifier;
    use p384::ecdsa::VerifyingKey;

    #[test]
    fn jwt_has_three_parts() {
        let pair = ServerKeyPair::generate();
        let jwt = create_handshake_jwt(&pair, &[0x42; 16]).unwrap();
        assert_eq!(jwt.split('.').count(), 3);
    }

    #[test]
    fn header_advertises_es384_and_key() {
        let pair = ServerKeyPair::generate();
        let jwt = create_handshake_jwt(&pair, &[0x01; 16]).unwrap();

        let header_b64 = jwt.split('.').next().unwrap();
        let header: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(header_b64).unwrap()).unwrap();
        assert_eq!(header["alg"], "ES384");
        assert_eq!(header["x5u"], pair.public_key_base64());
    }

    #[test]
    fn payload_carries_salt() {
        let pair = ServerKeyPair::generate();
        let salt = [0xABu8; 16];
        let jwt = create_handshake_jwt(&pair, &salt).unwrap();

        let payload_b64 = jwt.split('.').nth(1).unwrap();
        let payload: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(payload_b64).unwrap()).unwrap();
        let decoded = STANDARD.decode(payload["salt"].as_str().unwrap()).unwrap();
        assert_eq!(decoded, salt);
    }

    #[test]
    fn signature_verifies_under_advertised_key() {
        let pair = ServerKeyPair::generate();
        let jwt = create_handshake_jwt(&pair, &[0x55; 16]).unwrap();

        let mut parts = jwt.rsplitn(2, '.');
        let sig_b64 = parts.next().unwrap();
        let message = parts.next().unwrap();

        let signature =
            Signature::from_slice(&URL_SAFE_NO_PAD.decode(sig_b64).unwrap()).unwrap();
        let verifying: VerifyingKey = pair.public_key().into();
        verifying.verify(message.as_bytes(), &signature).unwrap();
    }
}
