//! ECDH P-384 key agreement and symmetric key derivation.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine;
use p384::ecdsa::SigningKey;
use p384::pkcs8::{DecodePublicKey, EncodePublicKey};
use p384::{PublicKey, SecretKey};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use crate::CryptoError;

/// The server's ephemeral P-384 key pair, generated per login.
pub struct ServerKeyPair {
    secret: SecretKey,
}

impl ServerKeyPair {
    /// Generate a fresh random key pair.
    pub fn generate() -> Self {
        Self {
            secret: SecretKey::random(&mut OsRng),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.secret.public_key()
    }

    /// Raw 48-byte ECDH shared secret with the client's public key.
    pub fn shared_secret(&self, client_public: &PublicKey) -> [u8; 48] {
        let shared =
            p384::ecdh::diffie_hellman(self.secret.to_nonzero_scalar(), client_public.as_affine());
        let mut out = [0u8; 48];
        out.copy_from_slice(shared.raw_secret_bytes().as_slice());
        out
    }

    /// ES384 signing key for the handshake JWT.
    pub fn signing_key(&self) -> SigningKey {
        SigningKey::from(self.secret.clone())
    }

    /// Public key as base64 SPKI DER, the form carried in JWT `x5u` fields.
    pub fn public_key_base64(&self) -> String {
        let der = self
            .secret
            .public_key()
            .to_public_key_der()
            .expect("P-384 SPKI encoding is infallible");
        STANDARD.encode(der.as_ref())
    }
}

/// Parse a base64 SPKI DER public key (an `x5u` or `identityPublicKey` value).
/// Accepts both padded and unpadded base64.
pub fn parse_public_key(encoded: &str) -> Result<PublicKey, CryptoError> {
    let der = STANDARD
        .decode(encoded)
        .or_else(|_| STANDARD_NO_PAD.decode(encoded))
        .map_err(|e| CryptoError::Base64(e.to_string()))?;
    PublicKey::from_public_key_der(&der).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
}

/// Derive the AES-256 key and IV from the handshake salt and the ECDH secret.
///
/// ```text
/// shared_secret = SHA-256(salt || ecdh_secret)   // doubles as the AES key
/// iv            = shared_secret[0..16]
/// ```
pub fn derive_key(salt: &[u8; 16], ecdh_secret: &[u8]) -> ([u8; 32], [u8; 16]) {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(ecdh_secret);
    let digest = hasher.finalize();

    let mut key = [0u8; 32];
    key.copy_from_slice(&digest);
    let mut iv = [0u8; 16];
    iv.copy_from_slice(&key[..16]);

    (key, iv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_secret_is_symmetric() {
        let server = ServerKeyPair::generate();
        let client = ServerKeyPair::generate();
        assert_eq!(
            server.shared_secret(&client.public_key()),
            client.shared_secret(&server.public_key())
        );
    }

    #[test]
    fn public_key_base64_roundtrip() {
        let pair = ServerKeyPair::generate();
        let parsed = parse_public_key(&pair.public_key_base64()).unwrap();
        assert_eq!(parsed, pair.public_key());
    }

    #[test]
    fn parse_accepts_unpadded() {
        let pair = ServerKeyPair::generate();
        let padded = pair.public_key_base64();
        let unpadded = padded.trim_end_matches('=').to_string();
        assert_eq!(parse_public_key(&unpadded).unwrap(), pair.public_key());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_public_key("!!!").is_err());
        let not_der = STANDARD.encode(b"not a key");
        assert!(parse_public_key(&not_der).is_err());
    }

    #[test]
    fn derive_key_deterministic() {
        let salt = [0x42u8; 16];
        let secret = [0xABu8; 48];
        let (key1, iv1) = derive_key(&salt, &secret);
        let (key2, iv2) = derive_key(&salt, &secret);
        assert_eq!(key1, key2);
        assert_eq!(iv1, iv2);
    }

    #[test]
    fn iv_is_key_prefix() {
        let (key, iv) = derive_key(&[0x01; 16], &[0x02; 48]);
        assert_eq!(&key[..16], &iv);
    }

    #[test]
    fn salt_changes_key() {
        let secret = [0xFFu8; 48];
        let (key1, _) = derive_key(&[0x00; 16], &secret);
        let (key2, _) = derive_key(&[0x01; 16], &secret);
        assert_ne!(key1, key2);
    }
}
