//! Cryptography for the session layer: ECDH P-384 key agreement, login-chain
//! verification, handshake-JWT signing and the byte-rolling CFB batch cipher.

pub mod chain;
pub mod ecdh;
pub mod handshake;
pub mod stream;

pub use chain::{verify_login_chain, ChainVerification, MOJANG_ROOT_PUBLIC_KEY};
pub use ecdh::{derive_key, parse_public_key, ServerKeyPair};
pub use handshake::create_handshake_jwt;
pub use stream::{BatchDecryptor, BatchEncryptor};

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("base64 decode error: {0}")]
    Base64(String),

    #[error("JWT signing error: {0}")]
    JwtSign(String),

    #[error("batch checksum mismatch")]
    ChecksumMismatch,

    #[error("malformed chain token: {0}")]
    MalformedToken(String),

    #[error("chain token is missing the x5u key hint")]
    MissingX5u,

    #[error("chain token is missing identityPublicKey")]
    MissingIdentityKey,

    #[error("chain signature verification failed")]
    BadSignature,

    #[error("chain token expired or not yet valid")]
    TokenOutOfValidity,
}
