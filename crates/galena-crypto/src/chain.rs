//! Login-chain verification.
//!
//! The client presents an ordered list of ES384-signed tokens. Token *i*
//! must verify under the public key advertised by token *i-1*; the first
//! token verifies under its own `x5u` header hint. A chain is *authenticated*
//! when one of its tokens was verified under the Mojang root key. The key
//! advertised by the final token is the client's ephemeral public key, used
//! afterwards for ECDH.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use p384::ecdsa::signature::Verifier;
use p384::ecdsa::{Signature, VerifyingKey};
use p384::PublicKey;
use serde::Deserialize;

use crate::ecdh::parse_public_key;
use crate::CryptoError;

/// Mojang's root public key, the trust anchor for XBOX Live authentication.
pub const MOJANG_ROOT_PUBLIC_KEY: &str = "MHYwEAYHKoZIzj0CAQYFK4EEACIDYgAE8ELkixyLcwlZryUQcu1TvPOmI2B7vX83ndnWRUaXm74wFfa5f/lwQNTfrLVHa2PmenpGI6JhIMUJaWZrjmMj90NoKNFSNBuKdm8rYiXsfaz3K36x/1U26HpG0ZxK/V1V";

#[derive(Deserialize)]
struct TokenHeader {
    #[allow(dead_code)]
    alg: String,
    #[serde(default)]
    x5u: Option<String>,
}

#[derive(Deserialize)]
struct TokenClaims {
    #[serde(default)]
    exp: i64,
    #[serde(default)]
    nbf: i64,
    #[serde(default)]
    iat: i64,
    #[serde(rename = "identityPublicKey", default)]
    identity_public_key: Option<String>,
}

/// Outcome of a successful chain verification.
pub struct ChainVerification {
    /// True when one token was verified under the root public key.
    pub authenticated: bool,
    /// The client's ephemeral public key, advertised by the last token.
    pub client_public_key: PublicKey,
}

/// Verify a login chain against `root_public_key` at time `now` (unix secs).
///
/// Any failure terminates the login; there is no partial acceptance.
pub fn verify_login_chain(
    chain: &[String],
    root_public_key: &str,
    now: i64,
) -> Result<ChainVerification, CryptoError> {
    if chain.is_empty() {
        return Err(CryptoError::MalformedToken("empty chain".into()));
    }

    let mut current_key: Option<String> = None;
    let mut authenticated = false;

    for token in chain {
        let (header_b64, payload_b64, signature_b64) = split_token(token)?;

        let header: TokenHeader = decode_json(header_b64)?;
        if current_key.is_none() {
            match header.x5u {
                Some(x5u) if !x5u.is_empty() => current_key = Some(x5u),
                _ => return Err(CryptoError::MissingX5u),
            }
        }

        let Some(key_b64) = current_key.as_deref() else {
            return Err(CryptoError::MissingX5u);
        };
        let verifying: VerifyingKey = parse_public_key(key_b64)?.into();

        let signature_raw = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|e| CryptoError::Base64(e.to_string()))?;
        let signature =
            Signature::from_slice(&signature_raw).map_err(|_| CryptoError::BadSignature)?;

        let message = format!("{header_b64}.{payload_b64}");
        verifying
            .verify(message.as_bytes(), &signature)
            .map_err(|_| CryptoError::BadSignature)?;

        let claims: TokenClaims = decode_json(payload_b64)?;
        let expired = claims.exp <= now && claims.exp != 0;
        if expired || claims.nbf > now || claims.iat > claims.exp {
            return Err(CryptoError::TokenOutOfValidity);
        }

        if key_b64 == root_public_key {
            authenticated = true;
        }

        match claims.identity_public_key {
            Some(next) if !next.is_empty() => current_key = Some(next),
            _ => return Err(CryptoError::MissingIdentityKey),
        }
    }

    let Some(final_key) = current_key else {
        return Err(CryptoError::MissingIdentityKey);
    };
    Ok(ChainVerification {
        authenticated,
        client_public_key: parse_public_key(&final_key)?,
    })
}

fn split_token(token: &str) -> Result<(&str, &str, &str), CryptoError> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(p), Some(s), None) => Ok((h, p, s)),
        _ => Err(CryptoError::MalformedToken(
            "expected 3 dot-separated parts".into(),
        )),
    }
}

fn decode_json<T: for<'de> Deserialize<'de>>(part: &str) -> Result<T, CryptoError> {
    let raw = URL_SAFE_NO_PAD
        .decode(part)
        .map_err(|e| CryptoError::Base64(e.to_string()))?;
    serde_json::from_slice(&raw).map_err(|e| CryptoError::MalformedToken(e.to_string()))
}
