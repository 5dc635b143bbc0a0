//! JWT parsing for the Bedrock login (identity chain and client data).
//!
//! Nothing here verifies signatures; the cryptographic chain validation lives
//! in the crypto crate. This module only extracts the claims the server needs
//! once a chain has been accepted.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::error::ProtoError;

/// JWT header fields of a chain token.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    #[serde(default)]
    pub x5u: Option<String>,
}

/// Identity block carried by the last chain token (`extraData`).
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityData {
    #[serde(rename = "XUID", default)]
    pub xuid: Option<String>,
    pub identity: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityClaims {
    #[serde(default)]
    extra_data: Option<IdentityData>,
    #[serde(default)]
    identity_public_key: Option<String>,
}

/// Player identity extracted from an accepted chain.
#[derive(Debug, Clone)]
pub struct LoginIdentity {
    pub xuid: String,
    pub identity: String,
    pub display_name: String,
}

/// Skin and device information from the (unverified) client data JWT.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientData {
    #[serde(rename = "SkinId", default)]
    pub skin_id: String,
    /// Base64 RGBA skin bitmap.
    #[serde(rename = "SkinData", default)]
    pub skin_data: String,
    /// Base64 RGBA cape bitmap.
    #[serde(rename = "CapeData", default)]
    pub cape_data: String,
    #[serde(rename = "SkinGeometryName", default)]
    pub skin_geometry_name: String,
    /// Base64 geometry JSON.
    #[serde(rename = "SkinGeometry", default)]
    pub skin_geometry: String,
    #[serde(rename = "DeviceOS", default)]
    pub device_os: i32,
    #[serde(rename = "GameVersion", default)]
    pub game_version: String,
    #[serde(rename = "LanguageCode", default)]
    pub language_code: String,
    #[serde(rename = "ClientRandomId", default)]
    pub client_random_id: i64,
}

/// Decode a JWT without verifying the signature, returning header and payload.
pub fn decode_unverified(token: &str) -> Result<(JwtHeader, serde_json::Value), ProtoError> {
    let mut parts = token.split('.');
    let (header_b64, payload_b64) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(p), Some(_sig), None) => (h, p),
        _ => return Err(ProtoError::JwtDecode("expected 3 dot-separated parts".into())),
    };

    let header_bytes = decode_base64url(header_b64)
        .map_err(|e| ProtoError::JwtDecode(format!("header base64: {e}")))?;
    let payload_bytes = decode_base64url(payload_b64)
        .map_err(|e| ProtoError::JwtDecode(format!("payload base64: {e}")))?;

    let header: JwtHeader = serde_json::from_slice(&header_bytes)
        .map_err(|e| ProtoError::JsonParse(format!("JWT header: {e}")))?;
    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes)
        .map_err(|e| ProtoError::JsonParse(format!("JWT payload: {e}")))?;

    Ok((header, payload))
}

/// Extract the player identity from the chain (last token carrying `extraData`).
pub fn extract_identity(chain: &[String]) -> Result<LoginIdentity, ProtoError> {
    if chain.is_empty() {
        return Err(ProtoError::InvalidLogin("empty JWT chain".into()));
    }

    for token in chain.iter().rev() {
        let (_, payload) = decode_unverified(token)?;
        if let Ok(claims) = serde_json::from_value::<IdentityClaims>(payload) {
            if let Some(extra) = claims.extra_data {
                return Ok(LoginIdentity {
                    xuid: extra.xuid.unwrap_or_default(),
                    identity: extra.identity,
                    display_name: extra.display_name,
                });
            }
        }
    }

    Err(ProtoError::InvalidLogin(
        "no identity data found in JWT chain".into(),
    ))
}

/// Parse the client data JWT (skin, device info). The signature is not
/// checked; identity comes from the verified chain only.
pub fn extract_client_data(token: &str) -> Result<ClientData, ProtoError> {
    let (_, payload) = decode_unverified(token)?;
    serde_json::from_value(payload).map_err(|e| ProtoError::JsonParse(format!("client data: {e}")))
}

/// Decode base64url, accepting both padded and unpadded input.
fn decode_base64url(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD
        .decode(input)
        .or_else(|_| base64::engine::general_purpose::URL_SAFE.decode(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_part(value: &serde_json::Value) -> String {
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap())
    }

    fn make_jwt(header: &serde_json::Value, payload: &serde_json::Value) -> String {
        format!("{}.{}.sig", encode_part(header), encode_part(payload))
    }

    fn sample_header() -> serde_json::Value {
        serde_json::json!({ "alg": "ES384", "x5u": "some_key" })
    }

    fn identity_payload() -> serde_json::Value {
        serde_json::json!({
            "extraData": {
                "XUID": "1234567890",
                "identity": "12345678-1234-1234-1234-123456789012",
                "displayName": "TestPlayer"
            },
            "identityPublicKey": "MHYwEA..."
        })
    }

    #[test]
    fn decode_valid_jwt() {
        let jwt = make_jwt(&sample_header(), &identity_payload());
        let (header, payload) = decode_unverified(&jwt).unwrap();
        assert_eq!(header.alg, "ES384");
        assert_eq!(header.x5u.as_deref(), Some("some_key"));
        assert_eq!(
            payload["extraData"]["displayName"].as_str(),
            Some("TestPlayer")
        );
    }

    #[test]
    fn decode_rejects_wrong_part_count() {
        assert!(decode_unverified("header.payload").is_err());
        assert!(decode_unverified("a.b.c.d").is_err());
        assert!(decode_unverified("single").is_err());
    }

    #[test]
    fn decode_rejects_bad_base64() {
        assert!(decode_unverified("!!!.!!!.!!!").is_err());
    }

    #[test]
    fn decode_rejects_non_json() {
        let junk = URL_SAFE_NO_PAD.encode(b"not json");
        assert!(decode_unverified(&format!("{junk}.{junk}.sig")).is_err());
    }

    #[test]
    fn extract_identity_from_last_token() {
        let ca = make_jwt(
            &sample_header(),
            &serde_json::json!({ "certificateAuthority": true, "identityPublicKey": "k1" }),
        );
        let mid = make_jwt(
            &sample_header(),
            &serde_json::json!({ "identityPublicKey": "k2" }),
        );
        let last = make_jwt(&sample_header(), &identity_payload());

        let identity = extract_identity(&[ca, mid, last]).unwrap();
        assert_eq!(identity.display_name, "TestPlayer");
        assert_eq!(identity.xuid, "1234567890");
        assert_eq!(identity.identity, "12345678-1234-1234-1234-123456789012");
    }

    #[test]
    fn extract_identity_requires_extra_data() {
        let jwt = make_jwt(
            &sample_header(),
            &serde_json::json!({ "identityPublicKey": "k" }),
        );
        assert!(extract_identity(&[jwt]).is_err());
        assert!(extract_identity(&[]).is_err());
    }

    #[test]
    fn missing_xuid_defaults_to_empty() {
        let jwt = make_jwt(
            &sample_header(),
            &serde_json::json!({
                "extraData": { "identity": "uuid-here", "displayName": "NoXuid" }
            }),
        );
        let identity = extract_identity(&[jwt]).unwrap();
        assert_eq!(identity.display_name, "NoXuid");
        assert_eq!(identity.xuid, "");
    }

    #[test]
    fn client_data_parses_skin_fields() {
        let jwt = make_jwt(
            &serde_json::json!({ "alg": "ES384" }),
            &serde_json::json!({
                "SkinId": "Standard_Custom",
                "SkinData": "AAAA",
                "SkinGeometryName": "geometry.humanoid.custom",
                "DeviceOS": 7,
                "GameVersion": "1.6.0",
                "LanguageCode": "en_US"
            }),
        );
        let data = extract_client_data(&jwt).unwrap();
        assert_eq!(data.skin_id, "Standard_Custom");
        assert_eq!(data.device_os, 7);
        assert_eq!(data.language_code, "en_US");
        assert_eq!(data.cape_data, "");
    }

    #[test]
    fn padded_base64url_accepted() {
        let data = b"test data!";
        let padded = base64::engine::general_purpose::URL_SAFE.encode(data);
        assert_eq!(decode_base64url(&padded).unwrap(), data);
    }
}
