//! Server configuration (`galena.toml`).

use serde::Deserialize;
use std::path::Path;

use galena_crypto::MOJANG_ROOT_PUBLIC_KEY;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub auth: AuthSection,
    pub packs: PacksSection,
    pub world: WorldSection,
    pub network: NetworkSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub address: String,
    pub port: u16,
    pub motd: String,
    pub max_players: u32,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".into(),
            port: 19132,
            motd: "Galena server".into(),
            max_players: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSection {
    /// Reject chains that are not rooted in the Mojang key.
    pub xbox_live_auth: bool,
    /// Run the encryption handshake after login.
    pub use_encryption: bool,
    /// Override of the trust anchor (base64 SPKI DER). Tests substitute this.
    pub mojang_root_public_key: Option<String>,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            xbox_live_auth: false,
            use_encryption: true,
            mojang_root_public_key: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacksSection {
    /// Passed through in ResourcePacksInfo / ResourcePackStack.
    pub force_resource_packs: bool,
    pub directory: String,
}

impl Default for PacksSection {
    fn default() -> Self {
        Self {
            force_resource_packs: false,
            directory: "packs".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldSection {
    pub name: String,
    /// Cap on the client-requested chunk radius.
    pub max_view_distance: i32,
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            name: "world".into(),
            max_view_distance: 8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkSection {
    /// Sessions with no inbound traffic for this long are evicted.
    pub idle_timeout_secs: u64,
    /// zlib level for outgoing batches.
    pub compression_level: u32,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 30,
            compression_level: 7,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl ServerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// The trust anchor for chain verification.
    pub fn root_public_key(&self) -> &str {
        self.auth
            .mojang_root_public_key
            .as_deref()
            .unwrap_or(MOJANG_ROOT_PUBLIC_KEY)
    }
}
