//! Configuration types for the paystub service.
//!
//! These structures are deserialized from the YAML configuration file.
//! Every section except `auth` and `mail.from` has usable defaults.

use std::path::PathBuf;

use serde::Deserialize;

use crate::assets::DEFAULT_ASSET_FILE;

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// TCP port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// The `host:port` address to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared credentials for the processing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthConfig {
    /// Expected user name.
    pub user: String,
    /// Expected password.
    pub password: String,
}

impl AuthConfig {
    /// The credentials string a client must send: `<user>+<password>`.
    pub fn expected_credentials(&self) -> String {
        format!("{}+{}", self.user, self.password)
    }
}

/// Outgoing mail settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MailConfig {
    /// Sender address on every paystub email.
    pub from: String,
    /// Directory the outbox sink writes to.
    #[serde(default = "default_outbox_dir")]
    pub outbox_dir: PathBuf,
}

fn default_outbox_dir() -> PathBuf {
    PathBuf::from("./outbox")
}

/// Branding asset settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding `<company>.png` logos.
    pub dir: PathBuf,
    /// File name of the fallback logo inside `dir`.
    pub default_file: String,
    /// Whether to fall back to the logo compiled into the binary.
    pub use_bundled: bool,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./logos"),
            default_file: DEFAULT_ASSET_FILE.to_string(),
            use_bundled: true,
        }
    }
}

/// The complete service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// HTTP listener.
    #[serde(default)]
    pub server: ServerConfig,
    /// Endpoint credentials.
    pub auth: AuthConfig,
    /// Outgoing mail.
    pub mail: MailConfig,
    /// Logo lookup.
    #[serde(default)]
    pub assets: AssetsConfig,
}
