use crate::contact::ContactField;
use serde::Deserialize;
use std::{
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
};
use url::Url;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// IP address to bind the HTTP listener
    pub ip: IpAddr,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
        }
    }
}

/// Where the contact record, notices and inbox live (relative to the site dir).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub dir: PathBuf,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./data/"),
        }
    }
}

/// Public pages (`<slug>.html`) with shortcodes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PagesSettings {
    pub dir: PathBuf,
}

impl Default for PagesSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./pages/"),
        }
    }
}

/// Directory of `<sha256-fingerprint>.toml` user records.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub dir: PathBuf,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./.support/auth/"),
        }
    }
}

/// Which backend supplies the contact record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Editable record persisted under the data dir.
    #[default]
    Settings,
    /// Read-only, from `SUPPORT_*` environment variables.
    Environment,
    /// Persisted record over environment-derived defaults.
    Layered,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    pub source: ConfigSource,
    /// Fields exposed on this instance (form and rendering).
    pub fields: Vec<ContactField>,
    /// Base for relative logo paths, e.g. the theme directory URL.
    pub logo_base: Option<Url>,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            source: ConfigSource::default(),
            fields: ContactField::ALL.to_vec(),
            logo_base: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// Secret mixed into form nonces; a random one is generated per process
    /// when unset.
    pub nonce_secret: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub data: DataSettings,
    pub pages: PagesSettings,
    pub auth: AuthSettings,
    pub contact: ContactSettings,
    pub forms: FormSettings,
}
