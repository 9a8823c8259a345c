use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use rail_store::Stores;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Top-level configuration, usually read from `rail.toml`.
///
/// ```toml
/// bind_addr = "0.0.0.0:8080"
///
/// [storage]
/// backend = "file"
/// data_dir = "/var/lib/rail"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub storage: StorageConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            storage: StorageConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Volatile; everything is lost on shutdown.
    #[default]
    Memory,
    /// JSON snapshots under `data_dir`.
    File,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::from("rail-data"),
        }
    }
}

impl StorageConfig {
    /// Open the stores this configuration describes.
    pub fn open(&self) -> ServerResult<Stores> {
        match self.backend {
            StorageBackend::Memory => Ok(Stores::in_memory()),
            StorageBackend::File => Ok(Stores::open_dir(&self.data_dir)?),
        }
    }
}
