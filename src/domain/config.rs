use crate::domain::{ClientId, FileName};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tokio::{fs, io};

pub const DEFAULT_PORT: u16 = 4567;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub storage_dir: PathBuf,
    /// Register files found in storage without an owner under `orphan_owner`.
    pub adopt_orphans: bool,
    pub orphan_owner: ClientId,
    pub seed: Vec<SeedEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeedEntry {
    pub name: FileName,
    pub owner: ClientId,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            storage_dir: PathBuf::from("./imagebox-files"),
            adopt_orphans: false,
            orphan_owner: ClientId::LOCALHOST,
            seed: vec![SeedEntry {
                name: FileName::new("dust.jpg").expect("valid seed name"),
                owner: ClientId::LOCALHOST,
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub server: String,
    pub storage_dir: PathBuf,
    pub remove_dropped_files: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: format!("127.0.0.1:{DEFAULT_PORT}"),
            storage_dir: PathBuf::from("./imagebox-client"),
            remove_dropped_files: false,
        }
    }
}

impl ServerConfig {
    pub async fn init(path: impl AsRef<Path>) -> io::Result<Self> {
        init_file(path.as_ref()).await
    }
}

impl ClientConfig {
    pub async fn init(path: impl AsRef<Path>) -> io::Result<Self> {
        init_file(path.as_ref()).await
    }
}

/// Reads the config at `path`, writing the defaults there first if it doesn't exist.
async fn init_file<C>(path: &Path) -> io::Result<C>
where
    C: Serialize + DeserializeOwned + Default,
{
    if path.exists() {
        let contents = fs::read_to_string(path).await?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    } else {
        let cfg = C::default();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(&cfg).map_err(io::Error::other)?;
        fs::write(path, contents).await?;
        Ok(cfg)
    }
}
