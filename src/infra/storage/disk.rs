use crate::{
    application::storage::{StorageInterface, interface::StorageResult},
    domain::FileName,
};
use std::path::{Path, PathBuf};
use tokio::{
    fs::{self, File},
    io::{self, AsyncWriteExt},
};
use tracing::warn;
use uuid::Uuid;
use walkdir::WalkDir;

const TMP_DIR: &str = ".imagebox-tmp";

/// Stores every file flat inside one directory.
pub struct DiskStorage {
    root: PathBuf,
    tmp_dir: PathBuf,
}

impl DiskStorage {
    pub async fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        fs::create_dir_all(root.as_ref()).await?;
        let root = fs::canonicalize(root.as_ref()).await?;

        let tmp_dir = root.join(TMP_DIR);
        fs::create_dir_all(&tmp_dir).await?;

        Ok(Self { root, tmp_dir })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, name: &FileName) -> PathBuf {
        self.root.join(name.as_str())
    }
}

#[async_trait::async_trait]
impl StorageInterface for DiskStorage {
    async fn read_bytes(&self, name: &FileName) -> StorageResult<Vec<u8>> {
        Ok(fs::read(self.path_of(name)).await?)
    }

    async fn write_bytes(&self, name: &FileName, contents: &[u8]) -> StorageResult<()> {
        // Unique per write, and independent of the name so it never outgrows it.
        let tmp_path = self.tmp_dir.join(Uuid::new_v4().to_string());

        let mut tmp_file = File::create(&tmp_path).await?;
        tmp_file.write_all(contents).await?;
        tmp_file.flush().await?;
        drop(tmp_file);

        if let Err(err) = fs::rename(&tmp_path, self.path_of(name)).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(err.into());
        }

        Ok(())
    }

    async fn delete(&self, name: &FileName) -> StorageResult<()> {
        Ok(fs::remove_file(self.path_of(name)).await?)
    }

    async fn exists(&self, name: &FileName) -> bool {
        fs::metadata(self.path_of(name))
            .await
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    async fn list(&self) -> StorageResult<Vec<FileName>> {
        let root = self.root.clone();

        let names = tokio::task::spawn_blocking(move || {
            let mut names = Vec::new();

            for entry in WalkDir::new(&root).min_depth(1).max_depth(1) {
                let entry = entry.map_err(io::Error::other)?;

                if !entry.file_type().is_file() {
                    continue;
                }

                let file_name = entry.file_name().to_string_lossy().into_owned();
                match FileName::new(file_name) {
                    Ok(name) => names.push(name),
                    Err(err) => warn!("Skipping unaddressable file in storage: {err}"),
                }
            }

            names.sort();
            Ok::<_, io::Error>(names)
        })
        .await
        .map_err(io::Error::other)??;

        Ok(names)
    }
}
