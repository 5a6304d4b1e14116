use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::KvResult;
use crate::KvBackend;

/// File-per-key backend rooted at a directory.
///
/// Keys may contain characters that are not filesystem-safe (`:`, `/`), so
/// each key is hex-encoded into its filename. Values are written whole; a
/// write replaces the previous file contents.
#[derive(Debug, Clone)]
pub struct FileKv {
    root: PathBuf,
}

impl FileKv {
    /// Open a backend rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl AsRef<Path>) -> KvResult<Self> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// The directory this backend stores files in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", hex::encode(key.as_bytes())))
    }
}

#[async_trait]
impl KvBackend for FileKv {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let path = self.path_for(key);
        tokio::fs::write(&path, value).await?;
        debug!(key, path = %path.display(), "kv write");
        Ok(())
    }

    async fn remove(&self, key: &str) -> KvResult<bool> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
