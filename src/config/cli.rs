use crate::core::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Local filesystem storage. Relative paths resolve against `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(Path::new(path))
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.resolve(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}
