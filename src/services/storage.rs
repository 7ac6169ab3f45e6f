use crate::utils::validation::sanitize_filename;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Disk-backed store for uploaded audio files.
pub struct StorageService {
    root: PathBuf,
}

impl StorageService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist an upload under a sanitized, collision-proof name and return
    /// the path it was written to.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let safe_name = sanitize_filename(filename)?;
        let path = self.root.join(format!("{}_{}", Uuid::new_v4(), safe_name));
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

pub async fn setup_storage(root: &Path) -> Result<Arc<StorageService>> {
    tokio::fs::create_dir_all(root).await?;
    info!("📁 Upload directory: {}", root.display());
    Ok(Arc::new(StorageService::new(root)))
}
