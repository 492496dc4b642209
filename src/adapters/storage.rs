use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Writes artifacts below a base directory. Writes are serialized so two
/// requests never interleave on the same file.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
    write_lock: Arc<Mutex<()>>,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self {
            base_path,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(path);

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(full_path.to_string_lossy().into_owned())
    }
}
