//! Write-once image files with deferred deletion.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};
use uuid::Uuid;

use crate::domain::entities::{ImageFormat, PersistedImage};
use crate::domain::errors::StoreError;
use crate::domain::ports::ImageStorePort;

/// Directory-backed store for images awaiting delivery.
///
/// Cleanup tasks run on the runtime captured at construction, so they outlive
/// the run that scheduled them.
pub struct TransientImageStore {
    dir: PathBuf,
    grace: Duration,
    runtime: Handle,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl TransientImageStore {
    /// Creates the store, creating `dir` if needed.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn new(dir: PathBuf, grace: Duration) -> Result<Self, StoreError> {
        fs::create_dir_all(&dir).await?;
        if !fs::metadata(&dir).await?.is_dir() {
            return Err(StoreError::DirectoryUnavailable { path: dir });
        }

        Ok(Self {
            dir,
            grace,
            runtime: Handle::current(),
            pending: Mutex::new(Vec::new()),
        })
    }

    /// Returns the store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Waits for every scheduled cleanup to finish. Used at shutdown.
    pub async fn drain(&self) {
        let pending = std::mem::take(&mut *self.pending.lock());
        if !pending.is_empty() {
            debug!(count = pending.len(), "Waiting for pending image cleanups");
        }
        for handle in pending {
            if let Err(e) = handle.await {
                warn!(error = %e, "Cleanup task failed");
            }
        }
    }

    async fn delete_later(path: PathBuf, grace: Duration) {
        tokio::time::sleep(grace).await;
        match fs::remove_file(&path).await {
            Ok(()) => trace!(path = %path.display(), "Removed transient image"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(path = %path.display(), "Transient image already gone");
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove transient image"),
        }
    }
}

/// Writes `bytes` into a freshly created file, removing it again if the
/// write fails so no partial image is left behind.
async fn write_or_discard<W>(path: &Path, mut file: W, bytes: &[u8]) -> Result<(), StoreError>
where
    W: AsyncWrite + Unpin,
{
    let written = match file.write_all(bytes).await {
        Ok(()) => file.flush().await,
        Err(e) => Err(e),
    };
    drop(file);

    if let Err(e) = written {
        if let Err(remove_err) = fs::remove_file(path).await {
            warn!(path = %path.display(), error = %remove_err, "Failed to remove partial image");
        }
        return Err(e.into());
    }
    Ok(())
}

#[async_trait]
impl ImageStorePort for TransientImageStore {
    async fn persist(
        &self,
        bytes: &[u8],
        format: ImageFormat,
    ) -> Result<PersistedImage, StoreError> {
        let path = self
            .dir
            .join(format!("{}.{}", Uuid::new_v4(), format.extension()));

        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        write_or_discard(&path, file, bytes).await?;

        trace!(path = %path.display(), size = bytes.len(), "Wrote transient image");
        Ok(PersistedImage::new(path, format))
    }

    fn schedule_cleanup(&self, image: &PersistedImage) {
        let handle = self
            .runtime
            .spawn(Self::delete_later(image.path().to_path_buf(), self.grace));

        let mut pending = self.pending.lock();
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }
}

impl std::fmt::Debug for TransientImageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransientImageStore")
            .field("dir", &self.dir)
            .field("grace", &self.grace)
            .finish_non_exhaustive()
    }
}
