//! On-disk storage for employee attachments.
//!
//! Files live flat in one directory and are served read-only under
//! [`roster_core::upload::PUBLIC_PREFIX`]. Removal is always best-effort:
//! failures are logged and never turned into request errors.

use std::io;
use std::path::{Path, PathBuf};

use roster_core::upload::{file_name_from_public_path, public_path, stored_file_name};
use tokio::io::AsyncWriteExt;

/// Attempts at finding a free file name before giving up.
const MAX_NAME_ATTEMPTS: i64 = 16;

/// A file written by [`UploadStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub disk_path: PathBuf,
    /// Path browsers use to fetch the file, e.g. `/uploads/1700000000000-cv.pdf`.
    pub public_path: String,
}

/// Directory-backed upload storage.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write `data` under a fresh `<millis>-<name>` file name.
    ///
    /// Never overwrites: if the name is taken the timestamp is bumped.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> io::Result<StoredUpload> {
        let now = chrono::Utc::now().timestamp_millis();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let file_name = stored_file_name(now + attempt, original_name);
            let disk_path = self.dir.join(&file_name);

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&disk_path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            };

            if let Err(e) = write_all(&mut file, data).await {
                drop(file);
                remove_logged(&disk_path).await;
                return Err(e);
            }

            return Ok(StoredUpload {
                disk_path,
                public_path: public_path(&file_name),
            });
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free upload name for '{original_name}'"),
        ))
    }

    /// Delete files received by a request that did not persist.
    pub async fn discard(&self, uploads: &[StoredUpload]) {
        for upload in uploads {
            remove_logged(&upload.disk_path).await;
        }
        if !uploads.is_empty() {
            tracing::info!(count = uploads.len(), "Discarded uploads from failed request");
        }
    }

    /// Delete the file behind a stored public path.
    ///
    /// Returns `true` if a file was removed. Paths outside the upload
    /// directory are ignored.
    pub async fn remove_public_path(&self, path: &str) -> bool {
        let Some(file_name) = file_name_from_public_path(path) else {
            tracing::warn!(path, "Refusing to remove file outside upload directory");
            return false;
        };
        remove_logged(&self.dir.join(file_name)).await
    }
}

async fn write_all(file: &mut tokio::fs::File, data: &[u8]) -> io::Result<()> {
    file.write_all(data).await?;
    file.flush().await
}

async fn remove_logged(path: &Path) -> bool {
    match tokio::fs::remove_file(path).await {
        Ok(()) => true,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "Upload already missing");
            false
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove upload");
            false
        }
    }
}
