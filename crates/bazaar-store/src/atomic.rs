//! # Atomic File Replacement
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  write_atomic(path, bytes)                                             │
//! │                                                                         │
//! │  1. create  <dir>/.<name>.<uuid>.tmp                                   │
//! │  2. write   all bytes                                                  │
//! │  3. fsync   the temp file                                              │
//! │  4. rename  temp ──► path          (atomic on the same filesystem)     │
//! │  5. fsync   the directory          (makes the rename durable)          │
//! │                                                                         │
//! │  Failure at 1-3: temp removed, path untouched                          │
//! │  Crash at 1-3:   stray temp left behind, path untouched                │
//! │  Failure at 5:   logged only; the new contents are already in place    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Replaces the contents of `path` with `bytes` so that readers see either
/// the old file or the new one, never a mix.
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    let tmp = temp_path(path);

    if let Err(err) = write_synced(&tmp, bytes).await {
        discard(&tmp).await;
        return Err(StoreError::persistence(path, err));
    }

    if let Err(err) = fs::rename(&tmp, path).await {
        discard(&tmp).await;
        return Err(StoreError::persistence(path, err));
    }

    // Reporting this as an error would invite a retry that duplicates the write
    let dir = parent_dir(path);
    if let Err(err) = sync_dir(dir).await {
        warn!(dir = %dir.display(), error = %err, "Could not sync directory after rename");
    }

    debug!(path = %path.display(), bytes = bytes.len(), "File replaced");
    Ok(())
}

async fn write_synced(tmp: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(tmp).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}

async fn discard(tmp: &Path) {
    match fs::remove_file(tmp).await {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => warn!(path = %tmp.display(), error = %err, "Could not remove temp file"),
    }
}

#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    File::open(dir).await?.sync_all().await
}

// Directories cannot be opened for syncing here
#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Directory holding `path`; `.` for a bare file name.
pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// Hidden sibling of `path`, unique per call.
pub(crate) fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());
    let tmp_name = format!(".{}.{}.tmp", name, Uuid::new_v4().simple());

    match path.parent() {
        Some(dir) => dir.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_creates_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        write_atomic(&path, b"first").await.unwrap();
        write_atomic(&path, b"second").await.unwrap();

        assert_eq!(fs::read(&path).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        write_atomic(&path, b"[]").await.unwrap();

        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["catalog.json"]);
    }

    #[tokio::test]
    async fn test_missing_directory_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("orders.jsonl");

        let err = write_atomic(&path, b"x").await.unwrap_err();
        assert!(err.is_retryable());
        assert!(!path.exists());
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir(Path::new("/data/orders.jsonl")), Path::new("/data"));
        assert_eq!(parent_dir(Path::new("orders.jsonl")), Path::new("."));
    }

    #[tokio::test]
    async fn test_sync_dir_on_written_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.jsonl");
        write_atomic(&path, b"{}\n").await.unwrap();

        sync_dir(parent_dir(&path)).await.unwrap();
        assert_eq!(fs::read(&path).await.unwrap(), b"{}\n");
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let tmp = temp_path(Path::new("/data/orders.jsonl"));
        assert_eq!(tmp.parent(), Some(Path::new("/data")));

        let name = tmp.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".orders.jsonl."));
        assert!(name.ends_with(".tmp"));
        assert_ne!(tmp, temp_path(Path::new("/data/orders.jsonl")));
    }
}
