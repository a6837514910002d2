// crates/adapt/src/io.rs

use std::io;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Atomic write: write to a sibling tmp file, fsync, set 0600 (unix), rename.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub async fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    // unique per writer so concurrent saves never share a tmp file
    let tmp = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));

    {
        let mut f = fs::File::create(&tmp).await?;
        f.write_all(data).await?;
        f.sync_all().await?;
    }

    #[cfg(unix)]
    fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600)).await?;

    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e);
    }
    Ok(())
}

/// Read whole file into String (Ok(None) if missing).
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub async fn read_to_string_opt(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(s) => Ok(Some(s)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
