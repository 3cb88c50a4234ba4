use std::path::Path;

use crate::{FailureKind, JobFailure};

/// File contents ready to be sent as a multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Reads a staged file from disk.
pub async fn read_upload(path: &Path) -> Result<UploadFile, JobFailure> {
    let bytes = tokio::fs::read(path).await.map_err(|err| {
        JobFailure::new(
            FailureKind::UploadUnreadable,
            format!("could not read {}: {err}", path.display()),
        )
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(UploadFile { file_name, bytes })
}
