use std::path::Path;

use tokio::fs;
use uuid::Uuid;
use vx_error::{Error, Result};

pub const ALLOWED_EXTENSIONS: [&str; 11] = [
    "jpeg", "jpg", "png", "gif", "webp", "svg", "pdf", "mp4", "webm", "ogg", "mov",
];

/// A file accepted for storage on local disk under a generated name.
pub struct UploadDao {
    id: Uuid,
    extension: String,
    size: usize,
}

impl UploadDao {
    pub fn new(file_name: &Option<String>, size: &usize, max_size: &usize) -> Result<Self> {
        if size > max_size {
            return Err(too_large(max_size));
        }

        let extension = file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| {
                Error::Validation("Only images, PDFs, and videos are allowed!".to_owned())
            })?;

        Ok(Self {
            id: Uuid::now_v7(),
            extension,
            size: *size,
        })
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn size(&self) -> &usize {
        &self.size
    }

    pub fn stored_name(&self) -> String {
        format!("{}.{}", self.id, self.extension)
    }

    /// Copies the received file into `upload_path` and returns its public URL.
    pub async fn save(
        &self,
        upload_path: &str,
        public_path: &str,
        path: impl AsRef<Path>,
    ) -> Result<String> {
        let stored_name = self.stored_name();
        fs::create_dir_all(upload_path)
            .await
            .map_err(|err| Error::Storage(format!("Failed to prepare upload directory: {err}")))?;
        fs::copy(path, Path::new(upload_path).join(&stored_name))
            .await
            .map_err(|err| Error::Storage(format!("Failed to store upload: {err}")))?;

        Ok(format!("{}/{stored_name}", public_path.trim_end_matches('/')))
    }
}

/// Size rejection naming the ceiling in the largest unit it fills, rounded up.
pub fn too_large(max_size: &usize) -> Error {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;
    let limit = if *max_size >= MB {
        format!("{}MB", max_size.div_ceil(MB))
    } else if *max_size >= KB {
        format!("{}KB", max_size.div_ceil(KB))
    } else {
        format!("{max_size} bytes")
    };
    Error::Validation(format!("File size too large. Maximum size is {limit}."))
}
