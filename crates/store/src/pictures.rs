//! On-disk picture storage.
//!
//! Pictures are fetched through a [`PictureFetcher`], validated by declared
//! content type, and written to a single flat directory under the
//! deterministic name `{type_id}_{pet_name}{ext}`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use menagerie_core::error::CoreError;
use menagerie_core::picture::{is_safe_filename, picture_filename, PictureFetcher, PictureFormat};

/// An opened stored picture ready to be streamed.
#[derive(Debug)]
pub struct StoredPicture {
    pub file: tokio::fs::File,
    pub format: PictureFormat,
    pub len: u64,
}

/// Picture storage backed by a local directory.
#[derive(Clone)]
pub struct PictureStore {
    dir: PathBuf,
    fetcher: Arc<dyn PictureFetcher>,
}

impl PictureStore {
    pub fn new(dir: impl Into<PathBuf>, fetcher: Arc<dyn PictureFetcher>) -> Self {
        Self {
            dir: dir.into(),
            fetcher,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the storage directory if it does not exist.
    pub async fn ensure_dir(&self) -> Result<(), CoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CoreError::Internal(format!("create {}: {e}", self.dir.display())))
    }

    /// Fetch `url` and store it as the picture of `pet_name` under `type_id`.
    ///
    /// Any fetch problem or unsupported content type is a validation error
    /// and leaves no file behind. Returns the stored filename.
    pub async fn download(
        &self,
        url: &str,
        type_id: &str,
        pet_name: &str,
    ) -> Result<String, CoreError> {
        let fetched = self.fetcher.fetch(url).await.map_err(|e| {
            tracing::warn!(url, error = %e, "Picture download failed");
            CoreError::Validation(format!("Could not fetch picture from '{url}'"))
        })?;

        let content_type = fetched.content_type.as_deref().unwrap_or_default();
        let format = PictureFormat::from_content_type(content_type).ok_or_else(|| {
            tracing::warn!(url, content_type, "Rejected picture with unsupported content type");
            CoreError::Validation(format!(
                "Unsupported picture content type '{content_type}', expected image/jpeg or image/png"
            ))
        })?;

        let filename = picture_filename(type_id, pet_name, format);
        if !is_safe_filename(&filename) {
            return Err(CoreError::Validation(format!(
                "Pet name '{pet_name}' cannot be used as a picture filename"
            )));
        }

        self.ensure_dir().await?;
        let path = self.dir.join(&filename);
        tokio::fs::write(&path, &fetched.bytes)
            .await
            .map_err(|e| CoreError::Internal(format!("write {}: {e}", path.display())))?;

        tracing::info!(url, %filename, bytes = fetched.bytes.len(), "Stored picture");
        Ok(filename)
    }

    /// Remove a stored picture. A missing file is not an error.
    pub async fn delete(&self, filename: &str) -> Result<(), CoreError> {
        if !is_safe_filename(filename) {
            return Ok(());
        }
        let path = self.dir.join(filename);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(%filename, "Deleted picture");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Internal(format!("remove {}: {e}", path.display()))),
        }
    }

    /// Open a stored picture for streaming.
    ///
    /// Names without a `.jpg`, `.jpeg` or `.png` extension, unsafe names, and
    /// missing files are all reported as not found.
    pub async fn retrieve(&self, filename: &str) -> Result<StoredPicture, CoreError> {
        let not_found = || CoreError::not_found("Picture", filename);

        let format = PictureFormat::from_filename(filename).ok_or_else(not_found)?;
        if !is_safe_filename(filename) {
            return Err(not_found());
        }

        let path = self.dir.join(filename);
        let file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(CoreError::Internal(format!("open {}: {e}", path.display()))),
        };
        let metadata = file
            .metadata()
            .await
            .map_err(|e| CoreError::Internal(format!("stat {}: {e}", path.display())))?;
        if !metadata.is_file() {
            return Err(not_found());
        }

        Ok(StoredPicture {
            file,
            format,
            len: metadata.len(),
        })
    }
}
