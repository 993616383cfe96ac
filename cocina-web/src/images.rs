//! Recipe image storage
//!
//! Uploaded images are written to a flat directory under generated names
//! (`<millis>-<random>-<sanitized original name>`). Recipes reference images
//! by file name only. The placeholder image is materialized at startup and
//! is never deleted.

use axum::body::Bytes;
use cocina_common::{Error, Result, ValidationError, DEFAULT_IMAGE};
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Maximum accepted upload size
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

const PLACEHOLDER_SVG: &str = include_str!("../ui/default-recipe.svg");

/// An image received from a multipart form, held in memory until the
/// recipe it belongs to has been validated
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub original_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Flat-directory blob store keyed by generated file name
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory and write the placeholder if missing
    pub async fn ensure_ready(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let placeholder = self.dir.join(DEFAULT_IMAGE);
        if !tokio::fs::try_exists(&placeholder).await? {
            tokio::fs::write(&placeholder, PLACEHOLDER_SVG).await?;
            info!("Wrote placeholder image {}", placeholder.display());
        }
        Ok(())
    }

    /// Accept only `image/*` MIME types
    pub fn filter(content_type: &str) -> std::result::Result<(), ValidationError> {
        if content_type.trim().to_ascii_lowercase().starts_with("image/") {
            Ok(())
        } else {
            Err(ValidationError::NotAnImage)
        }
    }

    /// Type and size checks, run before anything touches the disk
    pub fn check(upload: &UploadedImage) -> std::result::Result<(), ValidationError> {
        Self::filter(&upload.content_type)?;
        if upload.bytes.len() > MAX_IMAGE_BYTES {
            return Err(ValidationError::ImageTooLarge);
        }
        Ok(())
    }

    /// Persist an upload under a fresh name and return that name
    pub async fn store(&self, upload: &UploadedImage) -> Result<String> {
        Self::check(upload)?;

        let filename = generate_filename(&upload.original_name);
        let path = self.dir.join(&filename);

        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| Error::Storage(format!("{}: {}", path.display(), e)))?;

        debug!("Stored image {} ({} bytes)", filename, upload.bytes.len());
        Ok(filename)
    }

    /// Best-effort removal
    ///
    /// The placeholder is never removed. Missing files and I/O failures are
    /// logged and swallowed: the database is authoritative.
    pub async fn delete(&self, filename: &str) {
        if filename == DEFAULT_IMAGE || filename.is_empty() {
            debug!("Skipping delete of placeholder image");
            return;
        }
        if !is_plain_filename(filename) {
            warn!("Refusing to delete suspicious image name {:?}", filename);
            return;
        }

        let path = self.dir.join(filename);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => info!("Deleted image {}", filename),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Image {} already missing", path.display());
            }
            Err(e) => warn!("Could not delete image {}: {}", path.display(), e),
        }
    }

    /// Copy an existing file into the store under its own name
    pub async fn import(&self, source: &Path, filename: &str) -> Result<()> {
        if !is_plain_filename(filename) {
            return Err(Error::Storage(format!("invalid image name {:?}", filename)));
        }
        tokio::fs::copy(source, self.dir.join(filename))
            .await
            .map_err(|e| Error::Storage(format!("{}: {}", source.display(), e)))?;
        Ok(())
    }
}

/// `<millis>-<random 0..1e9>-<sanitized original>`
fn generate_filename(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{}-{}", millis, suffix, sanitize_filename(original_name))
}

/// Keep only the final path component and replace whitespace runs with `_`
fn sanitize_filename(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let mut out = String::with_capacity(base.len());
    let mut in_space = false;
    for c in base.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }

    let out = out.trim_start_matches('.').to_string();
    if out.is_empty() {
        "image".to_string()
    } else {
        out
    }
}

fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.contains(['/', '\\'])
        && name != "."
        && name != ".."
}
