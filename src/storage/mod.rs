use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use image::{ImageFormat, ImageReader};
use thiserror::Error;

const IMAGE_FILE_PREFIX: &str = "cloud_";
const IMAGE_SUBDIR: &str = "wordcloud-client";
const DEFAULT_FALLBACK_RUNTIME_DIR: &str = "/tmp";
const SVG_EXTENSION: &str = "svg";
const SVG_SNIFF_LIMIT: usize = 4096;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("response body is empty")]
    EmptyImage,
    #[error("response body is not a recognizable image")]
    UnknownFormat,
    #[error("failed to read image dimensions: {0}")]
    Decode(#[from] image::ImageError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Default, Clone)]
pub struct PruneReport {
    pub removed_files: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudImageFormat {
    Raster(ImageFormat),
    Svg,
}

impl CloudImageFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Raster(format) => format.extensions_str().first().copied().unwrap_or("img"),
            Self::Svg => SVG_EXTENSION,
        }
    }
}

/// Locally addressable handle to a generated image. Valid until revoked by
/// the [`ImageStore`] that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudImage {
    id: u64,
    path: PathBuf,
    format: CloudImageFormat,
    dimensions: Option<(u32, u32)>,
}

impl CloudImage {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> CloudImageFormat {
        self.format
    }

    /// Pixel size for raster images; vector images have none.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }
}

/// Session-scoped image files in the runtime directory. Every stored image
/// stays on disk until [`ImageStore::revoke`] or [`ImageStore::revoke_all`].
#[derive(Debug)]
pub struct ImageStore {
    dir: PathBuf,
    session: u32,
    next_id: u64,
    live: Vec<CloudImage>,
}

impl ImageStore {
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            dir,
            session: std::process::id(),
            next_id: 1,
            live: Vec::new(),
        }
    }

    pub fn with_default_dir() -> StorageResult<Self> {
        let dir = default_image_dir();
        fs::create_dir_all(&dir)?;
        Ok(Self::with_dir(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    #[cfg(test)]
    pub fn is_live(&self, image: &CloudImage) -> bool {
        self.live.iter().any(|live| live.id == image.id)
    }

    pub fn store(&mut self, bytes: &[u8]) -> StorageResult<CloudImage> {
        if bytes.is_empty() {
            return Err(StorageError::EmptyImage);
        }

        let (format, dimensions) = sniff_image(bytes)?;

        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        let extension = format.extension();
        let path = self.dir.join(format!(
            "{IMAGE_FILE_PREFIX}{}_{id}.{extension}",
            self.session
        ));

        fs::create_dir_all(&self.dir)?;
        fs::write(&path, bytes)?;

        let image = CloudImage {
            id,
            path,
            format,
            dimensions,
        };
        tracing::debug!(
            id,
            path = %image.path.display(),
            ?format,
            ?dimensions,
            "stored word cloud image"
        );
        self.live.push(image.clone());
        Ok(image)
    }

    pub fn revoke(&mut self, image: &CloudImage) -> StorageResult<()> {
        self.live.retain(|live| live.id != image.id);
        match fs::remove_file(&image.path) {
            Ok(()) => {
                tracing::debug!(id = image.id, "revoked word cloud image");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    /// Returns how many images were released.
    pub fn revoke_all(&mut self) -> usize {
        let live = std::mem::take(&mut self.live);
        let count = live.len();
        for image in &live {
            if let Err(err) = self.revoke(image) {
                tracing::warn!(
                    path = %image.path.display(),
                    ?err,
                    "failed to remove word cloud image"
                );
            }
        }
        count
    }

    pub fn prune_stale_files(&self, max_age_hours: u64) -> StorageResult<PruneReport> {
        let now = SystemTime::now();
        let mut report = PruneReport::default();
        let max_age = Duration::from_secs(max_age_hours.saturating_mul(60 * 60));

        if !self.dir.exists() {
            return Ok(report);
        }

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            if path
                .file_name()
                .and_then(|name| name.to_str())
                .is_none_or(|name| !name.starts_with(IMAGE_FILE_PREFIX))
            {
                continue;
            }

            let modified = fs::metadata(&path)?.modified()?;
            let age = now.duration_since(modified).unwrap_or(Duration::ZERO);

            if age > max_age {
                match fs::remove_file(&path) {
                    Ok(()) => report.removed_files += 1,
                    Err(err) => {
                        tracing::warn!(
                            path = %path.display(),
                            ?err,
                            "failed to remove stale word cloud image"
                        );
                    }
                }
            }
        }

        Ok(report)
    }
}

/// Raster formats are identified by the `image` crate; anything else must
/// at least look like an SVG document.
fn sniff_image(bytes: &[u8]) -> StorageResult<(CloudImageFormat, Option<(u32, u32)>)> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    if let Some(format) = reader.format() {
        let dimensions = reader.into_dimensions()?;
        return Ok((CloudImageFormat::Raster(format), Some(dimensions)));
    }
    if looks_like_svg(bytes) {
        return Ok((CloudImageFormat::Svg, None));
    }
    Err(StorageError::UnknownFormat)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(SVG_SNIFF_LIMIT)]);
    let head = head.trim_start_matches(|ch: char| ch.is_whitespace() || ch == '\u{FEFF}');
    head.starts_with('<') && head.contains("<svg")
}

pub fn prune_stale_image_files(max_age_hours: u64) -> StorageResult<PruneReport> {
    ImageStore::with_default_dir()?.prune_stale_files(max_age_hours)
}

fn default_image_dir() -> PathBuf {
    let runtime_dir = std::env::var_os("XDG_RUNTIME_DIR")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    image_dir_for(runtime_dir, &current_user_tag())
}

/// Outside a per-user runtime dir the shared temp dir needs a per-user
/// subdirectory.
fn image_dir_for(runtime_dir: Option<PathBuf>, user_tag: &str) -> PathBuf {
    match runtime_dir {
        Some(dir) => dir.join(IMAGE_SUBDIR),
        None => {
            PathBuf::from(DEFAULT_FALLBACK_RUNTIME_DIR).join(format!("{IMAGE_SUBDIR}-{user_tag}"))
        }
    }
}

fn current_user_tag() -> String {
    use std::os::unix::fs::MetadataExt;

    fs::metadata("/proc/self")
        .map(|meta| meta.uid().to_string())
        .or_else(|_| std::env::var("USER"))
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
pub(crate) fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let image = image::RgbaImage::from_pixel(width, height, image::Rgba([231, 76, 60, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png fixture");
    bytes
}
