// src/infrastructure/photo_store.rs
//
// Photo Store - wine images on local disk
//
// CRITICAL RULES:
// - Wines reference photos by file name only
// - Writes are atomic: temp file in the same directory, then rename
// - I/O failure is never an error for the caller: it is logged and
//   surfaces as an absent result
// - File names are bare names; anything that could escape the
//   directory is refused

use std::io::Write;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage};
use tempfile::NamedTempFile;
use uuid::Uuid;

pub const DEFAULT_MAX_DIMENSION: u32 = 2000;
pub const DEFAULT_QUALITY: f32 = 0.85;

const PHOTO_EXTENSION: &str = "jpg";

#[derive(Debug, Clone)]
pub struct PhotoStore {
    directory: PathBuf,
}

impl PhotoStore {
    /// The directory is created lazily on first write
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Store already-encoded bytes under a fresh file name.
    ///
    /// Returns `None` when anything goes wrong; the caller keeps its previous state.
    pub fn save_image_bytes(&self, bytes: &[u8]) -> Option<String> {
        let filename = format!("{}.{}", Uuid::new_v4(), PHOTO_EXTENSION);
        match self.write_atomic(&filename, bytes) {
            Ok(()) => {
                log::debug!("Saved photo {} ({} bytes)", filename, bytes.len());
                Some(filename)
            }
            Err(e) => {
                log::warn!("Failed to save photo {}: {}", filename, e);
                None
            }
        }
    }

    /// Scale down to `max_dimension` on the longer side (never up), re-encode
    /// as JPEG at `quality` (0.0..=1.0) and store.
    pub fn save_image(&self, image: &DynamicImage, max_dimension: u32, quality: f32) -> Option<String> {
        let resized = fit_within(image, max_dimension);
        match encode_jpeg(resized.as_ref().unwrap_or(image), quality) {
            Ok(bytes) => self.save_image_bytes(&bytes),
            Err(e) => {
                log::warn!("Failed to encode photo: {}", e);
                None
            }
        }
    }

    /// Raw stored bytes, or `None` if the file is missing or unreadable
    pub fn load_image_bytes(&self, filename: &str) -> Option<Vec<u8>> {
        let path = self.resolve(filename)?;
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::debug!("Photo {} not readable: {}", filename, e);
                None
            }
        }
    }

    /// Decoded image, or `None` if the file is missing or does not decode
    pub fn load_image(&self, filename: &str) -> Option<DynamicImage> {
        let bytes = self.load_image_bytes(filename)?;
        match image::load_from_memory(&bytes) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("Photo {} does not decode: {}", filename, e);
                None
            }
        }
    }

    /// Best-effort delete; a missing file is not an error
    pub fn remove_image(&self, filename: &str) {
        let Some(path) = self.resolve(filename) else {
            return;
        };
        match std::fs::remove_file(&path) {
            Ok(()) => log::debug!("Removed photo {}", filename),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to remove photo {}: {}", filename, e),
        }
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.resolve(filename).is_some_and(|p| p.is_file())
    }

    /// Path of a stored file; `None` for names that are not a single plain component
    fn resolve(&self, filename: &str) -> Option<PathBuf> {
        let is_plain = !filename.is_empty()
            && !filename.contains(['/', '\\'])
            && filename != "."
            && !filename.contains("..");
        if !is_plain {
            log::warn!("Rejected photo filename {:?}", filename);
            return None;
        }
        Some(self.directory.join(filename))
    }

    fn write_atomic(&self, filename: &str, bytes: &[u8]) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.directory)?;

        let mut temp = NamedTempFile::new_in(&self.directory)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(self.directory.join(filename))
            .map_err(|e| e.error)?;
        Ok(())
    }
}

/// Uniformly scaled copy when the longer side exceeds `max_dimension`
fn fit_within(image: &DynamicImage, max_dimension: u32) -> Option<DynamicImage> {
    let longer = image.width().max(image.height());
    if max_dimension == 0 || longer <= max_dimension {
        return None;
    }
    Some(image.resize(max_dimension, max_dimension, FilterType::Lanczos3))
}

fn encode_jpeg(image: &DynamicImage, quality: f32) -> image::ImageResult<Vec<u8>> {
    let quality = (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
    let rgb = image.to_rgb8();

    let mut buffer = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)?;
    Ok(buffer)
}
