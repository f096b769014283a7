use egui::{ColorImage, Rect, Vec2};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{DecoratorError, Result};

// Bumped for every decoded background so cached textures can be told apart
static NEXT_BACKGROUND_VERSION: AtomicU64 = AtomicU64::new(1);

/// Extensions offered by the open dialog and accepted from file drops
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// A fully decoded background photo
#[derive(Clone)]
pub struct BackgroundImage {
    pixels: RgbaImage,
    source: Option<PathBuf>,
    version: u64,
}

// RgbaImage's Debug would dump every pixel
impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("source", &self.source)
            .field("version", &self.version)
            .finish()
    }
}

impl BackgroundImage {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            source: None,
            version: NEXT_BACKGROUND_VERSION.fetch_add(1, Ordering::SeqCst),
        }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    /// Where the image lands inside `bounds`: scaled uniformly to fit and
    /// centered, keeping its aspect ratio.
    pub fn fitted_rect(&self, bounds: Rect) -> Rect {
        let size = self.size();
        if size.x <= 0.0 || size.y <= 0.0 || !bounds.is_positive() {
            return bounds;
        }
        let scale = (bounds.width() / size.x).min(bounds.height() / size.y);
        Rect::from_center_size(bounds.center(), size * scale)
    }

    pub fn to_color_image(&self) -> ColorImage {
        let size = [self.width() as usize, self.height() as usize];
        ColorImage::from_rgba_unmultiplied(size, self.pixels.as_raw())
    }
}

/// Decode an image file completely. Nothing is touched on failure.
pub fn load_background(path: &Path) -> Result<BackgroundImage> {
    let decoded = image::open(path).map_err(|source| DecoratorError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "Decoded {}: {}x{}",
        path.display(),
        decoded.width(),
        decoded.height()
    );
    Ok(BackgroundImage::from_rgba(decoded.to_rgba8()).with_source(path))
}

/// Decode an image handed over as raw bytes (e.g. a drop without a path)
pub fn load_background_from_bytes(name: &str, bytes: &[u8]) -> Result<BackgroundImage> {
    let decoded = image::load_from_memory(bytes).map_err(|source| DecoratorError::ImageLoad {
        path: PathBuf::from(name),
        source,
    })?;
    Ok(BackgroundImage::from_rgba(decoded.to_rgba8()).with_source(name))
}

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use image::Rgba;

    #[test]
    fn test_fitted_rect_letterboxes_wide_image() {
        let pixels = RgbaImage::from_pixel(200, 100, Rgba([0, 0, 0, 255]));
        let background = BackgroundImage::from_rgba(pixels);
        let bounds = Rect::from_min_size(pos2(0.0, 0.0), Vec2::new(100.0, 100.0));

        let fitted = background.fitted_rect(bounds);
        assert_eq!(fitted.width(), 100.0);
        assert_eq!(fitted.height(), 50.0);
        assert_eq!(fitted.center(), bounds.center());
    }

    #[test]
    fn test_versions_are_unique() {
        let a = BackgroundImage::from_rgba(RgbaImage::new(1, 1));
        let b = BackgroundImage::from_rgba(RgbaImage::new(1, 1));
        assert_ne!(a.version(), b.version());
    }

    #[test]
    fn test_image_path_detection() {
        assert!(is_image_path(Path::new("photo.JPG")));
        assert!(is_image_path(Path::new("dir/scan.gif")));
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(!is_image_path(Path::new("no_extension")));
    }

    #[test]
    fn test_load_missing_file_is_load_error() {
        let err = load_background(Path::new("/definitely/not/here.png")).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::ImageLoad);
    }
}
