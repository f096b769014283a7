//! Canvas export to raster image files.
//!
//! The canvas is rasterized with tiny-skia (fill color, background photo,
//! then visible markers in collection order) and encoded with the `image`
//! crate according to the destination's extension.

use egui::Color32;
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use std::path::Path;
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use crate::background::BackgroundImage;
use crate::canvas::Canvas;
use crate::error::{DecoratorError, Result};
use crate::geometry::{pixel_extent, to_pixels, transform::pixel_scale};
use crate::marker::Marker;

/// Encoded file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Bmp,
}

impl ExportFormat {
    /// Pick the encoder from the file extension. Unknown or missing
    /// extensions get lossless PNG.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());
        match ext.as_deref() {
            Some("jpg" | "jpeg") => Self::Jpeg,
            Some("bmp") => Self::Bmp,
            _ => Self::Png,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    pub dpi: f32,
    /// 1-100
    pub jpeg_quality: u8,
    pub canvas_fill: Color32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            dpi: crate::config::EXPORT_DPI,
            jpeg_quality: crate::config::JPEG_QUALITY,
            canvas_fill: Color32::WHITE,
        }
    }
}

/// Renders a [`Canvas`] off-screen and writes it out
#[derive(Debug, Clone, Default)]
pub struct CanvasExporter {
    options: ExportOptions,
}

impl CanvasExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Rasterize the canvas at its current size
    pub fn render(&self, canvas: &Canvas) -> Result<RgbaImage> {
        let (width, height) = pixel_extent(canvas.size(), self.options.dpi);
        let mut pixmap =
            Pixmap::new(width, height).ok_or(DecoratorError::EmptyCanvas { width, height })?;

        let [r, g, b, a] = self.options.canvas_fill.to_srgba_unmultiplied();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

        if let Some(background) = canvas.background() {
            self.draw_background(&mut pixmap, background, canvas);
        }
        for marker in canvas.visible_markers() {
            self.draw_marker(&mut pixmap, marker);
        }

        Ok(pixmap_to_rgba(&pixmap))
    }

    /// Render, encode for `path`'s extension, and write the file
    pub fn export_to_path(&self, canvas: &Canvas, path: &Path) -> Result<ExportFormat> {
        let format = ExportFormat::from_path(path);
        let image = self.render(canvas)?;
        let bytes = encode(&image, format, self.options.jpeg_quality)?;

        // Encode fully before touching the destination
        std::fs::write(path, &bytes).map_err(|source| DecoratorError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!(
            "Exported {}x{} {:?} ({} bytes) to {}",
            image.width(),
            image.height(),
            format,
            bytes.len(),
            path.display()
        );
        Ok(format)
    }

    fn draw_background(&self, pixmap: &mut Pixmap, background: &BackgroundImage, canvas: &Canvas) {
        let Some(source) = premultiplied_pixmap(background.pixels()) else {
            log::warn!("Skipping empty background image");
            return;
        };

        let fitted = background.fitted_rect(canvas.rect());
        let min = to_pixels(fitted.min, self.options.dpi);
        let scale = pixel_scale(self.options.dpi);
        let sx = fitted.width() * scale / background.width() as f32;
        let sy = fitted.height() * scale / background.height() as f32;

        // 1:1 placement on whole pixels needs no filtering
        let exact = sx == 1.0 && sy == 1.0 && min.x.fract() == 0.0 && min.y.fract() == 0.0;
        let paint = PixmapPaint {
            quality: if exact {
                FilterQuality::Nearest
            } else {
                FilterQuality::Bilinear
            },
            ..PixmapPaint::default()
        };

        pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &paint,
            Transform::from_row(sx, 0.0, 0.0, sy, min.x, min.y),
            None,
        );
    }

    fn draw_marker(&self, pixmap: &mut Pixmap, marker: &Marker) {
        let style = marker.style();
        let scale = pixel_scale(self.options.dpi);
        let center = to_pixels(marker.center(), self.options.dpi);
        let stroke_width = style.stroke_width.max(0.0) * scale;

        // The outline sits inside the marker's bounds, like a shape whose
        // geometry is inset by half the stroke
        let radius = marker.radius() * scale - stroke_width / 2.0;
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };

        let mut paint = Paint::default();
        paint.anti_alias = true;

        let [r, g, b, a] = style.fill.to_srgba_unmultiplied();
        paint.set_color_rgba8(r, g, b, a);
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

        if stroke_width > 0.0 {
            let [r, g, b, a] = style.stroke.to_srgba_unmultiplied();
            paint.set_color_rgba8(r, g, b, a);
            let stroke = Stroke {
                width: stroke_width,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

/// Render `canvas` and write it to `path`, picking the format from its extension
pub fn export_canvas(canvas: &Canvas, path: &Path, options: ExportOptions) -> Result<ExportFormat> {
    CanvasExporter::new(options).export_to_path(canvas, path)
}

/// Encode an RGBA raster in `format`. JPEG drops the alpha channel.
pub fn encode(image: &RgbaImage, format: ExportFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    let mut bytes = Vec::new();

    let result = match format {
        ExportFormat::Png => PngEncoder::new(&mut bytes).write_image(
            image.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        ExportFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, jpeg_quality.clamp(1, 100)).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        ExportFormat::Bmp => BmpEncoder::new(&mut bytes).write_image(
            image.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
    };
    result.map_err(|source| DecoratorError::Encode { format, source })?;

    Ok(bytes)
}

fn premultiplied_pixmap(pixels: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(pixels.width(), pixels.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(pixels.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}
