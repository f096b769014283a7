//! Coordinate frames used by the editor.
//!
//! Every rect in [`FrameLayout`] is measured in window coordinates, which is
//! what egui hands out for widget rects and pointer positions. The canvas and
//! the ghost overlay each have their own local frame whose origin is the
//! top-left corner of their rect.

use egui::{Pos2, Rect, Vec2, pos2};

/// Resolution at which one logical point maps to one pixel
pub const BASE_DPI: f32 = 96.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Window,
    Canvas,
    Overlay,
}

/// Live geometry of the editor's layers, re-measured every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameLayout {
    pub canvas: Rect,
    /// Layer above the canvas that ghosts are drawn on (normally the whole window)
    pub overlay: Rect,
    pub trash: Rect,
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self {
            canvas: Rect::ZERO,
            overlay: Rect::ZERO,
            trash: Rect::NOTHING,
        }
    }
}

impl FrameLayout {
    pub fn origin(&self, frame: Frame) -> Pos2 {
        match frame {
            Frame::Window => Pos2::ZERO,
            Frame::Canvas => self.canvas.min,
            Frame::Overlay => self.overlay.min,
        }
    }

    /// Re-express `point` from one frame in another
    pub fn transform(&self, point: Pos2, from: Frame, to: Frame) -> Pos2 {
        point + (self.origin(from) - self.origin(to))
    }

    /// Whether a window-space position lies inside the trash region
    pub fn is_in_trash(&self, window_pos: Pos2) -> bool {
        self.trash.contains(window_pos)
    }

    pub fn is_in_canvas(&self, window_pos: Pos2) -> bool {
        self.canvas.contains(window_pos)
    }

    /// Canvas and trash are the only places a drag may end
    pub fn is_drop_target(&self, window_pos: Pos2) -> bool {
        self.is_in_canvas(window_pos) || self.is_in_trash(window_pos)
    }
}

/// Pixels per logical point at `dpi`
pub fn pixel_scale(dpi: f32) -> f32 {
    dpi / BASE_DPI
}

/// Canvas-local point to raster pixel coordinates
pub fn to_pixels(point: Pos2, dpi: f32) -> Pos2 {
    let scale = pixel_scale(dpi);
    pos2(point.x * scale, point.y * scale)
}

/// Whole-pixel raster size for a logical size; fractions are truncated
pub fn pixel_extent(size: Vec2, dpi: f32) -> (u32, u32) {
    let scale = pixel_scale(dpi);
    let width = (size.x * scale).max(0.0) as u32;
    let height = (size.y * scale).max(0.0) as u32;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    fn layout() -> FrameLayout {
        FrameLayout {
            canvas: Rect::from_min_size(pos2(220.0, 30.0), vec2(800.0, 600.0)),
            overlay: Rect::from_min_size(pos2(0.0, 0.0), vec2(1280.0, 800.0)),
            trash: Rect::from_min_size(pos2(10.0, 700.0), vec2(180.0, 80.0)),
        }
    }

    #[test]
    fn test_canvas_to_overlay() {
        let layout = layout();
        let overlay = layout.transform(pos2(10.0, 20.0), Frame::Canvas, Frame::Overlay);
        assert_eq!(overlay, pos2(230.0, 50.0));
    }

    #[test]
    fn test_round_trip_through_all_frames() {
        let layout = FrameLayout {
            overlay: Rect::from_min_size(pos2(4.0, 8.0), vec2(100.0, 100.0)),
            ..layout()
        };
        let start = pos2(33.5, 71.25);
        let window = layout.transform(start, Frame::Canvas, Frame::Window);
        let overlay = layout.transform(window, Frame::Window, Frame::Overlay);
        let back = layout.transform(overlay, Frame::Overlay, Frame::Canvas);
        assert!((back - start).length() < 1e-4);
    }

    #[test]
    fn test_default_layout_has_no_trash() {
        let layout = FrameLayout::default();
        assert!(!layout.is_in_trash(pos2(0.0, 0.0)));
    }

    #[test]
    fn test_drop_targets() {
        let layout = layout();
        assert!(layout.is_drop_target(pos2(500.0, 300.0)));
        assert!(layout.is_drop_target(pos2(50.0, 750.0)));
        assert!(!layout.is_drop_target(pos2(50.0, 300.0)));
    }

    #[test]
    fn test_pixel_extent_truncates() {
        assert_eq!(pixel_extent(vec2(800.6, 600.2), BASE_DPI), (800, 600));
        assert_eq!(pixel_extent(vec2(100.0, 50.0), 192.0), (200, 100));
        assert_eq!(pixel_extent(vec2(-3.0, 10.0), BASE_DPI), (0, 10));
    }
}
