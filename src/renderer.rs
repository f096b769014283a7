use egui::{
    Align2, Color32, Context, FontId, Id, LayerId, Order, Painter, Pos2, Rect, Stroke,
    TextureHandle, TextureOptions, Vec2, pos2,
};

use crate::canvas::Canvas;
use crate::drag::Ghost;
use crate::geometry::{Frame, FrameLayout};
use crate::marker::{MarkerStyle, PaletteTemplate};

/// Paints the editor on screen: canvas, palette swatches, trash and the
/// ghost overlay.
#[derive(Default)]
pub struct Renderer {
    /// Uploaded background, tagged with the version it was made from
    background_texture: Option<(u64, TextureHandle)>,
}

// TextureHandle carries no useful Debug output
impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field(
                "background_version",
                &self.background_texture.as_ref().map(|(version, _)| version),
            )
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint the canvas into `rect` (window coordinates): fill, background,
    /// then visible markers in collection order.
    pub fn paint_canvas(
        &mut self,
        ctx: &Context,
        painter: &Painter,
        canvas: &Canvas,
        rect: Rect,
        fill: Color32,
    ) {
        painter.rect_filled(rect, 0.0, fill);

        if let Some(background) = canvas.background() {
            let stale = self
                .background_texture
                .as_ref()
                .is_none_or(|(version, _)| *version != background.version());
            if stale {
                log::debug!("Uploading background texture v{}", background.version());
                let texture = ctx.load_texture(
                    "canvas_background",
                    background.to_color_image(),
                    TextureOptions::LINEAR,
                );
                self.background_texture = Some((background.version(), texture));
            }
            if let Some((_, texture)) = &self.background_texture {
                let local = background.fitted_rect(canvas.rect());
                let on_screen = local.translate(rect.min.to_vec2());
                painter.image(
                    texture.id(),
                    on_screen,
                    Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
        } else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Select a background image to start",
                FontId::proportional(18.0),
                Color32::GRAY,
            );
        }

        for marker in canvas.visible_markers() {
            paint_circle(
                painter,
                marker.center() + rect.min.to_vec2(),
                marker.size(),
                marker.style(),
            );
        }
    }

    /// Paint the ghost on a layer above everything else
    pub fn paint_ghost(&self, ctx: &Context, ghost: &Ghost, layout: &FrameLayout) {
        let painter = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("ghost_overlay")));
        let center = layout.transform(ghost.center(), Frame::Overlay, Frame::Window);
        paint_circle(
            &painter,
            center,
            ghost.size(),
            ghost.style().faded(ghost.opacity()),
        );
    }

    /// Preview of a palette swatch following the pointer before it is dropped
    pub fn paint_template_preview(
        &self,
        ctx: &Context,
        template: &PaletteTemplate,
        pointer: Pos2,
        opacity: f32,
    ) {
        let painter = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("ghost_overlay")));
        paint_circle(
            &painter,
            pointer,
            template.size(),
            template.style.faded(opacity),
        );
    }

    pub fn paint_swatch(
        &self,
        painter: &Painter,
        rect: Rect,
        template: &PaletteTemplate,
        hovered: bool,
    ) {
        if hovered {
            painter.rect_filled(rect, 4.0, Color32::from_gray(60));
        }
        let diameter = template.diameter.min(rect.height() - 4.0).max(1.0);
        paint_circle(painter, rect.center(), Vec2::splat(diameter), template.style);
    }

    pub fn paint_trash(&self, painter: &Painter, rect: Rect, armed: bool) {
        let (fill, outline) = if armed {
            (Color32::from_rgb(120, 30, 30), Color32::from_rgb(240, 80, 80))
        } else {
            (Color32::from_gray(40), Color32::from_gray(110))
        };
        painter.rect_filled(rect, 6.0, fill);
        painter.rect_stroke(rect, 6.0, Stroke::new(1.5, outline));
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "🗑 Drop here to delete",
            FontId::proportional(14.0),
            outline,
        );
    }
}

/// Circle whose outline sits just inside `size`
fn paint_circle(painter: &Painter, center: Pos2, size: Vec2, style: MarkerStyle) {
    let radius = size.x.min(size.y) / 2.0 - style.stroke_width / 2.0;
    if radius <= 0.0 {
        return;
    }
    painter.circle(
        center,
        radius,
        style.fill,
        Stroke::new(style.stroke_width, style.stroke),
    );
}
