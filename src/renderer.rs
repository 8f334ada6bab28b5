use std::f32::consts::TAU;

use egui::{Color32, ColorImage, Painter, Pos2, Rect, Shape as PaintShape, Stroke, TextureHandle, TextureOptions, Vec2};
use image::RgbaImage;

use crate::config::EditorConfig;
use crate::geometry::image_to_screen;
use crate::shape::{Shape, ShapeKind};
use crate::state::EditorSession;
use crate::widgets::resize_handle::{Corner, ResizeHandle};

/// Indigo used for outlines and handles
pub const OUTLINE_COLOR: Color32 = Color32::from_rgb(0x4F, 0x46, 0xE5);

/// Segments used to approximate an ellipse outline
const ELLIPSE_SEGMENTS: usize = 64;

/// Draws the editing surface: the composited image as one texture, with the
/// selection chrome painted on top in screen space every frame.
pub struct Renderer {
    texture: Option<TextureHandle>,
    ctx: egui::Context,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_texture", &self.texture.is_some())
            .finish()
    }
}

impl Renderer {
    /// Creates a renderer that uploads textures through `ctx`
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            texture: None,
            ctx: ctx.clone(),
        }
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    /// Recompose and re-upload the image if the session changed pixels since
    /// the last frame.
    ///
    /// Args:
    ///     session (EditorSession): The session to draw; its dirty flag is cleared
    pub fn sync_texture(&mut self, session: &mut EditorSession) {
        if !session.take_dirty() {
            return;
        }
        let Ok(composite) = session.compose() else {
            self.texture = None;
            return;
        };
        let image = to_color_image(&composite);
        match &mut self.texture {
            Some(handle) if handle.size() == image.size => handle.set(image, TextureOptions::LINEAR),
            _ => {
                log::debug!("Creating composite texture {}x{}", image.size[0], image.size[1]);
                self.texture = Some(self.ctx.load_texture("composite", image, TextureOptions::LINEAR));
            }
        }
    }

    /// Renders the current frame
    ///
    /// Args:
    ///     painter (egui::Painter): The painter to draw with
    ///     display_rect (egui::Rect): Where the image is shown on screen
    ///     session (EditorSession): Shapes, selection and the running gesture
    pub fn render(&self, painter: &Painter, display_rect: Rect, session: &EditorSession) {
        let Some(natural) = session.image_size() else {
            return;
        };
        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(texture.id(), display_rect, uv, Color32::WHITE);
        }

        let config = session.config();
        if let Some(provisional) = session.tool().provisional() {
            paint_overlay(painter, provisional, display_rect, natural, config);
        }
        if let Some(selected) = session.selected_shape() {
            paint_overlay(painter, selected, display_rect, natural, config);
        }
    }
}

pub fn to_color_image(image: &RgbaImage) -> ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

/// Dashed outline plus the four corner handles
fn paint_overlay(painter: &Painter, shape: &Shape, display_rect: Rect, natural: Vec2, config: &EditorConfig) {
    let stroke = Stroke::new(config.outline_width, OUTLINE_COLOR);
    let points = outline_points(shape, display_rect, natural);
    painter.extend(PaintShape::dashed_line(
        &points,
        stroke,
        config.outline_dash,
        config.outline_gap,
    ));

    for corner in Corner::ALL {
        let position = image_to_screen(corner.position(&shape.bounds), display_rect, natural);
        ResizeHandle::new(position, config.handle_size).paint(painter, OUTLINE_COLOR);
    }
}

/// Closed outline of `shape` in screen space
pub fn outline_points(shape: &Shape, display_rect: Rect, natural: Vec2) -> Vec<Pos2> {
    let to_screen = |p: Pos2| image_to_screen(p, display_rect, natural);
    let b = shape.bounds;
    match shape.kind {
        ShapeKind::Rectangle => vec![
            to_screen(b.left_top()),
            to_screen(b.right_top()),
            to_screen(b.right_bottom()),
            to_screen(b.left_bottom()),
            to_screen(b.left_top()),
        ],
        ShapeKind::Ellipse => {
            let center = b.center();
            let radii = b.radii();
            (0..=ELLIPSE_SEGMENTS)
                .map(|i| {
                    let angle = TAU * i as f32 / ELLIPSE_SEGMENTS as f32;
                    to_screen(center + Vec2::new(radii.x * angle.cos(), radii.y * angle.sin()))
                })
                .collect()
        }
    }
}
