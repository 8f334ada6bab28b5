//! Pixel side of rendering: bake every shape's effect into a copy of the
//! source image.
//!
//! Each shape runs its kernel over the whole integer bounding box of the
//! current surface, then only pixels whose centre lies inside the shape's
//! exact geometry are written back. Effects therefore compose in list order,
//! and an ellipse's kernel still samples the corners of its box that end up
//! clipped away.

use egui::Pos2;
use image::RgbaImage;

use crate::effects;
use crate::shape::Shape;

const CHANNELS: usize = 4;

/// Integer pixel box a shape's kernel runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: i64,
    pub y: i64,
    pub width: usize,
    pub height: usize,
}

impl PixelRegion {
    /// Floors origin and extent of the shape's normalized bounds.
    /// Returns None for boxes that floor to zero pixels.
    pub fn of(shape: &Shape) -> Option<Self> {
        let b = shape.bounds.normalized();
        let width = b.width.floor() as i64;
        let height = b.height.floor() as i64;
        if width <= 0 || height <= 0 {
            return None;
        }
        Some(Self {
            x: b.x.floor() as i64,
            y: b.y.floor() as i64,
            width: width as usize,
            height: height as usize,
        })
    }
}

/// Flattened output: source plus every shape effect, no selection chrome
pub fn compose(source: &RgbaImage, shapes: &[Shape]) -> RgbaImage {
    let mut surface = source.clone();
    for shape in shapes {
        apply_shape(&mut surface, shape);
    }
    surface
}

/// Apply one shape's effect to `surface` in place
pub fn apply_shape(surface: &mut RgbaImage, shape: &Shape) {
    let Some(region) = PixelRegion::of(shape) else {
        return;
    };

    let mut buf = extract_region(surface, region);
    effects::apply(shape.effect, shape.intensity, &mut buf, region.width, region.height);

    let (img_w, img_h) = (surface.width() as i64, surface.height() as i64);
    for ry in 0..region.height {
        let py = region.y + ry as i64;
        if py < 0 || py >= img_h {
            continue;
        }
        for rx in 0..region.width {
            let px = region.x + rx as i64;
            if px < 0 || px >= img_w {
                continue;
            }
            let centre = Pos2::new(px as f32 + 0.5, py as f32 + 0.5);
            if !shape.contains(centre) {
                continue;
            }
            let idx = (ry * region.width + rx) * CHANNELS;
            let pixel = surface.get_pixel_mut(px as u32, py as u32);
            pixel.0.copy_from_slice(&buf[idx..idx + CHANNELS]);
        }
    }
}

/// Copy `region` out of `surface`. Pixels outside the image read as
/// transparent black.
pub fn extract_region(surface: &RgbaImage, region: PixelRegion) -> Vec<u8> {
    let mut buf = vec![0u8; region.width * region.height * CHANNELS];
    let (img_w, img_h) = (surface.width() as i64, surface.height() as i64);
    let raw = surface.as_raw();

    let x0 = region.x.max(0);
    let x1 = (region.x + region.width as i64).min(img_w);
    if x0 >= x1 {
        return buf;
    }
    let span = (x1 - x0) as usize * CHANNELS;

    for ry in 0..region.height {
        let py = region.y + ry as i64;
        if py < 0 || py >= img_h {
            continue;
        }
        let src = ((py * img_w + x0) as usize) * CHANNELS;
        let dst = (ry * region.width + (x0 - region.x) as usize) * CHANNELS;
        buf[dst..dst + span].copy_from_slice(&raw[src..src + span]);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generator::generate_id;
    use crate::shape::{Bounds, Effect, ShapeKind};
    use image::Rgba;

    fn shape(kind: ShapeKind, bounds: Bounds, effect: Effect, intensity: u32) -> Shape {
        Shape::new(generate_id(), kind, bounds, effect, intensity)
    }

    #[test]
    fn test_region_floors_fractional_bounds() {
        let s = shape(ShapeKind::Rectangle, Bounds::new(10.7, 3.2, 5.9, 4.99), Effect::Blur, 4);
        assert_eq!(
            PixelRegion::of(&s),
            Some(PixelRegion { x: 10, y: 3, width: 5, height: 4 })
        );
    }

    #[test]
    fn test_sub_pixel_shape_has_no_region() {
        let s = shape(ShapeKind::Rectangle, Bounds::new(10.0, 10.0, 0.5, 30.0), Effect::Blur, 4);
        assert!(PixelRegion::of(&s).is_none());
    }

    #[test]
    fn test_extract_pads_outside_with_transparent_black() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
        let buf = extract_region(&img, PixelRegion { x: -1, y: 2, width: 3, height: 3 });
        // first column is off-image
        assert_eq!(&buf[0..4], &[0, 0, 0, 0]);
        assert_eq!(&buf[4..8], &[9, 9, 9, 255]);
        // last row (y = 4) is off-image
        assert!(buf[2 * 3 * 4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_ellipse_clip_leaves_box_corners() {
        let mut img = RgbaImage::new(20, 20);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = Rgba([(x * 10) as u8, (y * 10) as u8, 0, 255]);
        }
        let before = img.clone();
        let s = shape(ShapeKind::Ellipse, Bounds::new(0.0, 0.0, 20.0, 20.0), Effect::Mosaic, 10);
        apply_shape(&mut img, &s);
        assert_eq!(img.get_pixel(0, 0), before.get_pixel(0, 0));
        assert_eq!(img.get_pixel(19, 19), before.get_pixel(19, 19));
        // centre pixel takes the colour of its block origin (10, 10)
        assert_eq!(img.get_pixel(12, 12), before.get_pixel(10, 10));
    }
}
