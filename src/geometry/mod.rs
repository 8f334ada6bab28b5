pub mod hit_testing;

use egui::{Pos2, Rect, Vec2};

/// Map a pointer position on the displayed canvas into source-image pixels.
///
/// Every pointer entry point goes through here, so stored shapes never
/// depend on how large the canvas happens to be on screen.
pub fn screen_to_image(point: Pos2, display_rect: Rect, natural_size: Vec2) -> Pos2 {
    let offset = point - display_rect.min;
    if display_rect.width() <= 0.0 || display_rect.height() <= 0.0 {
        return offset.to_pos2();
    }
    Pos2::new(
        offset.x * natural_size.x / display_rect.width(),
        offset.y * natural_size.y / display_rect.height(),
    )
}

/// Inverse of [`screen_to_image`]
pub fn image_to_screen(point: Pos2, display_rect: Rect, natural_size: Vec2) -> Pos2 {
    if natural_size.x <= 0.0 || natural_size.y <= 0.0 {
        return display_rect.min + point.to_vec2();
    }
    display_rect.min
        + Vec2::new(
            point.x * display_rect.width() / natural_size.x,
            point.y * display_rect.height() / natural_size.y,
        )
}

/// Largest rect with the image's aspect ratio that fits in `available`,
/// centered. Images are shrunk to fit but never blown up past 1:1.
pub fn fit_rect(available: Rect, natural_size: Vec2) -> Rect {
    if natural_size.x <= 0.0 || natural_size.y <= 0.0 {
        return Rect::from_center_size(available.center(), Vec2::ZERO);
    }
    let scale = (available.width() / natural_size.x)
        .min(available.height() / natural_size.y)
        .min(1.0)
        .max(0.0);
    Rect::from_center_size(available.center(), natural_size * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_image_scales_by_display_ratio() {
        let display = Rect::from_min_size(Pos2::new(100.0, 50.0), Vec2::new(200.0, 100.0));
        let natural = Vec2::new(800.0, 400.0);
        let p = screen_to_image(Pos2::new(150.0, 75.0), display, natural);
        assert_eq!(p, Pos2::new(200.0, 100.0));
    }

    #[test]
    fn test_image_to_screen_round_trips() {
        let display = Rect::from_min_size(Pos2::new(10.0, 20.0), Vec2::new(300.0, 150.0));
        let natural = Vec2::new(600.0, 300.0);
        let image_pos = Pos2::new(123.0, 77.0);
        let back = screen_to_image(image_to_screen(image_pos, display, natural), display, natural);
        assert!((back.x - image_pos.x).abs() < 1e-3);
        assert!((back.y - image_pos.y).abs() < 1e-3);
    }

    #[test]
    fn test_fit_rect_never_upscales() {
        let available = Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 1000.0));
        let fitted = fit_rect(available, Vec2::new(100.0, 50.0));
        assert_eq!(fitted.size(), Vec2::new(100.0, 50.0));
        assert_eq!(fitted.center(), available.center());
    }

    #[test]
    fn test_fit_rect_shrinks_preserving_aspect() {
        let available = Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 300.0));
        let fitted = fit_rect(available, Vec2::new(800.0, 400.0));
        assert_eq!(fitted.size(), Vec2::new(400.0, 200.0));
    }
}
