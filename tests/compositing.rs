use egui::Pos2;
use image::{Rgba, RgbaImage};
use region_blur::compositor::compose;
use region_blur::effects::{blur, mosaic};
use region_blur::file_handler::decode_image;
use region_blur::id_generator::generate_id;
use region_blur::{
    Bounds, Effect, EditorConfig, EditorError, EditorSession, Shape, ShapeKind, ToolOption,
};

fn noisy(width: usize, height: usize) -> Vec<u8> {
    let mut buf = Vec::with_capacity(width * height * 4);
    let mut seed = 0x2545_f491_u32;
    for _ in 0..width * height {
        for _ in 0..4 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            buf.push((seed >> 24) as u8);
        }
    }
    buf
}

fn checker(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
}

fn shape(kind: ShapeKind, bounds: Bounds, effect: Effect, intensity: u32) -> Shape {
    Shape::new(generate_id(), kind, bounds, effect, intensity)
}

#[test]
fn test_blur_of_uniform_region_is_unchanged() {
    let mut buf = [17u8, 99, 230, 128].repeat(13 * 9);
    let original = buf.clone();
    for intensity in [1, 2, 7, 50] {
        blur(&mut buf, 13, 9, intensity);
        assert_eq!(buf, original);
    }
}

#[test]
fn test_mosaic_blocks_take_top_left_colour() {
    let (w, h, size) = (11, 7, 4);
    let original = noisy(w, h);
    let mut buf = original.clone();
    mosaic(&mut buf, w, h, size as u32);

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) * 4;
            let origin = ((y / size * size) * w + x / size * size) * 4;
            assert_eq!(&buf[idx..idx + 3], &original[origin..origin + 3], "pixel {},{}", x, y);
            assert_eq!(buf[idx + 3], original[idx + 3]);
        }
    }
}

#[test]
fn test_mosaic_is_idempotent() {
    let mut once = noisy(17, 12);
    mosaic(&mut once, 17, 12, 5);
    let mut twice = once.clone();
    mosaic(&mut twice, 17, 12, 5);
    assert_eq!(once, twice);
}

#[test]
fn test_solid_image_round_trip_is_unchanged() {
    let mut session = EditorSession::default();
    let red = RgbaImage::from_pixel(100, 100, Rgba([255, 0, 0, 255]));
    session.load_image(red.clone());
    session.on_tool_option_changed(ToolOption::Effect(Effect::Mosaic));
    session.on_tool_option_changed(ToolOption::Intensity(10));
    session.pointer_down(Pos2::new(10.0, 10.0));
    session.pointer_move(Pos2::new(40.0, 40.0));
    session.pointer_up(Pos2::new(40.0, 40.0));
    assert_eq!(session.shapes()[0].bounds, Bounds::new(10.0, 10.0, 30.0, 30.0));

    let exported = decode_image(&session.export_png().unwrap()).unwrap();
    assert_eq!(exported, red);
}

#[test]
fn test_rectangle_effect_stays_inside_its_box() {
    let source = checker(40, 40);
    let s = shape(ShapeKind::Rectangle, Bounds::new(10.0, 10.0, 12.0, 12.0), Effect::Blur, 4);
    let out = compose(&source, &[s]);
    for (x, y, pixel) in out.enumerate_pixels() {
        let inside = (10..22).contains(&x) && (10..22).contains(&y);
        if inside {
            // A 5x5 mean over a checkerboard is never pure black or white
            assert_ne!(pixel, source.get_pixel(x, y), "{},{}", x, y);
        } else {
            assert_eq!(pixel, source.get_pixel(x, y), "{},{}", x, y);
        }
    }
}

#[test]
fn test_ellipse_clip_keeps_corners_and_samples_box() {
    let source = RgbaImage::from_fn(30, 30, |x, _| {
        if x < 3 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([240, 240, 240, 255])
        }
    });
    let s = shape(ShapeKind::Ellipse, Bounds::new(0.0, 0.0, 30.0, 30.0), Effect::Blur, 8);
    let out = compose(&source, &[s]);

    // Box corners are outside the ellipse
    assert_eq!(out.get_pixel(0, 0), source.get_pixel(0, 0));
    assert_eq!(out.get_pixel(29, 29), source.get_pixel(29, 29));
    // Left-middle edge pixel is inside and was averaged with the dark columns
    let edge = out.get_pixel(1, 15);
    assert!(edge.0[0] > 0 && edge.0[0] < 240);
}

#[test]
fn test_effects_compose_in_list_order() {
    let source = checker(24, 24);
    let blur_first = [
        shape(ShapeKind::Rectangle, Bounds::new(0.0, 0.0, 24.0, 24.0), Effect::Blur, 2),
        shape(ShapeKind::Rectangle, Bounds::new(0.0, 0.0, 24.0, 24.0), Effect::Mosaic, 6),
    ];
    let mosaic_first = [blur_first[1].clone(), blur_first[0].clone()];
    assert_ne!(compose(&source, &blur_first), compose(&source, &mosaic_first));
}

#[test]
fn test_shape_hanging_off_image_is_clipped() {
    let source = RgbaImage::from_pixel(20, 20, Rgba([90, 90, 90, 255]));
    let s = shape(ShapeKind::Rectangle, Bounds::new(15.0, -5.0, 10.0, 10.0), Effect::Blur, 4);
    let out = compose(&source, &[s]);
    assert_eq!(out.dimensions(), (20, 20));
    // Pixels near the top edge average in transparent black from above
    assert!(out.get_pixel(16, 0).0[0] < 90);
    assert_eq!(out.get_pixel(16, 0).0[3], 255);
    assert_eq!(out.get_pixel(5, 5), source.get_pixel(5, 5));
}

#[test]
fn test_blur_at_very_large_intensity_composes() {
    let config = EditorConfig {
        intensity_max: 100_000,
        ..EditorConfig::default()
    };
    let mut session = EditorSession::new(config);
    let grey = RgbaImage::from_pixel(32, 32, Rgba([200, 200, 200, 255]));
    session.load_image(grey.clone());
    session.on_tool_option_changed(ToolOption::Effect(Effect::Blur));
    session.on_tool_option_changed(ToolOption::Intensity(100_000));
    session.pointer_down(Pos2::new(4.0, 4.0));
    session.pointer_move(Pos2::new(28.0, 28.0));
    session.pointer_up(Pos2::new(28.0, 28.0));
    assert_eq!(session.shapes()[0].intensity, 100_000);

    assert_eq!(session.compose().unwrap(), grey);
}

#[test]
fn test_export_without_image_fails() {
    let session = EditorSession::default();
    assert!(matches!(session.export_png(), Err(EditorError::NoImage)));
}
