#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use clap::Parser;
use region_blur::{EditorConfig, EditorError, RegionBlurApp, file_handler};

/// Blur or pixelate regions of an image and save the result as PNG
#[derive(Parser, Debug)]
#[command(name = "region_blur", version)]
struct Args {
    /// JSON file overriding editor defaults
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Image to open on startup
    #[arg(value_name = "IMAGE")]
    image: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EditorConfig::load(path).unwrap_or_else(|err| {
            log::error!("Ignoring config {}: {}", path.display(), err);
            EditorConfig::default()
        }),
        None => EditorConfig::default(),
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Region Blur")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([480.0, 360.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "region_blur",
        native_options,
        Box::new(move |cc| {
            let mut app = RegionBlurApp::new(cc, config);
            if let Some(path) = &args.image {
                let result = std::fs::read(path)
                    .map_err(EditorError::from)
                    .and_then(|bytes| file_handler::decode_image(&bytes));
                app.load_image_result(result);
            }
            Ok(Box::new(app))
        }),
    )
}
