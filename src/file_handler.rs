use std::io::Cursor;
use std::path::{Path, PathBuf};

use egui::{Align2, Color32, DroppedFile, FontId, Id, LayerId, Order};
use image::{ImageFormat, RgbaImage};

use crate::error::{EditorError, EditorResult};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Decode any supported raster format into straight RGBA8
pub fn decode_image(bytes: &[u8]) -> EditorResult<RgbaImage> {
    let img = image::load_from_memory(bytes).map_err(EditorError::Decode)?;
    log::debug!("Decoded image: {}x{}", img.width(), img.height());
    Ok(img.to_rgba8())
}

/// Encode a composite as PNG
pub fn encode_png(image: &RgbaImage) -> EditorResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(EditorError::Encode)?;
    Ok(bytes)
}

pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Check if a dropped file is an image based on MIME type or extension
pub fn is_image_file(file: &DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else if let Some(path) = &file.path {
        is_image_path(path)
    } else {
        is_image_path(Path::new(&file.name))
    }
}

fn display_name(file: &DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Read and decode one dropped file, from memory when the platform handed
/// us bytes and from disk otherwise.
pub fn load_dropped_file(file: &DroppedFile) -> EditorResult<RgbaImage> {
    let name = display_name(file);
    if !is_image_file(file) {
        return Err(EditorError::UnsupportedFile(name));
    }
    if let Some(bytes) = &file.bytes {
        log::info!("Loading image from memory: {} ({} bytes)", name, bytes.len());
        return decode_image(bytes);
    }
    if let Some(path) = &file.path {
        log::info!("Loading image from path: {}", path.display());
        return decode_image(&std::fs::read(path)?);
    }
    Err(EditorError::UnsupportedFile(name))
}

/// Collects files dropped onto the window and shows a hover overlay while
/// they are being dragged in.
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up newly dropped files. Returns true if there were any.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
            }
        });
        !self.dropped_files.is_empty()
    }

    /// Load the first dropped image, skipping other files.
    /// Only one image is edited at a time, so further images are ignored.
    pub fn take_dropped_image(&mut self) -> Option<EditorResult<RgbaImage>> {
        let files = std::mem::take(&mut self.dropped_files);
        let Some(file) = files.iter().find(|f| is_image_file(f)) else {
            if let Some(file) = files.first() {
                log::warn!("Dropped file is not a supported type: {}", display_name(file));
                return Some(Err(EditorError::UnsupportedFile(display_name(file))));
            }
            return None;
        };
        if files.len() > 1 {
            log::debug!("Ignoring {} extra dropped files", files.len() - 1);
        }
        Some(load_dropped_file(file))
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }
        let text = ctx.input(|i| {
            let mut text = "Drop image to edit:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(20.0),
            Color32::WHITE,
        );
    }
}

/// Show a native open dialog and decode the chosen image.
/// Returns None if the user cancelled.
#[cfg(not(target_arch = "wasm32"))]
pub fn open_image_dialog() -> Option<EditorResult<RgbaImage>> {
    let path = rfd::FileDialog::new()
        .add_filter("Images", IMAGE_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .pick_file()?;
    log::info!("Opening image {}", path.display());
    Some(std::fs::read(&path).map_err(EditorError::from).and_then(|bytes| decode_image(&bytes)))
}

/// Ask where to save the export and write `bytes` there.
/// Returns the chosen path, or None if the user cancelled.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_png_dialog(bytes: &[u8], default_name: &str) -> EditorResult<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("PNG", &["png"])
        .set_file_name(default_name)
        .save_file()
    else {
        return Ok(None);
    };
    write_file(&path, bytes)?;
    Ok(Some(path))
}

pub fn write_file(path: &Path, bytes: &[u8]) -> EditorResult<()> {
    std::fs::write(path, bytes)?;
    log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
