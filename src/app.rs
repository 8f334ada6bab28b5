use egui::{Painter, Rect};
use image::RgbaImage;

use crate::config::EditorConfig;
use crate::error::EditorResult;
use crate::file_handler::{self, FileHandler};
use crate::input::{CanvasInput, InputEvent, Shortcut};
use crate::panels::{central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::{EditorSession, SettingsSnapshot};

pub struct RegionBlurApp {
    session: EditorSession,
    renderer: Renderer,
    file_handler: FileHandler,
    canvas_input: CanvasInput,
}

impl RegionBlurApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, mut config: EditorConfig) -> Self {
        if let Some(storage) = cc.storage {
            if let Some(snapshot) = eframe::get_value::<SettingsSnapshot>(storage, eframe::APP_KEY) {
                log::debug!("Restoring tool options {:?}", snapshot.tool);
                snapshot.apply_to(&mut config);
            }
        }
        Self::with_context(&cc.egui_ctx, config)
    }

    /// Build the app around an existing egui context, without persisted state
    pub fn with_context(ctx: &egui::Context, config: EditorConfig) -> Self {
        Self {
            session: EditorSession::new(config),
            renderer: Renderer::new(ctx),
            file_handler: FileHandler::new(),
            canvas_input: CanvasInput::new(),
        }
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditorSession {
        &mut self.session
    }

    /// Replace the current image, or report why it could not be loaded
    pub fn load_image_result(&mut self, result: EditorResult<RgbaImage>) {
        match result {
            Ok(image) => {
                self.canvas_input = CanvasInput::new();
                self.session.load_image(image);
            }
            Err(err) => {
                log::error!("{}", err);
                self.session.set_notice(err.to_string());
            }
        }
    }

    pub fn open_image(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        if let Some(result) = file_handler::open_image_dialog() {
            self.load_image_result(result);
        }
    }

    /// Encode the composite and let the user pick where to save it
    pub fn download(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let result = self.session.export_png().and_then(|bytes| {
                file_handler::save_png_dialog(&bytes, &self.session.config().export_file_name)
            });
            match result {
                Ok(Some(path)) => self.session.set_notice(format!("Saved {}", path.display())),
                Ok(None) => log::debug!("Export cancelled"),
                Err(err) => {
                    log::error!("{}", err);
                    self.session.set_notice(err.to_string());
                }
            }
        }
    }

    pub fn clear_image(&mut self) {
        self.canvas_input = CanvasInput::new();
        self.session.clear_image();
    }

    /// Feed this frame's canvas input to the session
    pub fn handle_canvas_input(&mut self, ctx: &egui::Context, display_rect: Rect) {
        let Some(natural) = self.session.image_size() else {
            return;
        };
        for event in self.canvas_input.process_input(ctx, display_rect, natural) {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerDown { pos } => self.session.pointer_down(pos),
            InputEvent::PointerMove { pos } => self.session.pointer_move(pos),
            InputEvent::PointerUp { pos } => self.session.pointer_up(pos),
            InputEvent::PointerLeave { last_known } => self.session.pointer_up(last_known),
            InputEvent::Shortcut(Shortcut::DeleteSelected) => {
                self.session.delete_selected();
            }
            InputEvent::Shortcut(Shortcut::Deselect) => self.session.deselect(),
            InputEvent::Shortcut(Shortcut::Undo) => {
                self.session.undo();
            }
            InputEvent::Shortcut(Shortcut::Redo) => {
                self.session.redo();
            }
        }
    }

    pub fn render_canvas(&mut self, painter: &Painter, display_rect: Rect) {
        self.renderer.sync_texture(&mut self.session);
        self.renderer.render(painter, display_rect, &self.session);
    }
}

impl eframe::App for RegionBlurApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let snapshot = SettingsSnapshot::new(*self.session.options());
        eframe::set_value(storage, eframe::APP_KEY, &snapshot);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.file_handler.preview_files_being_dropped(ctx);
        if self.file_handler.check_for_dropped_files(ctx) {
            if let Some(result) = self.file_handler.take_dropped_image() {
                self.load_image_result(result);
            }
        }

        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
