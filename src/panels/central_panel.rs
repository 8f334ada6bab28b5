use egui::{Align2, Color32, FontId, Sense, Stroke};

use crate::RegionBlurApp;
use crate::geometry::{fit_rect, screen_to_image};

pub fn central_panel(app: &mut RegionBlurApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let canvas_rect = ui.available_rect_before_wrap();

        let Some(natural) = app.session().image_size() else {
            let response = ui.allocate_rect(canvas_rect.shrink(24.0), Sense::click());
            let painter = ui.painter();
            let stroke_color = if response.hovered() {
                Color32::from_gray(180)
            } else {
                Color32::from_gray(110)
            };
            painter.rect_stroke(response.rect, 12.0, Stroke::new(2.0, stroke_color));
            painter.text(
                response.rect.center(),
                Align2::CENTER_CENTER,
                "Drop an image here or click to open",
                FontId::proportional(18.0),
                stroke_color,
            );
            if response.clicked() {
                app.open_image();
            }
            return;
        };

        let display_rect = fit_rect(canvas_rect, natural);
        let response = ui.allocate_rect(display_rect, Sense::click_and_drag());

        // Handle input
        app.handle_canvas_input(ctx, display_rect);

        if let Some(hover) = response.hover_pos() {
            let pos = screen_to_image(hover, display_rect, natural);
            let cursor = app.session().hover_cursor(pos);
            ctx.set_cursor_icon(cursor);
        }

        // Render the canvas
        let painter = ui.painter().clone();
        app.render_canvas(&painter, display_rect);
    });
}
