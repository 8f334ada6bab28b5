use egui::{Button, Color32, RichText, Slider};

use crate::RegionBlurApp;
use crate::components::ToolButton;
use crate::shape::{Effect, ShapeKind};
use crate::tools::ToolOption;

const SHAPE_BUTTONS: [(ShapeKind, &str); 2] = [(ShapeKind::Rectangle, "▭"), (ShapeKind::Ellipse, "◯")];
const EFFECT_BUTTONS: [(Effect, &str); 2] = [(Effect::Blur, "≋"), (Effect::Mosaic, "▦")];

pub fn tools_panel(app: &mut RegionBlurApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Region Blur");
            ui.separator();

            if let Some(notice) = app.session().notice().map(str::to_owned) {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new(notice).color(Color32::from_rgb(0xE5, 0x8E, 0x46)));
                    if ui.small_button("✕").clicked() {
                        app.session_mut().dismiss_notice();
                    }
                });
                ui.separator();
            }

            if !app.session().has_image() {
                ui.label("Drop an image onto the window to start.");
                if ui.button("Open image…").clicked() {
                    app.open_image();
                }
                return;
            }

            let options = *app.session().options();

            ui.label("Shape");
            ui.horizontal(|ui| {
                for (kind, icon) in SHAPE_BUTTONS {
                    if ToolButton::new(icon, kind.label(), options.kind == kind).show(ui).clicked() {
                        log::info!("Shape selected from UI: {}", kind.label());
                        app.session_mut().on_tool_option_changed(ToolOption::Kind(kind));
                    }
                }
            });

            ui.label("Effect");
            ui.horizontal(|ui| {
                for (effect, icon) in EFFECT_BUTTONS {
                    if ToolButton::new(icon, effect.label(), options.effect == effect).show(ui).clicked() {
                        log::info!("Effect selected from UI: {}", effect.label());
                        app.session_mut().on_tool_option_changed(ToolOption::Effect(effect));
                    }
                }
            });

            ui.label(options.effect.intensity_label());
            let mut intensity = options.intensity;
            let range = app.session().config().intensity_range();
            if ui.add(Slider::new(&mut intensity, range)).changed() {
                app.session_mut().on_tool_option_changed(ToolOption::Intensity(intensity));
            }

            ui.separator();

            let has_selection = app.session().selected().is_some();
            if ui.add_enabled(has_selection, Button::new("Delete Selected")).clicked() {
                app.session_mut().delete_selected();
            }
            ui.horizontal(|ui| {
                if ui.button("Reset").on_hover_text("Remove all regions").clicked() {
                    app.session_mut().reset();
                }
                if ui.button("Clear").on_hover_text("Close the image").clicked() {
                    app.clear_image();
                }
            });

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.session().can_undo();
                let can_redo = app.session().can_redo();

                if ui.add_enabled(can_undo, Button::new("Undo")).clicked() {
                    app.session_mut().undo();
                }
                if ui.add_enabled(can_redo, Button::new("Redo")).clicked() {
                    app.session_mut().redo();
                }
            });

            ui.separator();
            if ui.button("⬇ Download").clicked() {
                app.download();
            }

            ui.separator();
            ui.label(format!(
                "{} regions (State: {})",
                app.session().shapes().len(),
                app.session().tool().current_state_name()
            ));

            let history = app.session().history();
            egui::CollapsingHeader::new("History")
                .default_open(false)
                .show(ui, |ui| {
                    egui::Grid::new("command_history_grid")
                        .num_columns(2)
                        .spacing([24.0, 4.0])
                        .striped(true)
                        .show(ui, |ui| {
                            ui.strong("Undo");
                            ui.strong("Redo");
                            ui.end_row();

                            let undo_stack = history.undo_stack();
                            let redo_stack = history.redo_stack();
                            for i in 0..undo_stack.len().max(redo_stack.len()) {
                                ui.label(undo_stack.get(i).map_or("", |c| c.label()));
                                ui.label(redo_stack.get(i).map_or("", |c| c.label()));
                                ui.end_row();
                            }
                        });
                });
        });
}
