use egui::{Align2, Color32, FontId, Response, Sense, Stroke, Ui, Vec2};

const SELECTED_FILL: Color32 = Color32::from_rgb(0x4F, 0x46, 0xE5);
const SELECTED_BORDER: Color32 = Color32::from_rgb(0x37, 0x30, 0xA3);

/// Square toggle showing an icon over a short caption, used for the shape
/// and effect pickers.
pub struct ToolButton<'a> {
    pub icon: &'a str,
    pub label: &'a str,
    pub selected: bool,
}

impl<'a> ToolButton<'a> {
    pub fn new(icon: &'a str, label: &'a str, selected: bool) -> Self {
        Self { icon, label, selected }
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let button_size = Vec2::new(72.0, 52.0);
        let (rect, response) = ui.allocate_exact_size(button_size, Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                SELECTED_FILL
            } else if response.hovered() {
                Color32::from_gray(60)
            } else {
                Color32::from_gray(40)
            };
            let text_color = if self.selected {
                Color32::WHITE
            } else {
                Color32::from_gray(210)
            };

            let painter = ui.painter();
            painter.rect_filled(rect, 6.0, bg_color);
            painter.text(
                rect.center() - Vec2::new(0.0, 8.0),
                Align2::CENTER_CENTER,
                self.icon,
                FontId::proportional(20.0),
                text_color,
            );
            painter.text(
                rect.center_bottom() - Vec2::new(0.0, 9.0),
                Align2::CENTER_CENTER,
                self.label,
                FontId::proportional(12.0),
                text_color,
            );

            if self.selected {
                painter.rect_stroke(rect, 6.0, Stroke::new(2.0, SELECTED_BORDER));
            }
        }

        response.on_hover_text(self.label)
    }
}
