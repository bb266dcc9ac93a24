//! Button components: sheet close button, pill buttons.

use egui::{vec2, Align2, Color32, CornerRadius, CursorIcon, Sense, Stroke, Ui};

use crate::{sizing, theme};

/// Round "✕" button shown in the sheet header.
pub struct CloseButton {
    size: f32,
    tooltip: &'static str,
}

impl Default for CloseButton {
    fn default() -> Self {
        Self {
            size: sizing::CLOSE_BUTTON,
            tooltip: "Close",
        }
    }
}

impl CloseButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let (rect, response) = ui.allocate_exact_size(vec2(self.size, self.size), Sense::click());

        if ui.is_rect_visible(rect) {
            let bg = if response.hovered() {
                Color32::from_gray(229)
            } else {
                theme::HOVER_BG
            };
            let center = rect.center();
            let radius = self.size / 2.0;
            ui.painter().circle_filled(center, radius, bg);

            // Two strokes make the cross
            let arm = radius * 0.35;
            let stroke = Stroke::new(1.5, theme::TEXT_MUTED);
            ui.painter()
                .line_segment([center + vec2(-arm, -arm), center + vec2(arm, arm)], stroke);
            ui.painter()
                .line_segment([center + vec2(-arm, arm), center + vec2(arm, -arm)], stroke);
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// A rounded text button, filled with the accent colour when primary.
pub struct PillButton<'a> {
    label: &'a str,
    primary: bool,
    full_width: bool,
    height: f32,
}

impl<'a> PillButton<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            primary: false,
            full_width: false,
            height: 36.0,
        }
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Stretch across the available width.
    pub fn full_width(mut self) -> Self {
        self.full_width = true;
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = egui::FontId::proportional(14.0);
        let galley = ui.painter().layout_no_wrap(
            self.label.to_string(),
            font_id.clone(),
            Color32::PLACEHOLDER,
        );
        let width = if self.full_width {
            ui.available_width()
        } else {
            galley.size().x + 32.0
        };

        let (rect, response) = ui.allocate_exact_size(vec2(width, self.height), Sense::click());

        if ui.is_rect_visible(rect) {
            let (bg, text) = match (self.primary, response.hovered()) {
                (true, false) => (theme::ACCENT, Color32::WHITE),
                (true, true) => (Color32::from_rgb(37, 99, 235), Color32::WHITE),
                (false, false) => (theme::HOVER_BG, theme::TEXT),
                (false, true) => (Color32::from_gray(229), theme::TEXT),
            };
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg);
            ui.painter()
                .text(rect.center(), Align2::CENTER_CENTER, self.label, font_id, text);
        }

        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}
