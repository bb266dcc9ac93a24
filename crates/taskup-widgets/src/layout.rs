//! Layout helpers: drag handle, separators, section labels.

use egui::{vec2, CornerRadius, Painter, Pos2, Rect, Stroke, Ui};

use crate::{sizing, theme};

/// Paint the sheet's grab bar centred horizontally, `top` px down.
/// Returns the bottom edge of the handle including its margin.
pub fn drag_handle(painter: &Painter, panel: Rect, top: f32) -> f32 {
    let bar = Rect::from_center_size(
        Pos2::new(
            panel.center().x,
            top + sizing::HANDLE_MARGIN + sizing::HANDLE_HEIGHT / 2.0,
        ),
        vec2(sizing::HANDLE_WIDTH, sizing::HANDLE_HEIGHT),
    );
    painter.rect_filled(bar, CornerRadius::same(sizing::HANDLE_RADIUS), theme::HANDLE);
    bar.bottom() + sizing::HANDLE_MARGIN
}

/// Draw a horizontal separator line.
pub fn separator(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let y = rect.top() + 4.0;
    ui.painter().line_segment(
        [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
        Stroke::new(1.0, theme::BORDER),
    );
    ui.add_space(8.0);
}

/// Draw a section label (small, muted, upper-case).
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(
        egui::RichText::new(text.to_uppercase())
            .size(11.0)
            .color(theme::TEXT_MUTED),
    );
}
