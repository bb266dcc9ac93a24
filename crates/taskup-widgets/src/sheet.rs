//! Bottom sheet view.
//!
//! Paints a [`BottomSheet`] over the whole screen (backdrop plus panel) and
//! feeds pointer input back into it. The host owns the sheet and steps its
//! animations; the view only reads the state and forwards interactions.

use egui::{
    vec2, Align2, Color32, Context, CornerRadius, FontId, Id, Order, Pos2, Rect, Response, Sense,
    Stroke, Ui, UiBuilder,
};
use kurbo::Point;
use taskup_core::{BottomSheet, CloseReason, Release, SheetConfig, VelocityTracker};

use crate::buttons::CloseButton;
use crate::layout::drag_handle;
use crate::{sizing, theme};

/// What happened to the sheet during this frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetResponse {
    /// The backdrop was tapped (whether or not it dismissed the sheet).
    pub backdrop_clicked: bool,
    /// The header close button was clicked.
    pub close_clicked: bool,
    /// A drag gesture ended this frame.
    pub release: Option<Release>,
}

impl SheetResponse {
    /// Whether any interaction this frame started dismissing the sheet.
    pub fn dismissed(&self) -> bool {
        self.close_clicked
            || self.backdrop_clicked
            || matches!(self.release, Some(Release::Dismissed(_)))
    }
}

/// Per-sheet gesture memory kept in egui's temp storage between frames.
#[derive(Clone, Default)]
struct DragMemory {
    start_y: Option<f32>,
    tracker: VelocityTracker,
}

/// Renders a bottom sheet and routes its input.
pub struct SheetView<'a> {
    id: Id,
    sheet: &'a mut BottomSheet,
}

impl<'a> SheetView<'a> {
    pub fn new(id_salt: impl std::hash::Hash, sheet: &'a mut BottomSheet) -> Self {
        Self {
            id: Id::new(id_salt),
            sheet,
        }
    }

    /// Show the sheet with `add_contents` inside its body.
    ///
    /// Nothing is painted while the sheet is closed.
    pub fn show(self, ctx: &Context, add_contents: impl FnOnce(&mut Ui)) -> SheetResponse {
        let Self { id, sheet } = self;
        let mut response = SheetResponse::default();

        let screen = ctx.input(|i| i.content_rect());
        sheet.set_container_height(screen.height() as f64);
        if !sheet.is_mounted() {
            return response;
        }

        // Backdrop
        let backdrop = backdrop_color(sheet.backdrop_alpha());
        egui::Area::new(id.with("backdrop"))
            .fixed_pos(screen.min)
            .order(Order::Middle)
            .interactable(true)
            .show(ctx, |ui| {
                let clicked = ui.allocate_rect(screen, Sense::click()).clicked();
                ui.painter().rect_filled(screen, 0.0, backdrop);
                response.backdrop_clicked = clicked;
            });
        if response.backdrop_clicked {
            sheet.close(CloseReason::Backdrop);
        }

        // Panel
        let panel = panel_rect(screen, sheet.offset());
        let config = sheet.config().clone();
        egui::Area::new(id.with("panel"))
            .fixed_pos(panel.min)
            .order(Order::Foreground)
            .constrain(false)
            .interactable(true)
            .show(ctx, |ui| {
                ui.allocate_rect(panel, Sense::hover());
                let drag = ui.interact(panel, id.with("drag"), Sense::drag());
                response.release = handle_drag(ctx, id, sheet, &drag);

                let painter = ui.painter().clone();
                let radius = sizing::SHEET_RADIUS;
                painter.rect_filled(
                    panel,
                    CornerRadius {
                        nw: radius,
                        ne: radius,
                        sw: 0,
                        se: 0,
                    },
                    theme::SHEET_BG,
                );

                let mut cursor = if config.show_handle {
                    drag_handle(&painter, panel, panel.top())
                } else {
                    panel.top() + sizing::CONTENT_PADDING / 2.0
                };

                if has_header(&config) {
                    let header = Rect::from_min_size(
                        Pos2::new(panel.left(), cursor),
                        vec2(panel.width(), sizing::HEADER_HEIGHT),
                    );
                    response.close_clicked = show_header(ui, &painter, header, &config);
                    cursor = header.bottom();
                }

                let content = content_rect(panel, cursor);
                ui.scope_builder(UiBuilder::new().max_rect(content), |ui| {
                    ui.set_clip_rect(content.intersect(screen));
                    add_contents(ui);
                });
            });

        if response.close_clicked {
            sheet.close(CloseReason::CloseButton);
        }
        if sheet.is_animating() || sheet.is_dragging() {
            ctx.request_repaint();
        }
        response
    }
}

/// Translate pointer drags on the panel into state machine calls.
fn handle_drag(ctx: &Context, id: Id, sheet: &mut BottomSheet, drag: &Response) -> Option<Release> {
    let memory_id = id.with("drag_memory");
    let mut memory = ctx.data_mut(|d| d.get_temp_mut_or_default::<DragMemory>(memory_id).clone());
    let now = ctx.input(|i| i.time);
    let pointer = drag.interact_pointer_pos();
    let mut release = None;

    if drag.drag_started() && sheet.drag_start() {
        memory.tracker.reset();
        memory.start_y = pointer.map(|p| p.y);
    }

    if sheet.is_dragging() {
        if let (Some(start_y), Some(pos)) = (memory.start_y, pointer) {
            memory.tracker.push(now, Point::new(pos.x as f64, pos.y as f64));
            sheet.drag_update((pos.y - start_y) as f64);
        }
        if drag.drag_stopped() {
            let velocity = memory.tracker.velocity().y;
            release = sheet.drag_end(velocity);
            log::debug!("Sheet released at {:.0} px/s: {:?}", velocity, release);
        }
    }
    if drag.drag_stopped() {
        memory.start_y = None;
    }

    ctx.data_mut(|d| d.insert_temp(memory_id, memory));
    release
}

fn has_header(config: &SheetConfig) -> bool {
    config.header.title.is_some() || config.show_close_button
}

/// Paint the header row. Returns whether the close button was clicked.
fn show_header(ui: &mut Ui, painter: &egui::Painter, header: Rect, config: &SheetConfig) -> bool {
    let style = &config.header;
    if let Some(background) = style.background {
        painter.rect_filled(header, 0.0, theme::rgb(background));
    }
    if let Some(title) = &style.title {
        let color = style.text_color.map(theme::rgb).unwrap_or(theme::TEXT);
        painter.text(
            Pos2::new(header.left() + sizing::CONTENT_PADDING, header.center().y),
            Align2::LEFT_CENTER,
            title,
            FontId::proportional(17.0),
            color,
        );
    }
    if style.divider {
        painter.line_segment(
            [header.left_bottom(), header.right_bottom()],
            Stroke::new(1.0, theme::BORDER),
        );
    }

    if !config.show_close_button {
        return false;
    }
    let button = Rect::from_center_size(
        Pos2::new(
            header.right() - sizing::CONTENT_PADDING - sizing::CLOSE_BUTTON / 2.0,
            header.center().y,
        ),
        vec2(sizing::CLOSE_BUTTON, sizing::CLOSE_BUTTON),
    );
    ui.scope_builder(UiBuilder::new().max_rect(button), |ui| CloseButton::new().show(ui))
        .inner
}

/// Screen area covered by the panel at `offset`.
pub fn panel_rect(screen: Rect, offset: f64) -> Rect {
    let top = (screen.top() + offset as f32).clamp(screen.top(), screen.bottom());
    Rect::from_min_max(Pos2::new(screen.left(), top), screen.max)
}

/// Body area below `top`, inset by the content padding.
fn content_rect(panel: Rect, top: f32) -> Rect {
    let min = Pos2::new(panel.left() + sizing::CONTENT_PADDING, top + sizing::CONTENT_PADDING);
    let bottom = (panel.bottom() - sizing::BOTTOM_INSET).max(min.y);
    Rect::from_min_max(min, Pos2::new(panel.right() - sizing::CONTENT_PADDING, bottom))
}

/// Backdrop fill for a backdrop alpha in [0, 1].
pub fn backdrop_color(alpha: f64) -> Color32 {
    Color32::from_black_alpha((alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Event, Modifiers, PointerButton, RawInput};
    use taskup_core::SheetPhase;

    const SCREEN: Rect = Rect {
        min: Pos2::ZERO,
        max: Pos2::new(400.0, 800.0),
    };

    fn input(events: Vec<Event>) -> RawInput {
        RawInput {
            screen_rect: Some(SCREEN),
            events,
            ..Default::default()
        }
    }

    fn frame(ctx: &Context, sheet: &mut BottomSheet, events: Vec<Event>) -> SheetResponse {
        let mut out = SheetResponse::default();
        let _ = ctx.run(input(events), |ctx| {
            out = SheetView::new("sheet", &mut *sheet).show(ctx, |ui| {
                ui.label("Task details");
            });
        });
        out
    }

    fn open_sheet() -> BottomSheet {
        let mut sheet = BottomSheet::new(SheetConfig::new().with_snap_points(vec![0.5]), 800.0)
            .expect("valid config");
        sheet.open();
        while sheet.tick(1.0 / 60.0) {}
        sheet
    }

    fn press(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn test_panel_rect_follows_offset() {
        let rect = panel_rect(SCREEN, 300.0);
        assert_eq!(rect.top(), 300.0);
        assert_eq!(rect.bottom(), 800.0);
        // Offsets outside the screen clamp
        assert_eq!(panel_rect(SCREEN, 2000.0).top(), 800.0);
        assert_eq!(panel_rect(SCREEN, -50.0).top(), 0.0);
    }

    #[test]
    fn test_content_rect_never_inverts() {
        let panel = panel_rect(SCREEN, 790.0);
        let content = content_rect(panel, panel.top());
        assert!(content.bottom() >= content.top());
    }

    #[test]
    fn test_backdrop_color_scales_alpha() {
        assert_eq!(backdrop_color(0.0), Color32::from_black_alpha(0));
        assert_eq!(backdrop_color(0.5), Color32::from_black_alpha(128));
        assert_eq!(backdrop_color(3.0), Color32::from_black_alpha(255));
    }

    #[test]
    fn test_closed_sheet_paints_nothing() {
        let ctx = Context::default();
        let mut sheet = BottomSheet::new(SheetConfig::default(), 800.0).expect("valid config");
        let response = frame(&ctx, &mut sheet, Vec::new());
        assert_eq!(response, SheetResponse::default());
        assert!(!sheet.is_mounted());
    }

    #[test]
    fn test_view_tracks_screen_height() {
        let ctx = Context::default();
        let mut sheet = BottomSheet::new(SheetConfig::default(), 500.0).expect("valid config");
        frame(&ctx, &mut sheet, Vec::new());
        assert!((sheet.container_height() - 800.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_backdrop_click_dismisses() {
        let ctx = Context::default();
        let mut sheet = open_sheet();
        // Let the areas lay out before clicking
        for _ in 0..3 {
            frame(&ctx, &mut sheet, Vec::new());
        }

        let above_sheet = Pos2::new(200.0, 100.0);
        frame(&ctx, &mut sheet, vec![Event::PointerMoved(above_sheet)]);
        frame(&ctx, &mut sheet, vec![press(above_sheet, true)]);
        let response = frame(&ctx, &mut sheet, vec![press(above_sheet, false)]);

        assert!(response.backdrop_clicked);
        assert!(response.dismissed());
        assert!(matches!(sheet.phase(), SheetPhase::Closing { reason: CloseReason::Backdrop }));
    }
}
