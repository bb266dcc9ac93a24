//! egui components for TaskUp.
//!
//! - **Sheet**: the draggable bottom sheet view over a [`taskup_core::BottomSheet`]
//! - **Buttons**: close button, pill buttons
//! - **Layout**: drag handle, section labels, separators

pub mod buttons;
pub mod layout;
pub mod sheet;

pub use buttons::{CloseButton, PillButton};
pub use layout::{drag_handle, section_label, separator};
pub use sheet::{SheetResponse, SheetView};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Sheet top corner radius
    pub const SHEET_RADIUS: u8 = 20;
    /// Drag handle bar
    pub const HANDLE_WIDTH: f32 = 40.0;
    pub const HANDLE_HEIGHT: f32 = 5.0;
    pub const HANDLE_RADIUS: u8 = 3;
    /// Space above and below the handle
    pub const HANDLE_MARGIN: f32 = 10.0;
    /// Padding around sheet content
    pub const CONTENT_PADDING: f32 = 16.0;
    /// Extra bottom padding for home-indicator style insets
    pub const BOTTOM_INSET: f32 = 34.0;
    pub const HEADER_HEIGHT: f32 = 44.0;
    pub const CLOSE_BUTTON: f32 = 28.0;
    pub const CORNER_RADIUS: u8 = 6;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    pub const SHEET_BG: Color32 = Color32::WHITE;
    /// Handle bar (gray 300)
    pub const HANDLE: Color32 = Color32::from_rgb(209, 213, 219);
    pub const TEXT: Color32 = Color32::from_rgb(31, 41, 55);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(107, 114, 128);
    pub const BORDER: Color32 = Color32::from_rgb(229, 231, 235);
    /// Primary action (TaskUp blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    pub const HOVER_BG: Color32 = Color32::from_rgb(243, 244, 246);

    /// Convert a configured RGB triple.
    pub fn rgb(color: [u8; 3]) -> Color32 {
        Color32::from_rgb(color[0], color[1], color[2])
    }
}
