//! Bottom sheet gesture and animation state machine.
//!
//! A sheet moves through `Closed -> Opening -> Open -> Dragging -> Open | Closing -> Closed`.
//! The machine owns no clock and draws nothing:
//! - hosts forward open/close requests and drag events,
//! - step animations with [`BottomSheet::tick`],
//! - and drain [`SheetEvent`]s for haptics and the closed notification.

mod haptics;
mod machine;
mod snap;
mod state;

pub use haptics::{HapticFeedback, LogHaptics};
pub use machine::BottomSheet;
pub use snap::{rubber_band, target_offset, SnapPoints};
pub use state::{CloseReason, ImpactStyle, Release, SheetEvent, SheetPhase, Visibility};
