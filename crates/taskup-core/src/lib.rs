//! TaskUp Core Library
//!
//! Platform-agnostic state and logic for TaskUp's bottom sheet: the gesture
//! state machine, its animation primitives and its configuration.

pub mod config;
pub mod gesture;
pub mod motion;
pub mod sheet;
pub mod stack;

pub use config::{ConfigError, ConfigResult, HeaderStyle, OffsetMotion, SheetConfig};
pub use gesture::VelocityTracker;
pub use motion::{Animated, Easing, Motion, Spring};
pub use sheet::{
    BottomSheet, CloseReason, HapticFeedback, ImpactStyle, LogHaptics, Release, SheetEvent,
    SheetPhase, SnapPoints, Visibility,
};
pub use stack::{SheetId, SheetStack};
