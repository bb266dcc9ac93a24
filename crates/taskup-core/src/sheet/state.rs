//! Sheet state and event definitions.

/// Where the sheet is in its presentation lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SheetPhase {
    /// Not mounted.
    #[default]
    Closed,
    /// Sliding in toward the first snap point.
    Opening,
    /// Resting at (or settling onto) a snap point.
    Open { snap: usize },
    /// A pointer is dragging the sheet.
    Dragging {
        /// Offset when the gesture started.
        anchor: f64,
        /// Snap point the sheet rested at when the gesture started.
        from_snap: Option<usize>,
    },
    /// Sliding out; unmounts when the animation completes.
    Closing { reason: CloseReason },
}

impl SheetPhase {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn is_closing(&self) -> bool {
        matches!(self, Self::Closing { .. })
    }

    /// Open or dragging: the states that accept dismiss gestures.
    pub fn is_interactive(&self) -> bool {
        self.is_open() || self.is_dragging()
    }
}

/// Coarse visibility derived from the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Entering,
    Visible,
    Exiting,
}

/// Why the sheet is closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Backdrop,
    CloseButton,
    BackButton,
    /// Fast downward release.
    Flick,
    /// Slow downward release below the lowest snap point.
    DragPastLowest,
    /// Host set the sheet invisible.
    Programmatic,
}

/// Haptic pulse strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactStyle {
    Light,
    Medium,
    /// Short tick for a snap point change.
    Selection,
}

/// Outcome of a drag release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Snapped(usize),
    Dismissed(CloseReason),
}

/// Notifications drained by the host after each interaction or frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetEvent {
    /// Opening animation settled.
    Opened,
    /// A release or request moved the sheet to a different snap point.
    SnapChanged { index: usize },
    /// The host should emit a haptic pulse.
    Haptic(ImpactStyle),
    /// Exit animation completed; the sheet is unmounted.
    Closed { reason: CloseReason },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_phase_is_closed() {
        assert_eq!(SheetPhase::default(), SheetPhase::Closed);
        assert!(!SheetPhase::default().is_interactive());
    }

    #[test]
    fn test_interactive_phases() {
        assert!(SheetPhase::Open { snap: 0 }.is_interactive());
        assert!(SheetPhase::Dragging { anchor: 0.0, from_snap: None }.is_interactive());
        assert!(!SheetPhase::Opening.is_interactive());
        assert!(!SheetPhase::Closing { reason: CloseReason::Flick }.is_interactive());
    }
}
