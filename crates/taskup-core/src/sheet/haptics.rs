//! Haptic feedback sinks.

use super::state::ImpactStyle;

/// Something that can produce a haptic pulse.
///
/// Platforms without a vibration motor can use [`LogHaptics`].
pub trait HapticFeedback {
    fn impact(&self, style: ImpactStyle);
}

/// Records pulses in the log instead of vibrating.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHaptics;

impl HapticFeedback for LogHaptics {
    fn impact(&self, style: ImpactStyle) {
        log::debug!("Haptic impact: {:?}", style);
    }
}
