//! Snap point geometry.
//!
//! Offsets are measured from the top of the container to the top edge of the
//! sheet: 0 is fully expanded, the container height is fully hidden.

/// Ordered snap fractions resolved against a container.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapPoints {
    fractions: Vec<f64>,
}

impl SnapPoints {
    /// Build from fractions; callers must pass at least one.
    pub fn new(fractions: Vec<f64>) -> Self {
        debug_assert!(!fractions.is_empty());
        Self { fractions }
    }

    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }

    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    /// Clamp an index into range.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.fractions.len().saturating_sub(1))
    }

    /// Offset at which snap `index` rests.
    pub fn target(&self, index: usize, container: f64, reference: f64) -> f64 {
        let fraction = self.fractions[self.clamp_index(index)];
        target_offset(fraction, container, reference)
    }

    pub fn targets(&self, container: f64, reference: f64) -> Vec<f64> {
        self.fractions
            .iter()
            .map(|&f| target_offset(f, container, reference))
            .collect()
    }

    /// Smallest target offset (the most open position).
    pub fn highest_target(&self, container: f64, reference: f64) -> f64 {
        self.targets(container, reference)
            .into_iter()
            .fold(f64::INFINITY, f64::min)
    }

    /// Largest target offset (the least open position).
    pub fn lowest_target(&self, container: f64, reference: f64) -> f64 {
        self.targets(container, reference)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Index of the target nearest `offset`; ties go to the first configured.
    pub fn closest(&self, offset: f64, container: f64, reference: f64) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (index, target) in self.targets(container, reference).into_iter().enumerate() {
            let distance = (offset - target).abs();
            if distance < best_distance {
                best = index;
                best_distance = distance;
            }
        }
        best
    }
}

/// Offset for `fraction` of `reference` height inside `container`.
pub fn target_offset(fraction: f64, container: f64, reference: f64) -> f64 {
    (container - fraction * reference).clamp(0.0, container.max(0.0))
}

/// Damp the part of `raw` that goes above `top`.
pub fn rubber_band(raw: f64, top: f64, resistance: f64) -> f64 {
    if raw < top {
        top - (top - raw) * resistance
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_for_example_layout() {
        let snaps = SnapPoints::new(vec![0.5, 0.8]);
        let targets = snaps.targets(800.0, 800.0);
        assert!((targets[0] - 400.0).abs() < 1e-9);
        assert!((targets[1] - 160.0).abs() < 1e-9);
        assert!((snaps.highest_target(800.0, 800.0) - 160.0).abs() < 1e-9);
        assert!((snaps.lowest_target(800.0, 800.0) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn test_target_decreases_as_fraction_grows() {
        let mut previous = f64::INFINITY;
        for step in 1..=20 {
            let fraction = step as f64 / 20.0;
            let target = target_offset(fraction, 640.0, 640.0);
            assert!(target < previous, "fraction {} gave {}", fraction, target);
            previous = target;
        }
    }

    #[test]
    fn test_closest_prefers_first_on_tie() {
        let snaps = SnapPoints::new(vec![0.25, 0.75]);
        // Targets 300 and 100; 200 is equidistant.
        assert_eq!(snaps.closest(200.0, 400.0, 400.0), 0);
        assert_eq!(snaps.closest(120.0, 400.0, 400.0), 1);
    }

    #[test]
    fn test_single_point_always_closest() {
        let snaps = SnapPoints::new(vec![0.6]);
        assert_eq!(snaps.closest(0.0, 500.0, 500.0), 0);
        assert_eq!(snaps.closest(499.0, 500.0, 500.0), 0);
    }

    #[test]
    fn test_reference_height_larger_than_container_clamps() {
        assert!(target_offset(1.0, 300.0, 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rubber_band_damps_only_overdrag() {
        assert!((rubber_band(100.0, 160.0, 0.2) - 148.0).abs() < 1e-9);
        assert!((rubber_band(200.0, 160.0, 0.2) - 200.0).abs() < 1e-9);
    }
}
