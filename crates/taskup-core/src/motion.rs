//! Frame-stepped animation primitives.
//!
//! Values are advanced explicitly with a frame delta (seconds), so the same
//! code runs under any frame clock and in tests.

use serde::{Deserialize, Serialize};

/// Largest integration step for springs (seconds).
const MAX_SPRING_STEP: f64 = 1.0 / 240.0;

/// Distance (px) under which a spring counts as arrived.
pub const REST_DISPLACEMENT: f64 = 0.5;
/// Speed (px/s) under which a spring counts as arrived.
pub const REST_SPEED: f64 = 5.0;

/// Damped harmonic spring parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for Spring {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 30.0,
            mass: 1.0,
        }
    }
}

impl Spring {
    /// Advance `value`/`velocity` toward `target` by `dt` seconds.
    pub fn step(&self, value: &mut f64, velocity: &mut f64, target: f64, dt: f64) {
        let steps = (dt / MAX_SPRING_STEP).ceil().max(1.0) as usize;
        let h = dt / steps as f64;
        let mass = self.mass.max(f64::EPSILON);

        for _ in 0..steps {
            let force = -self.stiffness * (*value - target) - self.damping * *velocity;
            *velocity += force / mass * h;
            *value += *velocity * h;
        }
    }

    /// Whether a spring at `value`/`velocity` is close enough to stop.
    pub fn is_at_rest(value: f64, velocity: f64, target: f64) -> bool {
        (value - target).abs() < REST_DISPLACEMENT && velocity.abs() < REST_SPEED
    }
}

/// Easing curves for timed animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    InOutQuad,
    OutCubic,
}

impl Easing {
    /// Map linear progress `t` in [0, 1] onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

/// How a value travels to its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Spring(Spring),
    /// Fixed-duration interpolation; `duration` in seconds.
    Timing { duration: f64, easing: Easing },
}

impl Motion {
    pub fn timing(duration: f64) -> Self {
        Motion::Timing {
            duration,
            easing: Easing::default(),
        }
    }
}

/// A scalar driven toward a target by a [`Motion`].
///
/// Retargeting while in flight starts from the current value and keeps the
/// current velocity, so interrupted animations never jump.
#[derive(Debug, Clone, PartialEq)]
pub struct Animated {
    value: f64,
    velocity: f64,
    target: f64,
    motion: Option<Motion>,
    from: f64,
    elapsed: f64,
}

impl Animated {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            motion: None,
            from: value,
            elapsed: 0.0,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn is_animating(&self) -> bool {
        self.motion.is_some()
    }

    /// Jump to `value`, cancelling any animation.
    pub fn set(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.motion = None;
    }

    /// Start animating toward `target`, replacing any animation in flight.
    pub fn animate_to(&mut self, target: f64, motion: Motion) {
        self.target = target;
        self.from = self.value;
        self.elapsed = 0.0;
        self.motion = Some(motion);
    }

    /// Like [`Animated::animate_to`], seeding the starting velocity.
    pub fn animate_to_with_velocity(&mut self, target: f64, motion: Motion, velocity: f64) {
        self.velocity = velocity;
        self.animate_to(target, motion);
    }

    /// Advance by `dt` seconds. Returns `true` while still animating.
    pub fn step(&mut self, dt: f64) -> bool {
        let Some(motion) = self.motion else {
            return false;
        };
        if !dt.is_finite() || dt <= 0.0 {
            return true;
        }

        match motion {
            Motion::Spring(spring) => {
                spring.step(&mut self.value, &mut self.velocity, self.target, dt);
                if Spring::is_at_rest(self.value, self.velocity, self.target) {
                    self.finish();
                }
            }
            Motion::Timing { duration, easing } => {
                self.elapsed += dt;
                if duration <= 0.0 || self.elapsed >= duration {
                    self.finish();
                } else {
                    let previous = self.value;
                    let progress = easing.apply(self.elapsed / duration);
                    self.value = self.from + (self.target - self.from) * progress;
                    self.velocity = (self.value - previous) / dt;
                }
            }
        }

        self.motion.is_some()
    }

    /// Keep the value inside `[min, max]`, dropping velocity that pushes outward.
    pub fn clamp_to(&mut self, min: f64, max: f64) {
        if self.value < min {
            self.value = min;
            self.velocity = self.velocity.max(0.0);
        } else if self.value > max {
            self.value = max;
            self.velocity = self.velocity.min(0.0);
        }
    }

    fn finish(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
        self.motion = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(anim: &mut Animated, seconds: f64) {
        let frames = (seconds * 60.0) as usize;
        for _ in 0..frames {
            anim.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut anim = Animated::new(800.0);
        anim.animate_to(400.0, Motion::Spring(Spring::default()));
        run(&mut anim, 3.0);
        assert!(!anim.is_animating());
        assert!((anim.value() - 400.0).abs() < f64::EPSILON);
        assert!(anim.velocity().abs() < f64::EPSILON);
    }

    #[test]
    fn test_timing_reaches_target_after_duration() {
        let mut anim = Animated::new(0.0);
        anim.animate_to(1.0, Motion::timing(0.2));
        assert!(anim.step(0.1));
        assert!(anim.value() > 0.0 && anim.value() < 1.0);
        assert!(!anim.step(0.11));
        assert!((anim.value() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let mut anim = Animated::new(0.0);
        anim.animate_to(100.0, Motion::timing(1.0));
        anim.step(0.5);
        let midway = anim.value();
        anim.animate_to(0.0, Motion::timing(1.0));
        anim.step(0.001);
        assert!((anim.value() - midway).abs() < 1.0);
        run(&mut anim, 1.1);
        assert!(anim.value().abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_dt_leaves_state_untouched() {
        let mut anim = Animated::new(800.0);
        anim.animate_to(400.0, Motion::Spring(Spring::default()));
        for dt in [f64::NAN, f64::INFINITY, -0.1, 0.0] {
            assert!(anim.step(dt));
            assert!((anim.value() - 800.0).abs() < f64::EPSILON);
            assert!(anim.velocity().abs() < f64::EPSILON);
        }
        run(&mut anim, 3.0);
        assert!((anim.value() - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_stops_outward_velocity() {
        let mut anim = Animated::new(100.0);
        anim.animate_to_with_velocity(160.0, Motion::Spring(Spring::default()), -20000.0);
        anim.step(1.0 / 60.0);
        assert!(anim.value() < 100.0);
        anim.clamp_to(160.0, 800.0);
        assert!((anim.value() - 160.0).abs() < f64::EPSILON);
        assert!(anim.velocity() >= 0.0);
        run(&mut anim, 1.0);
        assert!(!anim.is_animating());
        assert!((anim.value() - 160.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_cancels_animation() {
        let mut anim = Animated::new(0.0);
        anim.animate_to(10.0, Motion::Spring(Spring::default()));
        anim.set(5.0);
        assert!(!anim.is_animating());
        assert!(!anim.step(0.016));
        assert!((anim.value() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::InOutQuad, Easing::OutCubic] {
            assert!(easing.apply(0.0).abs() < 1e-12);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12);
        }
        assert!((Easing::InOutQuad.apply(0.5) - 0.5).abs() < 1e-12);
    }
}
