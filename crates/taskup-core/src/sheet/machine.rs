//! The bottom sheet state machine.

use super::snap::{rubber_band, SnapPoints};
use super::state::{CloseReason, ImpactStyle, Release, SheetEvent, SheetPhase, Visibility};
use crate::config::{ConfigResult, SheetConfig};
use crate::motion::Animated;

/// A bottom sheet's offset, opacity and gesture state.
///
/// The host forwards open/close requests and drag events, calls
/// [`BottomSheet::tick`] once per frame while [`BottomSheet::is_animating`],
/// and drains [`BottomSheet::take_events`].
#[derive(Debug, Clone)]
pub struct BottomSheet {
    config: SheetConfig,
    snaps: SnapPoints,
    container_height: f64,
    phase: SheetPhase,
    offset: Animated,
    opacity: Animated,
    active_snap: Option<usize>,
    events: Vec<SheetEvent>,
}

impl BottomSheet {
    /// Create a closed sheet inside a container of `container_height` px.
    pub fn new(config: SheetConfig, container_height: f64) -> ConfigResult<Self> {
        config.validate()?;
        let container_height = sanitize_height(container_height).unwrap_or(0.0);
        Ok(Self {
            snaps: SnapPoints::new(config.snap_fractions()),
            config,
            container_height,
            phase: SheetPhase::Closed,
            offset: Animated::new(container_height),
            opacity: Animated::new(0.0),
            active_snap: None,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &SheetConfig {
        &self.config
    }

    pub fn phase(&self) -> SheetPhase {
        self.phase
    }

    /// Distance from the container top to the sheet's top edge.
    pub fn offset(&self) -> f64 {
        self.offset.value()
    }

    /// Overall visibility in [0, 1].
    pub fn opacity(&self) -> f64 {
        self.opacity.value()
    }

    /// Backdrop alpha, following visibility and ignoring drag position.
    pub fn backdrop_alpha(&self) -> f64 {
        self.opacity.value() * self.config.backdrop_opacity
    }

    pub fn container_height(&self) -> f64 {
        self.container_height
    }

    /// Snap point the sheet rests at or is heading to; `None` while dragging or closed.
    pub fn active_snap_index(&self) -> Option<usize> {
        self.active_snap
    }

    pub fn is_dragging(&self) -> bool {
        self.phase.is_dragging()
    }

    pub fn drag_anchor(&self) -> Option<f64> {
        match self.phase {
            SheetPhase::Dragging { anchor, .. } => Some(anchor),
            _ => None,
        }
    }

    pub fn visibility(&self) -> Visibility {
        match self.phase {
            SheetPhase::Closed => Visibility::Hidden,
            SheetPhase::Opening => Visibility::Entering,
            SheetPhase::Open { .. } | SheetPhase::Dragging { .. } => Visibility::Visible,
            SheetPhase::Closing { .. } => Visibility::Exiting,
        }
    }

    /// Whether the sheet should be in the view tree at all.
    pub fn is_mounted(&self) -> bool {
        self.phase != SheetPhase::Closed
    }

    pub fn is_animating(&self) -> bool {
        self.offset.is_animating() || self.opacity.is_animating()
    }

    pub fn snap_count(&self) -> usize {
        self.snaps.len()
    }

    /// Resting offset of snap `index` in the current container.
    pub fn snap_target(&self, index: usize) -> f64 {
        self.snaps
            .target(index, self.container_height, self.reference_height())
    }

    fn reference_height(&self) -> f64 {
        self.config.height.unwrap_or(self.container_height)
    }

    /// Drain pending notifications.
    pub fn take_events(&mut self) -> Vec<SheetEvent> {
        std::mem::take(&mut self.events)
    }

    /// Follow a declarative visibility flag.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        if visible {
            self.open()
        } else {
            self.close(CloseReason::Programmatic)
        }
    }

    /// Request the sheet to present. Returns `false` if already presenting.
    pub fn open(&mut self) -> bool {
        match self.phase {
            SheetPhase::Closed => {
                self.offset.set(self.container_height);
                self.opacity.set(0.0);
            }
            // Reverse the exit from wherever it is
            SheetPhase::Closing { .. } => {}
            _ => return false,
        }

        log::info!("Opening bottom sheet");
        self.phase = SheetPhase::Opening;
        self.active_snap = Some(0);
        self.offset
            .animate_to(self.snap_target(0), self.config.open_motion());
        self.opacity.animate_to(1.0, self.config.fade_motion());
        self.events.push(SheetEvent::Haptic(ImpactStyle::Medium));
        true
    }

    /// Request the sheet to dismiss.
    ///
    /// Backdrop and back-button requests are only honoured while the sheet is
    /// open or being dragged; close-button and programmatic requests also
    /// interrupt the opening animation. Returns whether the request was taken.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        let accepted = match reason {
            CloseReason::Backdrop => self.config.backdrop_dismiss && self.phase.is_interactive(),
            CloseReason::BackButton => self.phase.is_interactive(),
            CloseReason::CloseButton | CloseReason::Programmatic => {
                self.phase.is_interactive() || self.phase == SheetPhase::Opening
            }
            CloseReason::Flick | CloseReason::DragPastLowest => self.phase.is_dragging(),
        };
        if !accepted {
            log::debug!("Ignoring {:?} close in {:?}", reason, self.phase);
            return false;
        }

        if reason == CloseReason::Backdrop {
            self.events.push(SheetEvent::Haptic(ImpactStyle::Light));
        }
        self.begin_close(reason);
        true
    }

    fn begin_close(&mut self, reason: CloseReason) {
        log::info!("Closing bottom sheet ({:?})", reason);
        self.phase = SheetPhase::Closing { reason };
        self.active_snap = None;
        self.offset
            .animate_to(self.container_height, self.config.close_motion());
        self.opacity.animate_to(0.0, self.config.fade_motion());
    }

    /// Begin a drag gesture. Only an open sheet can be grabbed.
    pub fn drag_start(&mut self) -> bool {
        let SheetPhase::Open { snap } = self.phase else {
            return false;
        };
        let anchor = self.offset.value();
        // Grabbing stops any settle animation where it is
        self.offset.set(anchor);
        self.phase = SheetPhase::Dragging {
            anchor,
            from_snap: Some(snap),
        };
        self.active_snap = None;
        log::debug!("Drag started at {:.1}", anchor);
        true
    }

    /// Apply the cumulative vertical pointer translation since drag start.
    pub fn drag_update(&mut self, translation: f64) {
        let SheetPhase::Dragging { anchor, .. } = self.phase else {
            return;
        };
        let top = self
            .snaps
            .highest_target(self.container_height, self.reference_height());
        let offset = rubber_band(anchor + translation, top, self.config.overdrag_resistance);
        self.offset.set(offset.clamp(0.0, self.container_height));
    }

    /// Finish the gesture with a release velocity (px/s, positive is down).
    pub fn drag_end(&mut self, velocity: f64) -> Option<Release> {
        let SheetPhase::Dragging { from_snap, .. } = self.phase else {
            return None;
        };
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let current = self.offset.value();
        let container = self.container_height;
        let reference = self.reference_height();

        if self.config.drag_dismiss && velocity > self.config.flick_velocity {
            self.begin_close(CloseReason::Flick);
            return Some(Release::Dismissed(CloseReason::Flick));
        }

        let closest = self.snaps.closest(current, container, reference);
        let lowest = self.snaps.lowest_target(container, reference);

        if self.config.drag_dismiss && velocity > 0.0 && current > lowest {
            self.begin_close(CloseReason::DragPastLowest);
            return Some(Release::Dismissed(CloseReason::DragPastLowest));
        }

        self.settle_on(closest, velocity, from_snap);
        Some(Release::Snapped(closest))
    }

    /// Abandon the gesture (pointer lost) and settle without dismissing.
    pub fn drag_cancel(&mut self) -> Option<Release> {
        let SheetPhase::Dragging { from_snap, .. } = self.phase else {
            return None;
        };
        let closest = self.snaps.closest(
            self.offset.value(),
            self.container_height,
            self.reference_height(),
        );
        self.settle_on(closest, 0.0, from_snap);
        Some(Release::Snapped(closest))
    }

    /// Move an open (or opening) sheet to another snap point.
    pub fn snap_to(&mut self, index: usize) -> bool {
        let previous = match self.phase {
            SheetPhase::Open { snap } => Some(snap),
            SheetPhase::Opening => self.active_snap,
            _ => return false,
        };
        let index = self.snaps.clamp_index(index);
        if self.phase == SheetPhase::Opening {
            self.active_snap = Some(index);
            self.offset
                .animate_to(self.snap_target(index), self.config.open_motion());
            return true;
        }
        let velocity = self.offset.velocity();
        self.settle_on(index, velocity, previous);
        true
    }

    fn settle_on(&mut self, index: usize, velocity: f64, previous: Option<usize>) {
        let target = self.snap_target(index);
        self.phase = SheetPhase::Open { snap: index };
        self.active_snap = Some(index);
        self.offset
            .animate_to_with_velocity(target, self.config.open_motion(), velocity);

        if previous != Some(index) {
            log::debug!("Sheet snapped to {} ({:.1})", index, target);
            self.events.push(SheetEvent::SnapChanged { index });
            self.events.push(SheetEvent::Haptic(ImpactStyle::Selection));
        }
    }

    /// Advance animations by `dt` seconds. Returns whether another frame is needed.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.offset.step(dt);
        self.opacity.step(dt);
        self.clamp_offset();

        match self.phase {
            SheetPhase::Opening if !self.is_animating() => {
                let snap = self.active_snap.unwrap_or(0);
                self.phase = SheetPhase::Open { snap };
                self.events.push(SheetEvent::Opened);
                log::debug!("Sheet opened at snap {}", snap);
            }
            SheetPhase::Closing { reason } if !self.is_animating() => {
                self.phase = SheetPhase::Closed;
                self.offset.set(self.container_height);
                self.opacity.set(0.0);
                self.events.push(SheetEvent::Closed { reason });
                log::info!("Bottom sheet closed");
            }
            _ => {}
        }

        self.is_animating()
    }

    /// Keep animated offsets between the highest snap target and the container bottom.
    fn clamp_offset(&mut self) {
        let container = self.container_height;
        let top = match self.phase {
            SheetPhase::Opening | SheetPhase::Open { .. } => self
                .snaps
                .highest_target(container, self.reference_height()),
            SheetPhase::Closing { .. } => 0.0,
            SheetPhase::Closed | SheetPhase::Dragging { .. } => return,
        };
        self.offset.clamp_to(top, container);
    }

    /// React to a container resize, keeping the sheet on its snap point.
    pub fn set_container_height(&mut self, height: f64) {
        let Some(height) = sanitize_height(height) else {
            return;
        };
        if (height - self.container_height).abs() < f64::EPSILON {
            return;
        }
        self.container_height = height;

        match self.phase {
            SheetPhase::Closed => self.offset.set(height),
            SheetPhase::Opening => {
                let target = self.snap_target(self.active_snap.unwrap_or(0));
                self.offset.animate_to(target, self.config.open_motion());
            }
            SheetPhase::Open { snap } => {
                let target = self.snap_target(snap);
                if self.offset.is_animating() {
                    self.offset.animate_to(target, self.config.open_motion());
                } else {
                    self.offset.set(target);
                }
            }
            SheetPhase::Dragging { .. } => {
                let offset = self.offset.value().min(height);
                self.offset.set(offset);
            }
            SheetPhase::Closing { .. } => {
                self.offset.animate_to(height, self.config.close_motion());
            }
        }
    }
}

fn sanitize_height(height: f64) -> Option<f64> {
    (height.is_finite() && height >= 0.0).then_some(height)
}
