//! Sheet stack for screens that present more than one sheet.

use crate::config::{ConfigResult, SheetConfig};
use crate::sheet::{BottomSheet, CloseReason, SheetEvent};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Identifies a sheet registered with a [`SheetStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetId(Uuid);

impl SheetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SheetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SheetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owns a set of sheets sharing one container.
///
/// Presentation order decides which sheet the back button reaches: the most
/// recently opened sheet that is still interactive.
#[derive(Debug, Clone)]
pub struct SheetStack {
    sheets: HashMap<SheetId, BottomSheet>,
    /// Bottom to top.
    order: Vec<SheetId>,
    container_height: f64,
}

impl SheetStack {
    pub fn new(container_height: f64) -> Self {
        Self {
            sheets: HashMap::new(),
            order: Vec::new(),
            container_height,
        }
    }

    /// Register a new (closed) sheet.
    pub fn insert(&mut self, config: SheetConfig) -> ConfigResult<SheetId> {
        let sheet = BottomSheet::new(config, self.container_height)?;
        let id = SheetId::new();
        self.sheets.insert(id, sheet);
        self.order.push(id);
        Ok(id)
    }

    pub fn remove(&mut self, id: SheetId) -> Option<BottomSheet> {
        self.order.retain(|other| *other != id);
        self.sheets.remove(&id)
    }

    pub fn get(&self, id: SheetId) -> Option<&BottomSheet> {
        self.sheets.get(&id)
    }

    pub fn get_mut(&mut self, id: SheetId) -> Option<&mut BottomSheet> {
        self.sheets.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Open a sheet and raise it to the top.
    pub fn open(&mut self, id: SheetId) -> bool {
        let Some(sheet) = self.sheets.get_mut(&id) else {
            log::warn!("Open requested for unknown sheet {}", id);
            return false;
        };
        if !sheet.open() {
            return false;
        }
        self.order.retain(|other| *other != id);
        self.order.push(id);
        true
    }

    pub fn close(&mut self, id: SheetId, reason: CloseReason) -> bool {
        self.sheets
            .get_mut(&id)
            .is_some_and(|sheet| sheet.close(reason))
    }

    /// Topmost sheet that accepts dismiss requests.
    pub fn topmost_interactive(&self) -> Option<SheetId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|id| self.sheets.get(id).is_some_and(|s| s.phase().is_interactive()))
    }

    /// Deliver a back-button press. Returns `false` so the host can handle it
    /// when no sheet takes it.
    pub fn back_pressed(&mut self) -> bool {
        match self.topmost_interactive() {
            Some(id) => self.close(id, CloseReason::BackButton),
            None => false,
        }
    }

    pub fn is_any_mounted(&self) -> bool {
        self.sheets.values().any(BottomSheet::is_mounted)
    }

    /// Mounted sheets, bottom to top (paint order).
    pub fn mounted(&self) -> impl Iterator<Item = (SheetId, &BottomSheet)> + '_ {
        self.order.iter().filter_map(|id| {
            self.sheets
                .get(id)
                .filter(|sheet| sheet.is_mounted())
                .map(|sheet| (*id, sheet))
        })
    }

    pub fn set_container_height(&mut self, height: f64) {
        self.container_height = height;
        for sheet in self.sheets.values_mut() {
            sheet.set_container_height(height);
        }
    }

    /// Step every sheet. Returns whether any still animates.
    pub fn tick(&mut self, dt: f64) -> bool {
        let mut animating = false;
        for sheet in self.sheets.values_mut() {
            animating |= sheet.tick(dt);
        }
        animating
    }

    /// Drain events from every sheet, in presentation order.
    pub fn take_events(&mut self) -> Vec<(SheetId, SheetEvent)> {
        let mut events = Vec::new();
        for id in &self.order {
            if let Some(sheet) = self.sheets.get_mut(id) {
                events.extend(sheet.take_events().into_iter().map(|e| (*id, e)));
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::SheetPhase;

    fn settle(stack: &mut SheetStack) {
        for _ in 0..600 {
            if !stack.tick(1.0 / 60.0) {
                return;
            }
        }
        panic!("stack never settled");
    }

    #[test]
    fn test_back_button_reaches_topmost_sheet() {
        let mut stack = SheetStack::new(800.0);
        let lower = stack.insert(SheetConfig::default()).expect("valid config");
        let upper = stack.insert(SheetConfig::default()).expect("valid config");

        assert!(stack.open(upper));
        assert!(stack.open(lower));
        settle(&mut stack);
        // `lower` was opened last, so it is on top
        assert_eq!(stack.topmost_interactive(), Some(lower));

        assert!(stack.back_pressed());
        assert!(stack.get(lower).expect("sheet").phase().is_closing());
        assert_eq!(stack.get(upper).expect("sheet").phase(), SheetPhase::Open { snap: 0 });

        assert!(stack.back_pressed());
        assert!(stack.get(upper).expect("sheet").phase().is_closing());
        assert!(!stack.back_pressed());
    }

    #[test]
    fn test_back_button_falls_through_when_nothing_open() {
        let mut stack = SheetStack::new(800.0);
        stack.insert(SheetConfig::default()).expect("valid config");
        assert!(!stack.back_pressed());
    }

    #[test]
    fn test_events_are_tagged_with_sheet_id() {
        let mut stack = SheetStack::new(600.0);
        let id = stack.insert(SheetConfig::default()).expect("valid config");
        stack.open(id);
        settle(&mut stack);
        let events = stack.take_events();
        assert!(events.iter().all(|(sheet, _)| *sheet == id));
        assert!(events.contains(&(id, SheetEvent::Opened)));
        assert!(stack.take_events().is_empty());
    }

    #[test]
    fn test_mounted_iterates_in_paint_order() {
        let mut stack = SheetStack::new(600.0);
        let a = stack.insert(SheetConfig::default()).expect("valid config");
        let b = stack.insert(SheetConfig::default()).expect("valid config");
        assert_eq!(stack.mounted().count(), 0);
        stack.open(b);
        stack.open(a);
        let ids: Vec<_> = stack.mounted().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![b, a]);
        assert!(stack.is_any_mounted());
    }

    #[test]
    fn test_remove_and_unknown_ids() {
        let mut stack = SheetStack::new(600.0);
        let id = stack.insert(SheetConfig::default()).expect("valid config");
        assert!(stack.remove(id).is_some());
        assert!(stack.is_empty());
        assert!(!stack.open(id));
        assert!(!stack.close(id, CloseReason::CloseButton));
    }

    #[test]
    fn test_resize_reaches_every_sheet() {
        let mut stack = SheetStack::new(600.0);
        let id = stack.insert(SheetConfig::default()).expect("valid config");
        stack.set_container_height(900.0);
        let sheet = stack.get(id).expect("sheet");
        assert!((sheet.container_height() - 900.0).abs() < f64::EPSILON);
        assert!((sheet.offset() - 900.0).abs() < f64::EPSILON);
    }
}
