//! Lasso (drag-to-select) state machine.
//!
//! The host feeds pointer events into [`LassoSelector::begin`],
//! [`LassoSelector::update`] and [`LassoSelector::end`]; the selector keeps the
//! live gesture and hover set for preview rendering and reports the final
//! hover set to a [`SelectionSink`] on release. Nothing here renders, blocks,
//! or owns an event loop.

use tracing::{debug, trace};

use crate::registry::TargetRegistry;
use crate::selection_logic::{GestureRect, Point, Rect, center_in_gesture};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging { start: Point, current: Point },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

/// A pointer-down as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerDown {
    pub position: Point,
    pub button: PointerButton,
    /// Id of the registered target the press landed on, if any.
    pub target: Option<String>,
}

impl PointerDown {
    pub fn primary(position: Point) -> Self {
        PointerDown { position, button: PointerButton::Primary, target: None }
    }

    pub fn on_target(mut self, id: impl Into<String>) -> Self {
        self.target = Some(id.into());
        self
    }
}

/// Receiver for finished lasso selections.
///
/// `additive` asks the owner to union `ids` into its current selection
/// instead of replacing it.
pub trait SelectionSink {
    fn on_select(&mut self, ids: Vec<String>, additive: bool);
}

impl<F> SelectionSink for F
where
    F: FnMut(Vec<String>, bool),
{
    fn on_select(&mut self, ids: Vec<String>, additive: bool) {
        self(ids, additive)
    }
}

/// 拖拽框选状态
#[derive(Debug, Clone, Default)]
pub struct LassoSelector {
    gesture: Gesture,
    hovered: Vec<String>,
    alternate_mode: bool,
}

impl LassoSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// External modifier (e.g. space-to-pan). While set, no lasso can start.
    pub fn set_alternate_mode(&mut self, on: bool) {
        self.alternate_mode = on;
    }

    pub fn alternate_mode(&self) -> bool {
        self.alternate_mode
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    /// Normalized bounds of the live gesture, `None` while idle.
    pub fn gesture_bounds(&self) -> Option<GestureRect> {
        match self.gesture {
            Gesture::Idle => None,
            Gesture::Dragging { start, current } => Some(GestureRect::from_points(start, current)),
        }
    }

    /// Live gesture box for the overlay, `None` while idle.
    pub fn gesture_rect(&self) -> Option<Rect> {
        self.gesture_bounds().map(|g| g.to_rect())
    }

    /// Targets under the gesture, in registry order.
    pub fn hovered(&self) -> &[String] {
        &self.hovered
    }

    pub fn is_hovered(&self, id: &str) -> bool {
        self.hovered.iter().any(|h| h == id)
    }

    /// Start a gesture. Returns whether one was actually started.
    pub fn begin(&mut self, down: &PointerDown) -> bool {
        if let Some(id) = &down.target {
            debug!(target_id = %id, "lasso suppressed: press landed on a target");
            return false;
        }
        if down.button != PointerButton::Primary {
            debug!(button = ?down.button, "lasso suppressed: not the primary button");
            return false;
        }
        if self.alternate_mode {
            debug!("lasso suppressed: alternate mode active");
            return false;
        }
        if self.is_dragging() {
            debug!("lasso suppressed: gesture already in progress");
            return false;
        }

        self.gesture = Gesture::Dragging { start: down.position, current: down.position };
        self.hovered.clear();
        debug!(x = down.position.x, y = down.position.y, "lasso started");
        true
    }

    /// Move the live corner and rescan the whole registry.
    pub fn update<R>(&mut self, position: Point, registry: &R)
    where
        R: TargetRegistry + ?Sized,
    {
        let start = match self.gesture {
            Gesture::Idle => return,
            Gesture::Dragging { start, .. } => start,
        };
        self.gesture = Gesture::Dragging { start, current: position };

        let bounds = GestureRect::from_points(start, position);
        let hovered = &mut self.hovered;
        hovered.clear();
        registry.for_each_target(&mut |id, rect| {
            if center_in_gesture(&rect, &bounds) {
                hovered.push(id.to_string());
            }
        });
        trace!(hovered = self.hovered.len(), "lasso rescanned");
    }

    /// Finish the gesture; a non-empty hover set goes to `sink` as an additive selection.
    ///
    /// Returns whether the sink was invoked.
    pub fn end<S>(&mut self, sink: &mut S) -> bool
    where
        S: SelectionSink + ?Sized,
    {
        if !self.is_dragging() {
            return false;
        }
        self.gesture = Gesture::Idle;
        let ids = std::mem::take(&mut self.hovered);
        if ids.is_empty() {
            debug!("lasso ended with nothing selected");
            return false;
        }
        debug!(count = ids.len(), "lasso ended");
        sink.on_select(ids, true);
        true
    }

    /// Abort the gesture without reporting anything.
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            debug!(discarded = self.hovered.len(), "lasso cancelled");
        }
        self.gesture = Gesture::Idle;
        self.hovered.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn registry() -> Vec<(String, Rect)> {
        vec![
            ("A".to_string(), Rect::new(0.0, 0.0, 10.0, 10.0)),
            ("B".to_string(), Rect::new(100.0, 100.0, 10.0, 10.0)),
        ]
    }

    #[test]
    fn begin_sets_start_and_current() {
        let mut lasso = LassoSelector::new();
        assert!(lasso.begin(&PointerDown::primary(Point::new(3.0, 4.0))));
        assert_eq!(
            lasso.gesture(),
            Gesture::Dragging { start: Point::new(3.0, 4.0), current: Point::new(3.0, 4.0) }
        );
        assert_eq!(lasso.gesture_rect(), Some(Rect::new(3.0, 4.0, 0.0, 0.0)));
    }

    #[test]
    fn gesture_bounds_degenerate_until_pointer_moves() {
        let mut lasso = LassoSelector::new();
        assert!(lasso.gesture_bounds().is_none());

        lasso.begin(&PointerDown::primary(Point::new(8.0, 8.0)));
        assert!(lasso.gesture_bounds().is_some_and(|g| g.is_degenerate()));

        lasso.update(Point::new(2.0, 20.0), &registry());
        let bounds = lasso.gesture_bounds().unwrap();
        assert!(!bounds.is_degenerate());
        assert_eq!(bounds.to_rect(), Rect::new(2.0, 8.0, 6.0, 12.0));
    }

    #[test]
    fn begin_on_target_is_ignored() {
        let mut lasso = LassoSelector::new();
        let down = PointerDown::primary(Point::new(5.0, 5.0)).on_target("A");
        assert!(!lasso.begin(&down));
        assert_eq!(lasso.gesture(), Gesture::Idle);

        lasso.update(Point::new(200.0, 200.0), &registry());
        assert!(lasso.hovered().is_empty());

        let mut fired = false;
        assert!(!lasso.end(&mut |_: Vec<String>, _: bool| fired = true));
        assert!(!fired);
    }

    #[test]
    fn begin_requires_primary_button() {
        let mut lasso = LassoSelector::new();
        for button in [PointerButton::Secondary, PointerButton::Middle, PointerButton::Other] {
            let down = PointerDown { position: Point::default(), button, target: None };
            assert!(!lasso.begin(&down));
        }
        assert!(!lasso.is_dragging());
    }

    #[test]
    fn begin_blocked_in_alternate_mode() {
        let mut lasso = LassoSelector::new();
        lasso.set_alternate_mode(true);
        assert!(!lasso.begin(&PointerDown::primary(Point::default())));

        lasso.set_alternate_mode(false);
        assert!(lasso.begin(&PointerDown::primary(Point::default())));
    }

    #[test]
    fn begin_while_dragging_keeps_original_anchor() {
        let mut lasso = LassoSelector::new();
        lasso.begin(&PointerDown::primary(Point::new(0.0, 0.0)));
        lasso.update(Point::new(60.0, 60.0), &registry());

        assert!(!lasso.begin(&PointerDown::primary(Point::new(500.0, 500.0))));
        assert_eq!(
            lasso.gesture(),
            Gesture::Dragging { start: Point::new(0.0, 0.0), current: Point::new(60.0, 60.0) }
        );
        assert_eq!(lasso.hovered(), ["A"]);
    }

    #[test]
    fn update_is_idempotent() {
        let reg = registry();
        let mut lasso = LassoSelector::new();
        lasso.begin(&PointerDown::primary(Point::new(0.0, 0.0)));
        lasso.update(Point::new(120.0, 120.0), &reg);
        let once = lasso.hovered().to_vec();
        lasso.update(Point::new(120.0, 120.0), &reg);
        assert_eq!(lasso.hovered(), once.as_slice());
    }

    #[test]
    fn shrinking_the_gesture_drops_targets() {
        let reg = registry();
        let mut lasso = LassoSelector::new();
        lasso.begin(&PointerDown::primary(Point::new(0.0, 0.0)));
        lasso.update(Point::new(120.0, 120.0), &reg);
        assert_eq!(lasso.hovered(), ["A", "B"]);
        lasso.update(Point::new(60.0, 60.0), &reg);
        assert_eq!(lasso.hovered(), ["A"]);
        assert!(!lasso.is_hovered("B"));
    }

    #[test]
    fn unmounted_target_leaves_hover_set_on_next_update() {
        let mut reg: HashMap<String, Rect> = registry().into_iter().collect();
        let mut lasso = LassoSelector::new();
        lasso.begin(&PointerDown::primary(Point::new(0.0, 0.0)));
        lasso.update(Point::new(120.0, 120.0), &reg);
        assert!(lasso.is_hovered("B"));

        reg.remove("B");
        lasso.update(Point::new(121.0, 121.0), &reg);
        assert!(!lasso.is_hovered("B"));
        assert!(lasso.is_hovered("A"));
    }

    #[test]
    fn degenerate_drag_selects_only_exact_center() {
        let reg = registry();
        let mut lasso = LassoSelector::new();

        lasso.begin(&PointerDown::primary(Point::new(5.0, 5.0)));
        lasso.update(Point::new(5.0, 5.0), &reg);
        assert_eq!(lasso.hovered(), ["A"]);
        lasso.cancel();

        lasso.begin(&PointerDown::primary(Point::new(6.0, 5.0)));
        lasso.update(Point::new(6.0, 5.0), &reg);
        assert!(lasso.hovered().is_empty());
    }

    #[test]
    fn end_reports_additively_and_resets() {
        let reg = registry();
        let mut calls: Vec<(Vec<String>, bool)> = Vec::new();
        let mut lasso = LassoSelector::new();
        lasso.begin(&PointerDown::primary(Point::new(0.0, 0.0)));
        lasso.update(Point::new(120.0, 120.0), &reg);

        let fired = lasso.end(&mut |ids: Vec<String>, additive: bool| calls.push((ids, additive)));
        assert!(fired);
        assert_eq!(calls, vec![(vec!["A".to_string(), "B".to_string()], true)]);
        assert_eq!(lasso.gesture(), Gesture::Idle);
        assert!(lasso.hovered().is_empty());
        assert_eq!(lasso.gesture_rect(), None);
    }

    #[test]
    fn end_with_empty_hover_set_does_not_report() {
        let reg = registry();
        let mut lasso = LassoSelector::new();
        lasso.begin(&PointerDown::primary(Point::new(200.0, 200.0)));
        lasso.update(Point::new(250.0, 250.0), &reg);

        let mut calls = 0;
        assert!(!lasso.end(&mut |_: Vec<String>, _: bool| calls += 1));
        assert_eq!(calls, 0);
        assert!(!lasso.is_dragging());
    }

    #[test]
    fn cancel_never_reports() {
        let reg = registry();
        let mut lasso = LassoSelector::new();
        lasso.begin(&PointerDown::primary(Point::new(0.0, 0.0)));
        lasso.update(Point::new(120.0, 120.0), &reg);
        lasso.cancel();

        assert_eq!(lasso.gesture(), Gesture::Idle);
        assert!(lasso.hovered().is_empty());
        let mut calls = 0;
        assert!(!lasso.end(&mut |_: Vec<String>, _: bool| calls += 1));
        assert_eq!(calls, 0);
    }
}
