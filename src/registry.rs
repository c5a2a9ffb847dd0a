//! Target registry: the live set of selectable, positioned targets.
//!
//! The rendering layer owns the registry and mounts/unmounts targets as they
//! appear. The lasso only ever reads it through [`TargetRegistry`], so any
//! collection that can enumerate `(id, rect)` pairs can back a selector.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::selection_logic::{Point, Rect};

/// Read-only view over live targets and their current on-screen rectangles.
pub trait TargetRegistry {
    /// Visit every live target in registry order.
    fn for_each_target(&self, f: &mut dyn FnMut(&str, Rect));
}

impl TargetRegistry for HashMap<String, Rect> {
    fn for_each_target(&self, f: &mut dyn FnMut(&str, Rect)) {
        for (id, rect) in self {
            f(id, *rect);
        }
    }
}

impl TargetRegistry for BTreeMap<String, Rect> {
    fn for_each_target(&self, f: &mut dyn FnMut(&str, Rect)) {
        for (id, rect) in self {
            f(id, *rect);
        }
    }
}

impl TargetRegistry for [(String, Rect)] {
    fn for_each_target(&self, f: &mut dyn FnMut(&str, Rect)) {
        for (id, rect) in self {
            f(id, *rect);
        }
    }
}

impl TargetRegistry for Vec<(String, Rect)> {
    fn for_each_target(&self, f: &mut dyn FnMut(&str, Rect)) {
        self.as_slice().for_each_target(f);
    }
}

/// Insertion-ordered registry used by the seat map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatRegistry {
    entries: IndexMap<String, Rect>,
}

impl SeatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a target, or move an existing one in place (keeps its order).
    pub fn mount(&mut self, id: impl Into<String>, rect: Rect) {
        self.entries.insert(id.into(), rect);
    }

    /// Remove a target. Returns its last rectangle if it was mounted.
    pub fn unmount(&mut self, id: &str) -> Option<Rect> {
        self.entries.shift_remove(id)
    }

    pub fn rect_of(&self, id: &str) -> Option<Rect> {
        self.entries.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rect)> {
        self.entries.iter().map(|(id, rect)| (id.as_str(), *rect))
    }

    /// Topmost (most recently mounted) target under `point`, if any.
    pub fn hit_test(&self, point: Point) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(_, rect)| rect.hit(point))
            .map(|(id, _)| id.as_str())
    }
}

impl TargetRegistry for SeatRegistry {
    fn for_each_target(&self, f: &mut dyn FnMut(&str, Rect)) {
        for (id, rect) in &self.entries {
            f(id, *rect);
        }
    }
}

impl TargetRegistry for IndexMap<String, Rect> {
    fn for_each_target(&self, f: &mut dyn FnMut(&str, Rect)) {
        for (id, rect) in self {
            f(id, *rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(registry: &dyn TargetRegistry) -> Vec<String> {
        let mut out = Vec::new();
        registry.for_each_target(&mut |id, _| out.push(id.to_string()));
        out
    }

    #[test]
    fn mount_keeps_insertion_order_and_replaces_in_place() {
        let mut reg = SeatRegistry::new();
        reg.mount("B1", Rect::new(0.0, 0.0, 10.0, 10.0));
        reg.mount("A1", Rect::new(20.0, 0.0, 10.0, 10.0));
        reg.mount("B1", Rect::new(40.0, 0.0, 10.0, 10.0));

        assert_eq!(ids(&reg), vec!["B1", "A1"]);
        assert_eq!(reg.rect_of("B1"), Some(Rect::new(40.0, 0.0, 10.0, 10.0)));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn unmount_removes_entry() {
        let mut reg = SeatRegistry::new();
        reg.mount("A1", Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(reg.unmount("A1"), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(reg.unmount("A1"), None);
        assert!(reg.is_empty());
        assert!(!reg.contains("A1"));
    }

    #[test]
    fn unmount_keeps_order_of_remaining_targets() {
        let mut reg = SeatRegistry::new();
        for id in ["A1", "A2", "A3", "A4"] {
            reg.mount(id, Rect::new(0.0, 0.0, 10.0, 10.0));
        }
        reg.unmount("A2");
        reg.mount("A5", Rect::new(0.0, 0.0, 10.0, 10.0));
        reg.mount("A1", Rect::new(5.0, 5.0, 10.0, 10.0));

        assert_eq!(ids(&reg), vec!["A1", "A3", "A4", "A5"]);
        assert_eq!(reg.rect_of("A1"), Some(Rect::new(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut reg = SeatRegistry::new();
        reg.mount("under", Rect::new(0.0, 0.0, 20.0, 20.0));
        reg.mount("over", Rect::new(10.0, 10.0, 20.0, 20.0));

        assert_eq!(reg.hit_test(Point::new(15.0, 15.0)), Some("over"));
        assert_eq!(reg.hit_test(Point::new(5.0, 5.0)), Some("under"));
        assert_eq!(reg.hit_test(Point::new(50.0, 50.0)), None);
    }

    #[test]
    fn plain_collections_are_registries() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), Rect::default());
        map.insert("a".to_string(), Rect::default());
        assert_eq!(ids(&map), vec!["a", "b"]);

        let list = vec![("z".to_string(), Rect::default()), ("y".to_string(), Rect::default())];
        assert_eq!(ids(&list), vec!["z", "y"]);

        let mut ordered = IndexMap::new();
        ordered.insert("q".to_string(), Rect::default());
        ordered.insert("p".to_string(), Rect::default());
        assert_eq!(ids(&ordered), vec!["q", "p"]);
    }
}
