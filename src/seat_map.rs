//! Seat field: layout from config, and the selection that lasso results land in.

use indexmap::IndexSet;
use tracing::debug;

use crate::config::SeatMapConfig;
use crate::registry::SeatRegistry;
use crate::selection::SelectionSink;
use crate::selection_logic::Rect;

/// The externally owned seat selection, in the order seats were picked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatSelection {
    ids: IndexSet<String>,
}

impl SeatSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge (`additive`) or replace with `ids`. Duplicates are ignored.
    pub fn apply(&mut self, ids: impl IntoIterator<Item = String>, additive: bool) {
        if !additive {
            self.clear();
        }
        self.ids.extend(ids);
    }

    /// Flip one seat. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.shift_remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.ids.iter().cloned().collect()
    }
}

impl SelectionSink for SeatSelection {
    fn on_select(&mut self, ids: Vec<String>, additive: bool) {
        let before = self.len();
        self.apply(ids, additive);
        debug!(additive, before, after = self.len(), "seat selection updated");
    }
}

/// Spreadsheet-style row label: 0 -> "A", 25 -> "Z", 26 -> "AA".
pub fn row_label(mut index: usize) -> String {
    let mut label = Vec::new();
    loop {
        label.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// Builds seat rectangles from a [`SeatMapConfig`].
pub struct SeatLayout;

impl SeatLayout {
    pub fn build(config: &SeatMapConfig) -> SeatRegistry {
        let mut registry = SeatRegistry::new();
        let pitch = config.seat_size + config.seat_gap;

        for row in 0..config.rows {
            let label = row_label(row as usize);
            let top = config.origin_y + row as f64 * pitch;
            for seat in 0..config.seats_per_row {
                let aisles = if config.aisle_every > 0 { seat / config.aisle_every } else { 0 };
                let left = config.origin_x + seat as f64 * pitch + aisles as f64 * config.aisle_width;
                registry.mount(
                    format!("{label}{}", seat + 1),
                    Rect::new(left, top, config.seat_size, config.seat_size),
                );
            }
        }
        debug!(seats = registry.len(), "seat layout built");
        registry
    }

    /// Size of the area the layout occupies, including the origin margin on both sides.
    pub fn extent(config: &SeatMapConfig) -> (f64, f64) {
        let pitch = config.seat_size + config.seat_gap;
        let aisles = match (config.aisle_every, config.seats_per_row) {
            (0, _) | (_, 0) => 0,
            (every, seats) => (seats - 1) / every,
        };
        let width = config.seats_per_row as f64 * pitch - config.seat_gap
            + aisles as f64 * config.aisle_width
            + 2.0 * config.origin_x;
        let height = config.rows as f64 * pitch - config.seat_gap + 2.0 * config.origin_y;
        (width.max(0.0), height.max(0.0))
    }
}
