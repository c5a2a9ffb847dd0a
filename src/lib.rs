//! # seat_lasso
//!
//! Drag-to-select (lasso) selection over a field of positioned targets,
//! such as the seats of a venue map.
//!
//! - [`LassoSelector`]: the gesture state machine (`begin` / `update` / `end` / `cancel`)
//! - [`TargetRegistry`]: read-only view of live targets and their rectangles
//! - [`SeatSelection`]: an owner that merges lasso results into a selection
//! - [`SeatLayout`] + [`SeatMapConfig`]: builds a seat registry from TOML
//!
//! The selector is UI-agnostic: the host forwards pointer events and renders
//! [`LassoSelector::gesture_rect`] and [`LassoSelector::hovered`] however it likes.
//!
//! ```
//! use seat_lasso::{LassoSelector, Point, PointerDown, Rect};
//!
//! let seats = vec![("A1".to_string(), Rect::new(0.0, 0.0, 10.0, 10.0))];
//! let mut lasso = LassoSelector::new();
//! lasso.begin(&PointerDown::primary(Point::new(-5.0, -5.0)));
//! lasso.update(Point::new(20.0, 20.0), &seats);
//!
//! let mut picked = Vec::new();
//! lasso.end(&mut |ids: Vec<String>, additive: bool| picked.push((ids, additive)));
//! assert_eq!(picked, vec![(vec!["A1".to_string()], true)]);
//! ```

pub mod config;
pub mod registry;
pub mod seat_map;
pub mod selection;
pub mod selection_logic;

pub use config::{ConfigError, SeatMapConfig};
pub use registry::{SeatRegistry, TargetRegistry};
pub use seat_map::{SeatLayout, SeatSelection, row_label};
pub use selection::{Gesture, LassoSelector, PointerButton, PointerDown, SelectionSink};
pub use selection_logic::{GestureRect, Point, Rect, center_in_gesture};
