// src/selection_logic.rs
// Pure geometry for the lasso, no UI types here.

/// A point in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// 目标矩形（视口坐标）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Rect { left, top, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Half-open hit test, used for pointer-down routing.
    pub fn hit(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.top && p.y < self.bottom()
    }
}

/// Closed bounding box spanned by a drag's anchor and live cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureRect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl GestureRect {
    pub fn from_points(start: Point, current: Point) -> Self {
        GestureRect {
            min_x: start.x.min(current.x),
            min_y: start.y.min(current.y),
            max_x: start.x.max(current.x),
            max_y: start.y.max(current.y),
        }
    }

    /// Inclusive on every edge.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    pub fn is_degenerate(&self) -> bool {
        self.min_x == self.max_x && self.min_y == self.max_y
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min_x, self.min_y, self.max_x - self.min_x, self.max_y - self.min_y)
    }
}

/// A target is caught once the gesture covers its center; edge overlap alone doesn't count.
pub fn center_in_gesture(target: &Rect, gesture: &GestureRect) -> bool {
    gesture.contains(target.center())
}
