use serde::{Deserialize, Serialize};

/// A grid cell address. Coordinates are integers and carry no physical
/// unit; callers decide what one cell maps to on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

fn unit_span() -> i32 {
    1
}

fn is_unit_span(span: &i32) -> bool {
    *span == 1
}

/// An axis-aligned rectangle of grid cells: top-left corner plus
/// width/height. In the interchange shape `dx`/`dy` are optional and
/// default to 1, so `{"x":3,"y":4}` is a single cell.
///
/// Spans below 1 are a caller error; the merge and occupancy routines
/// do not validate them and their behavior for degenerate spans is
/// unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    #[serde(default = "unit_span", skip_serializing_if = "is_unit_span")]
    pub dx: i32,
    #[serde(default = "unit_span", skip_serializing_if = "is_unit_span")]
    pub dy: i32,
}

impl Region {
    pub fn new(x: i32, y: i32, dx: i32, dy: i32) -> Self {
        Self { x, y, dx, dy }
    }

    /// A 1x1 region covering a single cell.
    pub fn cell(x: i32, y: i32) -> Self {
        Self { x, y, dx: 1, dy: 1 }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.dx
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.dy
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn intersects(&self, other: &Region) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
