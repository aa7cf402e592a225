//! Allocation geometry — edges, candidate tests, and offsets.
//!
//! Every pane and container occupies an [`Allocation`]: an axis-aligned
//! rectangle in screen coordinates. Directional navigation reduces to a few
//! questions about two rectangles:
//!
//! ```text
//!            p1 ┬ ┌─────────┐   ┌─────────┐
//!               │ │ current │   │    b    │
//!               │ │         │   │         │
//!            p2 ┴ └─────────┘   └─────────┘
//!                           ▲   ▲
//!                      edge ┘   └ b.x          offset = b.x - edge
//! ```
//!
//! - [`edge`] — the boundary of the current rectangle facing the direction,
//!   plus its span on the perpendicular axis.
//! - [`is_candidate`] — does `b` lie entirely beyond that edge, and do the
//!   perpendicular spans touch?
//! - [`offset`] — how far past the edge `b` starts.
//! - [`tiebreak`] — is the cursor in line with `b`?
//!
//! Far edges (`x + width`) are computed in `i64` so no combination of
//! `i32` origin and `u32` extent can overflow.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A rectangle on screen: origin (x, y) and dimensions (width, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Allocation {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Allocation {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Left boundary.
    #[must_use]
    pub fn left(&self) -> i64 {
        i64::from(self.x)
    }

    /// Right boundary (exclusive end of the x-range).
    #[must_use]
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Top boundary.
    #[must_use]
    pub fn top(&self) -> i64 {
        i64::from(self.y)
    }

    /// Bottom boundary (exclusive end of the y-range).
    #[must_use]
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Returns `true` if the rectangle covers no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Span along the axis perpendicular to `dir`.
    ///
    /// Horizontal moves compare y-ranges; vertical moves compare x-ranges.
    #[must_use]
    pub fn perpendicular_span(&self, dir: Direction) -> (i64, i64) {
        match dir {
            Direction::Left | Direction::Right => (self.top(), self.bottom()),
            Direction::Up | Direction::Down => (self.left(), self.right()),
        }
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// A pointer position in the same coordinate space as allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Navigation direction for focus moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// All four directions, in the order keybinding tables list them.
    pub const ALL: [Self; 4] = [Self::Left, Self::Up, Self::Right, Self::Down];

    /// The direction pointing back the way this one came.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Returns `true` for `Left` and `Right`.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A direction name that is not one of `left`, `up`, `right`, `down`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction: '{0}'")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts the full names and the Vim keys `h`/`j`/`k`/`l`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "h" => Ok(Self::Left),
            "up" | "k" => Ok(Self::Up),
            "right" | "l" => Ok(Self::Right),
            "down" | "j" => Ok(Self::Down),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Edge / candidate / offset
// ---------------------------------------------------------------------------

/// The boundary of a rectangle facing a direction.
///
/// `value` is the scalar coordinate of the edge; `(p1, p2)` is the range the
/// rectangle occupies on the perpendicular axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub value: i64,
    pub p1: i64,
    pub p2: i64,
}

/// The edge of `a` facing `dir`.
#[must_use]
pub fn edge(a: &Allocation, dir: Direction) -> Edge {
    let value = match dir {
        Direction::Left => a.left(),
        Direction::Right => a.right(),
        Direction::Up => a.top(),
        Direction::Down => a.bottom(),
    };
    let (p1, p2) = a.perpendicular_span(dir);
    Edge { value, p1, p2 }
}

/// Does `b` lie beyond `edge` in direction `dir`, with a perpendicular span
/// that touches `[edge.p1, edge.p2]`?
///
/// Both tests are inclusive: a rectangle starting exactly on the edge counts,
/// and spans that share a single coordinate overlap.
#[must_use]
pub fn is_candidate(edge: Edge, b: &Allocation, dir: Direction) -> bool {
    let beyond = match dir {
        Direction::Left => b.right() <= edge.value,
        Direction::Right => b.left() >= edge.value,
        Direction::Up => b.bottom() <= edge.value,
        Direction::Down => b.top() >= edge.value,
    };
    let (b1, b2) = b.perpendicular_span(dir);
    beyond && b1 <= edge.p2 && b2 >= edge.p1
}

/// Signed distance from `edge` to the near boundary of `b` along `dir`.
///
/// Smaller is closer. Rectangles accepted by [`is_candidate`] always have a
/// non-negative offset.
#[must_use]
pub fn offset(edge: Edge, b: &Allocation, dir: Direction) -> i64 {
    match dir {
        Direction::Left => edge.value - b.right(),
        Direction::Right => b.left() - edge.value,
        Direction::Up => edge.value - b.bottom(),
        Direction::Down => b.top() - edge.value,
    }
}

/// Length of the shared part of `b`'s perpendicular span and
/// `[edge.p1, edge.p2]`. Zero for spans that only touch at a point or do
/// not meet at all.
#[must_use]
pub fn perpendicular_overlap(edge: Edge, b: &Allocation, dir: Direction) -> i64 {
    let (b1, b2) = b.perpendicular_span(dir);
    (b2.min(edge.p2) - b1.max(edge.p1)).max(0)
}

/// Is the cursor in line with `rect` for a move in `dir`?
///
/// Horizontal moves check the cursor's row against the rectangle's y-range;
/// vertical moves check its column against the x-range. Inclusive.
#[must_use]
pub fn tiebreak(dir: Direction, cursor: Point, rect: &Allocation) -> bool {
    let (lo, hi) = rect.perpendicular_span(dir);
    let c = if dir.is_horizontal() {
        i64::from(cursor.y)
    } else {
        i64::from(cursor.x)
    };
    lo <= c && c <= hi
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
