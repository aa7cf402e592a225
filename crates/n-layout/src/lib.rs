//! # n-layout — Layout tree and directional navigation for n-tile
//!
//! This crate is the pure core of the tiling shell. Nothing here performs
//! I/O or logs; every query is a read over a tree the caller owns.
//!
//! - **[`geometry`]** — `Allocation` rectangles, `Direction`, and the edge /
//!   candidate / offset / tie-break helpers
//! - **[`tree`]** — `Node`, the container/pane layout tree, with layout,
//!   split, close, and cycling
//! - **[`flatten`]** — breadth-first partition of a subtree into containers
//!   and panes
//! - **[`navigate`]** — pick the pane to focus for a directional move

pub mod flatten;
pub mod geometry;
pub mod navigate;
pub mod tree;

pub use geometry::{Allocation, Direction, Point};
pub use navigate::{NavError, Navigation, navigate};
pub use tree::{Container, Node, Orientation, Pane, PaneId};
