//! Directional navigator — pick the pane to focus for a left/right/up/down
//! move.
//!
//! # Algorithm
//!
//! 1. Take the edge of the current pane facing the direction.
//! 2. Candidates are all other panes lying entirely beyond that edge whose
//!    perpendicular span touches the current pane's.
//! 3. Keep the candidates nearest to the edge (minimum offset).
//! 4. If several tie, prefer one in line with the cursor (see
//!    [`geometry::tiebreak`]).
//!
//! # Tie policy
//!
//! Among the tied candidates in line with the cursor, the one sharing the
//! longest stretch of the current pane's perpendicular span wins; a pane
//! touching only at a corner shares none. Remaining ties, and the case where
//! no candidate is in line, go to the first in breadth-first traversal
//! order. The result is a pure function of the tree and the cursor.
//!
//! The navigator never mutates the tree and never logs. An empty candidate
//! set is `Ok(None)`, not an error.

use std::cmp::Reverse;

use thiserror::Error;

use crate::flatten::flatten;
use crate::geometry::{self, Direction, Edge, Point};
use crate::tree::{Node, Pane, PaneId};

/// Navigation failures. These indicate a caller bug, not a runtime state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// The pane to navigate from is not in the tree.
    #[error("pane {0} is not in the layout tree")]
    UnknownPane(PaneId),
}

/// The full working of a navigation query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Edge of the current pane facing the direction.
    pub edge: Edge,
    /// Every pane beyond the edge with an overlapping span, traversal order.
    pub candidates: Vec<PaneId>,
    /// Candidates at the minimum offset, traversal order.
    pub nearest: Vec<PaneId>,
    /// The chosen pane, if any.
    pub target: Option<PaneId>,
}

/// Find the pane to focus when moving from `current` in `direction`.
///
/// # Errors
///
/// Returns [`NavError::UnknownPane`] if `current` is not in `root`.
pub fn navigate(
    root: &Node,
    current: PaneId,
    direction: Direction,
    cursor: Point,
) -> Result<Option<PaneId>, NavError> {
    navigate_report(root, current, direction, cursor).map(|nav| nav.target)
}

/// Like [`navigate`], but also returns the candidate and tie sets.
///
/// # Errors
///
/// Returns [`NavError::UnknownPane`] if `current` is not in `root`.
pub fn navigate_report(
    root: &Node,
    current: PaneId,
    direction: Direction,
    cursor: Point,
) -> Result<Navigation, NavError> {
    let from = root.find_pane(current).ok_or(NavError::UnknownPane(current))?;
    let edge = geometry::edge(&from.allocation, direction);

    let candidates: Vec<&Pane> = flatten(root)
        .panes
        .into_iter()
        .filter(|p| p.id != current)
        .filter(|p| geometry::is_candidate(edge, &p.allocation, direction))
        .collect();

    let best = candidates
        .iter()
        .map(|p| geometry::offset(edge, &p.allocation, direction))
        .min();

    let nearest: Vec<&Pane> = match best {
        Some(min) => candidates
            .iter()
            .copied()
            .filter(|p| geometry::offset(edge, &p.allocation, direction) == min)
            .collect(),
        None => Vec::new(),
    };

    let target = nearest
        .iter()
        .filter(|p| geometry::tiebreak(direction, cursor, &p.allocation))
        .min_by_key(|p| Reverse(geometry::perpendicular_overlap(edge, &p.allocation, direction)))
        .or_else(|| nearest.first())
        .map(|p| p.id);

    Ok(Navigation {
        edge,
        candidates: candidates.iter().map(|p| p.id).collect(),
        nearest: nearest.iter().map(|p| p.id).collect(),
        target,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
