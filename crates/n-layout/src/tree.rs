//! Layout tree — containers and panes.
//!
//! The layout tree is an n-ary tree where each leaf is a terminal pane and
//! each internal node is a horizontal or vertical split container. Splitting
//! a pane either adds a sibling to its container (same orientation) or
//! replaces the pane with a new two-child container. Closing a pane collapses
//! any container left with a single child back into its parent.
//!
//! # Architecture
//!
//! ```text
//! Vertical
//! ├── Pane(1)           ← left pane
//! └── Horizontal
//!     ├── Pane(2)       ← top-right pane
//!     ├── Pane(3)       ← middle-right pane
//!     └── Pane(4)       ← bottom-right pane
//! ```
//!
//! Ownership only runs downward: a container owns its children and no node
//! knows its parent. Anything that needs the path to a pane (see
//! [`Node::ancestors`]) rebuilds it by walking down from the root.
//!
//! # Allocations
//!
//! Every node carries an [`Allocation`]. [`Node::layout`] assigns them
//! top-down so that the panes beneath a container tile its allocation
//! exactly. Mutations re-run the layout for the subtree they touch, so a
//! tree that was laid out once stays consistent.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::geometry::Allocation;

/// Unique pane identifier. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaneId(pub usize);

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// How a container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Children stacked top to bottom.
    Horizontal,
    /// Children side by side, left to right.
    Vertical,
}

impl Orientation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown split orientation: '{0}' (expected horizontal or vertical)")]
pub struct ParseOrientationError(pub String);

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "h" | "horizontal" | "hsplit" => Ok(Self::Horizontal),
            "v" | "vertical" | "vsplit" => Ok(Self::Vertical),
            _ => Err(ParseOrientationError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Pane / Container
// ---------------------------------------------------------------------------

/// A leaf: one terminal surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pane {
    pub id: PaneId,
    pub allocation: Allocation,
}

impl Pane {
    #[must_use]
    pub const fn new(id: PaneId, allocation: Allocation) -> Self {
        Self { id, allocation }
    }
}

/// An internal split node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    orientation: Orientation,
    children: Vec<Node>,
    allocation: Allocation,
}

impl Container {
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub const fn allocation(&self) -> Allocation {
        self.allocation
    }

    /// Index of the direct child that is the pane `id`.
    fn position_of_pane(&self, id: PaneId) -> Option<usize> {
        self.children
            .iter()
            .position(|child| matches!(child, Node::Pane(p) if p.id == id))
    }

    /// Divide `area` among the children along this container's axis.
    ///
    /// Each child gets an equal share; the last one also takes the
    /// remainder so the children cover `area` exactly.
    fn layout(&mut self, area: Allocation) {
        self.allocation = area;
        let n = self.children.len();
        if n == 0 {
            return;
        }
        let count = u32::try_from(n).unwrap_or(u32::MAX);
        let extent = match self.orientation {
            Orientation::Horizontal => area.height,
            Orientation::Vertical => area.width,
        };
        let share = extent / count;

        let mut start = 0u32;
        for (i, child) in self.children.iter_mut().enumerate() {
            let size = if i + 1 == n { extent - start } else { share };
            let rect = match self.orientation {
                Orientation::Horizontal => Allocation {
                    y: shift(area.y, start),
                    height: size,
                    ..area
                },
                Orientation::Vertical => Allocation {
                    x: shift(area.x, start),
                    width: size,
                    ..area
                },
            };
            child.layout(rect);
            start += size;
        }
    }

    fn relayout(&mut self) {
        let area = self.allocation;
        self.layout(area);
    }
}

/// `origin + by`, saturating at the edge of the coordinate space.
fn shift(origin: i32, by: u32) -> i32 {
    i32::try_from(i64::from(origin) + i64::from(by)).unwrap_or(i32::MAX)
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A node in the layout tree: exactly one of a pane or a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Pane(Pane),
    Container(Container),
}

impl Node {
    /// Create a pane node with an empty allocation.
    #[must_use]
    pub const fn pane(id: PaneId) -> Self {
        Self::Pane(Pane::new(id, Allocation::new(0, 0, 0, 0)))
    }

    /// Create a container from its children.
    ///
    /// A single child is returned as-is rather than wrapped, so a container
    /// never holds fewer than two children through this constructor.
    ///
    /// # Panics
    ///
    /// In debug builds, if `children` is empty.
    #[must_use]
    pub fn container(orientation: Orientation, mut children: Vec<Self>) -> Self {
        debug_assert!(!children.is_empty(), "a container needs at least one child");
        if children.len() == 1 {
            if let Some(only) = children.pop() {
                return only;
            }
        }
        Self::Container(Container {
            orientation,
            children,
            allocation: Allocation::default(),
        })
    }

    /// Horizontal split: `top` above `bottom`.
    #[must_use]
    pub fn horizontal(top: Self, bottom: Self) -> Self {
        Self::container(Orientation::Horizontal, vec![top, bottom])
    }

    /// Vertical split: `left` beside `right`.
    #[must_use]
    pub fn vertical(left: Self, right: Self) -> Self {
        Self::container(Orientation::Vertical, vec![left, right])
    }

    // -- Queries ---------------------------------------------------------------

    #[must_use]
    pub const fn allocation(&self) -> Allocation {
        match self {
            Self::Pane(p) => p.allocation,
            Self::Container(c) => c.allocation,
        }
    }

    /// Direct children. Panes have none.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Pane(_) => &[],
            Self::Container(c) => &c.children,
        }
    }

    /// Collect all pane IDs in the tree (depth-first, left-to-right).
    #[must_use]
    pub fn leaves(&self) -> Vec<PaneId> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<PaneId>) {
        match self {
            Self::Pane(p) => out.push(p.id),
            Self::Container(c) => {
                for child in &c.children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Number of panes in the tree.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        match self {
            Self::Pane(_) => 1,
            Self::Container(c) => c.children.iter().map(Self::pane_count).sum(),
        }
    }

    #[must_use]
    pub fn contains(&self, id: PaneId) -> bool {
        self.find_pane(id).is_some()
    }

    /// Look up a pane by ID.
    #[must_use]
    pub fn find_pane(&self, id: PaneId) -> Option<&Pane> {
        match self {
            Self::Pane(p) => (p.id == id).then_some(p),
            Self::Container(c) => c.children.iter().find_map(|child| child.find_pane(id)),
        }
    }

    /// The containers enclosing pane `id`, outermost first.
    ///
    /// Returns `None` if the pane is not in the tree. A pane at the root has
    /// no ancestors. The path is rebuilt with an explicit stack on each call.
    #[must_use]
    pub fn ancestors(&self, id: PaneId) -> Option<Vec<&Container>> {
        let mut path: Vec<&Container> = Vec::new();
        let mut stack: Vec<(&Self, usize)> = vec![(self, 0)];

        while let Some((node, depth)) = stack.pop() {
            path.truncate(depth);
            match node {
                Self::Pane(p) if p.id == id => return Some(path),
                Self::Pane(_) => {}
                Self::Container(c) => {
                    path.push(c);
                    for child in c.children.iter().rev() {
                        stack.push((child, depth + 1));
                    }
                }
            }
        }
        None
    }

    /// Is pane `id` inside a split of the given orientation at any depth?
    #[must_use]
    pub fn has_ancestor(&self, id: PaneId, orientation: Orientation) -> bool {
        self.ancestors(id)
            .is_some_and(|path| path.iter().any(|c| c.orientation == orientation))
    }

    // -- Layout ----------------------------------------------------------------

    /// Assign allocations to this node and everything beneath it.
    pub fn layout(&mut self, area: Allocation) {
        match self {
            Self::Pane(p) => p.allocation = area,
            Self::Container(c) => c.layout(area),
        }
    }

    /// Collect `(PaneId, Allocation)` for every pane, depth-first.
    #[must_use]
    pub fn pane_allocations(&self) -> Vec<(PaneId, Allocation)> {
        let mut out = Vec::new();
        self.collect_allocations(&mut out);
        out
    }

    fn collect_allocations(&self, out: &mut Vec<(PaneId, Allocation)>) {
        match self {
            Self::Pane(p) => out.push((p.id, p.allocation)),
            Self::Container(c) => {
                for child in &c.children {
                    child.collect_allocations(out);
                }
            }
        }
    }

    // -- Mutations --------------------------------------------------------------

    /// Split the pane `target`, placing `new_id` after it.
    ///
    /// If `target` already sits in a container of the requested orientation,
    /// the new pane joins that container as the next sibling. Otherwise the
    /// target is replaced by a two-child container. The affected subtree is
    /// laid out again within its existing allocation.
    ///
    /// Returns `true` if the target was found and split.
    pub fn split(&mut self, target: PaneId, orientation: Orientation, new_id: PaneId) -> bool {
        match self {
            Self::Pane(p) if p.id == target => {
                let area = p.allocation;
                let mut container =
                    Self::container(orientation, vec![Self::pane(target), Self::pane(new_id)]);
                container.layout(area);
                *self = container;
                true
            }
            Self::Pane(_) => false,
            Self::Container(c) => {
                if c.orientation == orientation {
                    if let Some(idx) = c.position_of_pane(target) {
                        c.children.insert(idx + 1, Self::pane(new_id));
                        c.relayout();
                        return true;
                    }
                }
                c.children
                    .iter_mut()
                    .any(|child| child.split(target, orientation, new_id))
            }
        }
    }

    /// Remove a pane from the tree.
    ///
    /// A container left with a single child is replaced by that child, which
    /// inherits the container's allocation. Returns `true` if found and
    /// removed.
    ///
    /// A tree that is a single pane is left alone and `false` is returned.
    pub fn close(&mut self, target: PaneId) -> bool {
        if matches!(self, Self::Pane(_)) {
            return false;
        }
        self.close_inner(target)
    }

    fn close_inner(&mut self, target: PaneId) -> bool {
        let Self::Container(c) = self else {
            return false;
        };

        if let Some(idx) = c.position_of_pane(target) {
            c.children.remove(idx);
            if c.children.len() == 1 {
                let area = c.allocation;
                if let Some(mut only) = c.children.pop() {
                    only.layout(area);
                    *self = only;
                }
            } else {
                c.relayout();
            }
            return true;
        }

        c.children.iter_mut().any(|child| child.close_inner(target))
    }

    /// Replace the tree with a single pane, removing all others.
    /// Returns the list of removed pane IDs.
    pub fn keep_only(&mut self, keep: PaneId) -> Vec<PaneId> {
        let area = self.allocation();
        let removed: Vec<PaneId> = self.leaves().into_iter().filter(|&id| id != keep).collect();
        *self = Self::Pane(Pane::new(keep, area));
        removed
    }

    // -- Cycling -----------------------------------------------------------------

    /// The pane after `current` in depth-first order. Wraps around.
    #[must_use]
    pub fn cycle_next(&self, current: PaneId) -> PaneId {
        let leaves = self.leaves();
        if leaves.len() <= 1 {
            return current;
        }
        let pos = leaves.iter().position(|&id| id == current).unwrap_or(0);
        leaves[(pos + 1) % leaves.len()]
    }

    /// The pane before `current` in depth-first order. Wraps around.
    #[must_use]
    pub fn cycle_prev(&self, current: PaneId) -> PaneId {
        let leaves = self.leaves();
        if leaves.len() <= 1 {
            return current;
        }
        let pos = leaves.iter().position(|&id| id == current).unwrap_or(0);
        leaves[(pos + leaves.len() - 1) % leaves.len()]
    }
}

/// Compact structural form: `V[1, H[2, 3]]`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pane(p) => write!(f, "{}", p.id),
            Self::Container(c) => {
                let tag = match c.orientation {
                    Orientation::Horizontal => 'H',
                    Orientation::Vertical => 'V',
                };
                write!(f, "{tag}[")?;
                for (i, child) in c.children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str("]")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
