//! Session — one window's layout tree, focus, and pointer.
//!
//! The session is the key-binding dispatcher's view of the world. It owns
//! the layout tree and serialises every mutation and every navigation query
//! through `&mut self`, so a query never observes a half-applied split or
//! close.
//!
//! # Focus rules
//!
//! | Action          | Focus afterwards                                   |
//! |-----------------|----------------------------------------------------|
//! | `Focus(dir)`    | The navigator's pick, or unchanged if none         |
//! | `CycleNext/Prev`| Next/previous pane in depth-first order            |
//! | `Split(_)`      | The new pane                                       |
//! | `Close`         | Depth-first successor, or predecessor at the end   |
//! | `Only`          | Unchanged                                          |
//!
//! # Cursor
//!
//! The pointer position is only meaningful for tie-breaking while it lies
//! inside the focused pane. When it has drifted elsewhere (the user moved
//! focus from the keyboard), directional moves use the centre of the focused
//! pane instead.

use std::fmt;
use std::fmt::Write as _;

use n_layout::{Allocation, NavError, Node, PaneId, Point, navigate};
use thiserror::Error;

use crate::action::Action;
use crate::diag::{Diagnostic, Diagnostics};
use crate::keymap::{KeyChord, Keymap};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Navigation(#[from] NavError),

    #[error("cannot close the last pane")]
    LastPane,
}

/// What a dispatched action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Focus moved between panes.
    Focus { from: PaneId, to: PaneId },
    /// Nothing changed.
    Unchanged,
    /// A new pane was created and focused.
    Split { from: PaneId, pane: PaneId },
    /// The focused pane was closed.
    Closed { pane: PaneId, focus: PaneId },
    /// Every pane but the focused one was closed.
    Only { removed: Vec<PaneId> },
    /// The tree was laid out on a new area.
    Resized(Allocation),
    /// The pointer position was updated.
    CursorMoved(Point),
    /// The chord has no binding.
    Unbound(KeyChord),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Focus { from, to } => write!(f, "focus {from} -> {to}"),
            Self::Unchanged => f.write_str("unchanged"),
            Self::Split { from, pane } => write!(f, "split {from} -> new pane {pane}"),
            Self::Closed { pane, focus } => write!(f, "closed {pane}, focus {focus}"),
            Self::Only { removed } => {
                f.write_str("only, removed")?;
                if removed.is_empty() {
                    return f.write_str(" nothing");
                }
                for id in removed {
                    write!(f, " {id}")?;
                }
                Ok(())
            }
            Self::Resized(area) => write!(f, "resized to {}x{}", area.width, area.height),
            Self::CursorMoved(p) => write!(f, "cursor at {},{}", p.x, p.y),
            Self::Unbound(chord) => write!(f, "{chord} is not bound"),
        }
    }
}

/// A window's panes and the state the dispatcher tracks around them.
#[derive(Debug, Clone)]
pub struct Session {
    root: Node,
    focus: PaneId,
    cursor: Point,
    area: Allocation,
    next_id: usize,
    keymap: Keymap,
}

impl Session {
    /// A session with a single pane filling `area` and the default keymap.
    #[must_use]
    pub fn new(area: Allocation) -> Self {
        let first = PaneId(1);
        let mut root = Node::pane(first);
        root.layout(area);
        Self {
            root,
            focus: first,
            cursor: Point::new(area.x, area.y),
            area,
            next_id: 2,
            keymap: Keymap::default(),
        }
    }

    // -- Accessors ---------------------------------------------------------------

    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    #[must_use]
    pub const fn focus(&self) -> PaneId {
        self.focus
    }

    #[must_use]
    pub const fn cursor(&self) -> Point {
        self.cursor
    }

    #[must_use]
    pub const fn area(&self) -> Allocation {
        self.area
    }

    #[must_use]
    pub const fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub const fn keymap_mut(&mut self) -> &mut Keymap {
        &mut self.keymap
    }

    // -- Dispatch ----------------------------------------------------------------

    /// Look `chord` up in the keymap and apply the bound action.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Session::apply`].
    pub fn press(
        &mut self,
        chord: KeyChord,
        diag: &mut dyn Diagnostics,
    ) -> Result<Outcome, SessionError> {
        match self.keymap.lookup(chord) {
            Some(action) => self.apply(action, diag),
            None => {
                diag.record(Diagnostic::Unbound { chord });
                Ok(Outcome::Unbound(chord))
            }
        }
    }

    /// Apply one action.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Navigation`] if the focused pane is missing from the
    ///   tree (a broken session, reported rather than repaired).
    /// - [`SessionError::LastPane`] when closing the only pane.
    pub fn apply(
        &mut self,
        action: Action,
        diag: &mut dyn Diagnostics,
    ) -> Result<Outcome, SessionError> {
        let from = self.focus;
        match action {
            Action::Focus(direction) => {
                let cursor = self.effective_cursor();
                match navigate(&self.root, from, direction, cursor) {
                    Ok(Some(to)) => {
                        diag.record(Diagnostic::FocusMoved { from, to, direction });
                        self.focus = to;
                        Ok(Outcome::Focus { from, to })
                    }
                    Ok(None) => {
                        diag.record(Diagnostic::NoCandidate { from, direction });
                        Ok(Outcome::Unchanged)
                    }
                    Err(error) => {
                        diag.record(Diagnostic::NavigationFailed {
                            direction,
                            error: error.clone(),
                        });
                        Err(error.into())
                    }
                }
            }
            Action::CycleNext | Action::CyclePrev => {
                let to = if action == Action::CycleNext {
                    self.root.cycle_next(from)
                } else {
                    self.root.cycle_prev(from)
                };
                if to == from {
                    return Ok(Outcome::Unchanged);
                }
                diag.record(Diagnostic::FocusCycled { from, to });
                self.focus = to;
                Ok(Outcome::Focus { from, to })
            }
            Action::Split(orientation) => {
                let pane = PaneId(self.next_id);
                if !self.root.split(from, orientation, pane) {
                    return Err(NavError::UnknownPane(from).into());
                }
                self.next_id += 1;
                self.focus = pane;
                Ok(Outcome::Split { from, pane })
            }
            Action::Close => {
                let leaves = self.root.leaves();
                if leaves.len() <= 1 {
                    return Err(SessionError::LastPane);
                }
                let pos = leaves
                    .iter()
                    .position(|&id| id == from)
                    .ok_or(NavError::UnknownPane(from))?;
                let focus = leaves
                    .get(pos + 1)
                    .copied()
                    .unwrap_or_else(|| leaves[pos - 1]);
                self.root.close(from);
                self.focus = focus;
                Ok(Outcome::Closed { pane: from, focus })
            }
            Action::Only => {
                if !self.root.contains(from) {
                    return Err(NavError::UnknownPane(from).into());
                }
                let removed = self.root.keep_only(from);
                Ok(Outcome::Only { removed })
            }
            Action::MoveCursor(point) => {
                self.cursor = point;
                Ok(Outcome::CursorMoved(point))
            }
            Action::Resize { width, height } => {
                self.area = Allocation::new(0, 0, width, height);
                self.root.layout(self.area);
                Ok(Outcome::Resized(self.area))
            }
        }
    }

    /// The pointer if it lies inside the focused pane, else the pane's centre.
    fn effective_cursor(&self) -> Point {
        let Some(pane) = self.root.find_pane(self.focus) else {
            return self.cursor;
        };
        let a = pane.allocation;
        let (x, y) = (i64::from(self.cursor.x), i64::from(self.cursor.y));
        if (a.left()..a.right()).contains(&x) && (a.top()..a.bottom()).contains(&y) {
            return self.cursor;
        }
        centre(&a)
    }

    // -- Reporting ---------------------------------------------------------------

    /// Multi-line description of the layout: the tree shape, then one line
    /// per pane with its allocation. The focused pane is marked with `*`.
    #[must_use]
    pub fn describe(&self) -> String {
        let mut out = format!("{}\n", self.root);
        for (id, a) in self.root.pane_allocations() {
            let mark = if id == self.focus { '*' } else { ' ' };
            let _ = writeln!(out, "{mark} {id:>3}  {a}");
        }
        out
    }
}

fn centre(a: &Allocation) -> Point {
    let half = |origin: i32, extent: u32| {
        i32::try_from(i64::from(origin) + i64::from(extent / 2)).unwrap_or(i32::MAX)
    };
    Point::new(half(a.x, a.width), half(a.y, a.height))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
