//! Tree flattener — partition a subtree into containers and panes.
//!
//! Walks breadth-first from a node's direct children. The root itself is not
//! part of the result: flattening a container yields what lies beneath it,
//! and flattening a bare pane yields nothing.
//!
//! Children are always discovered before grandchildren. Callers must not
//! rely on any stricter ordering than that.

use std::collections::VecDeque;

use crate::tree::{Container, Node, Pane};

/// Every descendant of a node, split by kind.
#[derive(Debug, Default)]
pub struct Flattened<'a> {
    pub containers: Vec<&'a Container>,
    pub panes: Vec<&'a Pane>,
}

impl Flattened<'_> {
    /// Total number of descendants visited.
    #[must_use]
    pub fn len(&self) -> usize {
        self.containers.len() + self.panes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty() && self.panes.is_empty()
    }
}

/// Collect the containers and panes beneath `root`, breadth-first.
#[must_use]
pub fn flatten(root: &Node) -> Flattened<'_> {
    let mut out = Flattened::default();
    let mut queue: VecDeque<&Node> = root.children().iter().collect();

    while let Some(node) = queue.pop_front() {
        match node {
            Node::Container(c) => {
                out.containers.push(c);
                queue.extend(c.children());
            }
            Node::Pane(p) => out.panes.push(p),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Orientation, PaneId};

    fn p(id: usize) -> Node {
        Node::pane(PaneId(id))
    }

    fn pane_ids(f: &Flattened<'_>) -> Vec<usize> {
        f.panes.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn bare_pane_has_no_descendants() {
        let n = p(1);
        let f = flatten(&n);
        assert!(f.is_empty());
        assert_eq!(f.len(), 0);
    }

    #[test]
    fn single_split() {
        let n = Node::vertical(p(1), p(2));
        let f = flatten(&n);
        assert!(f.containers.is_empty());
        assert_eq!(pane_ids(&f), vec![1, 2]);
    }

    #[test]
    fn breadth_first_order() {
        // V[H[1, 2], 3, H[4, V[5, 6]]]
        let n = Node::container(
            Orientation::Vertical,
            vec![
                Node::horizontal(p(1), p(2)),
                p(3),
                Node::horizontal(p(4), Node::vertical(p(5), p(6))),
            ],
        );
        let f = flatten(&n);
        // Depth 1: H, 3, H. Depth 2: 1, 2, 4, V. Depth 3: 5, 6.
        assert_eq!(pane_ids(&f), vec![3, 1, 2, 4, 5, 6]);
        assert_eq!(f.containers.len(), 3);
        assert_eq!(f.containers[2].orientation(), Orientation::Vertical);
        assert_eq!(f.len(), 9);
    }

    #[test]
    fn flattening_a_subtree() {
        let n = Node::vertical(p(1), Node::horizontal(p(2), p(3)));
        let sub = &n.children()[1];
        let f = flatten(sub);
        assert_eq!(pane_ids(&f), vec![2, 3]);
        assert!(f.containers.is_empty());
    }
}
