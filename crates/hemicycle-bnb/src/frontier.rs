// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::node::SearchNode;

/// The LIFO stack of open search nodes.
///
/// Last-in-first-out order gives depth-first search: the engine pushes the
/// up child before the down child, so the down branch is explored first
/// and the first incumbent arrives after at most one dive to the bottom of
/// the tree.
///
/// Performance notes:
/// - `preallocated` avoids reallocations on repeated solves.
/// - `reset` keeps the allocation while clearing per-run state.
#[derive(Clone, Debug, Default)]
pub struct Frontier {
    nodes: Vec<SearchNode>,
}

impl Frontier {
    /// Creates a new, empty `Frontier`.
    #[inline]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Creates a preallocated `Frontier` sized for a tree over
    /// `num_integral` branching columns.
    ///
    /// Depth-first search keeps at most two open children per level, so
    /// twice the column count is a comfortable ceiling for typical runs.
    #[inline]
    pub fn preallocated(num_integral: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(num_integral.saturating_mul(2)),
        }
    }

    /// Returns the number of open nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes are open (search exhausted).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pushes a node onto the stack.
    #[inline]
    pub fn push(&mut self, node: SearchNode) {
        self.nodes.push(node);
    }

    /// Pops the most recently pushed node.
    #[inline]
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.nodes.pop()
    }

    /// Clears all open nodes, keeping the allocation.
    #[inline]
    pub fn reset(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SeatBounds;

    fn node(upper: i64) -> SearchNode {
        SearchNode::root(vec![SeatBounds::new(0, upper)])
    }

    #[test]
    fn test_new_frontier_is_empty() {
        let frontier = Frontier::new();
        assert!(frontier.is_empty());
        assert_eq!(frontier.len(), 0);
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let mut frontier = Frontier::new();
        frontier.push(node(1));
        frontier.push(node(2));
        frontier.push(node(3));

        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.pop().unwrap().bounds()[0].upper, 3);
        assert_eq!(frontier.pop().unwrap().bounds()[0].upper, 2);
        assert_eq!(frontier.pop().unwrap().bounds()[0].upper, 1);
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_reset_clears_but_keeps_capacity() {
        let mut frontier = Frontier::preallocated(8);
        let capacity = frontier.nodes.capacity();
        frontier.push(node(1));
        frontier.push(node(2));

        frontier.reset();
        assert!(frontier.is_empty());
        assert_eq!(frontier.nodes.capacity(), capacity);
    }
}
