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

//! Search nodes and their integer bound sets.
//!
//! A node owns the complete lower/upper bound pair for every integral
//! column, stored as `i64` so branching arithmetic is exact. Children are
//! created by tightening a single pair: the down child caps the column at
//! `floor(value)`, the up child raises it to `ceil(value)`.

/// Lifecycle of a search node.
///
/// `Pending` nodes sit on the frontier. Popping one solves its relaxation
/// (`Relaxed`), after which it is pruned, branched, or accepted as an
/// integer-feasible point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Waiting on the frontier.
    Pending,
    /// Relaxation solved, classification in progress.
    Relaxed,
    /// Discarded: infeasible subtree or dominated by the incumbent.
    Pruned,
    /// Split into two children.
    Branched,
    /// Relaxation optimum already satisfies all integrality flags.
    IntegerFeasible,
}

impl std::fmt::Display for NodeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeState::Pending => write!(f, "Pending"),
            NodeState::Relaxed => write!(f, "Relaxed"),
            NodeState::Pruned => write!(f, "Pruned"),
            NodeState::Branched => write!(f, "Branched"),
            NodeState::IntegerFeasible => write!(f, "IntegerFeasible"),
        }
    }
}

/// Inclusive integer bounds of one integral column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatBounds {
    pub lower: i64,
    pub upper: i64,
}

impl SeatBounds {
    /// Creates a bound pair.
    #[inline]
    pub fn new(lower: i64, upper: i64) -> Self {
        Self { lower, upper }
    }

    /// Returns `true` if no integer satisfies the pair.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
    }
}

impl std::fmt::Display for SeatBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// A node in the branch-and-bound tree.
///
/// `bounds[i]` constrains the i-th integral column of the program (in
/// ascending column order); the mapping to actual column indices is owned
/// by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    depth: usize,
    state: NodeState,
    bounds: Vec<SeatBounds>,
}

impl SearchNode {
    /// Creates the root node over the program's own integer bounds.
    #[inline]
    pub fn root(bounds: Vec<SeatBounds>) -> Self {
        Self {
            depth: 0,
            state: NodeState::Pending,
            bounds,
        }
    }

    /// Returns the depth of this node (0 for the root).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the lifecycle state of this node.
    #[inline]
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Advances the lifecycle state.
    #[inline]
    pub fn set_state(&mut self, state: NodeState) {
        self.state = state;
    }

    /// Returns the integer bounds of this node.
    #[inline]
    pub fn bounds(&self) -> &[SeatBounds] {
        &self.bounds
    }

    /// Returns `true` if any bound pair excludes every integer.
    #[inline]
    pub fn has_empty_domain(&self) -> bool {
        self.bounds.iter().any(SeatBounds::is_empty)
    }

    /// Creates the down child: position capped at `floor(value)`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `position` is out of bounds.
    pub fn child_down(&self, position: usize, value: f64) -> Self {
        debug_assert!(
            position < self.bounds.len(),
            "called `SearchNode::child_down` with position out of bounds: the len is {} but the index is {}",
            self.bounds.len(),
            position
        );

        let mut bounds = self.bounds.clone();
        bounds[position].upper = bounds[position].upper.min(value.floor() as i64);
        Self {
            depth: self.depth + 1,
            state: NodeState::Pending,
            bounds,
        }
    }

    /// Creates the up child: position raised to `ceil(value)`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `position` is out of bounds.
    pub fn child_up(&self, position: usize, value: f64) -> Self {
        debug_assert!(
            position < self.bounds.len(),
            "called `SearchNode::child_up` with position out of bounds: the len is {} but the index is {}",
            self.bounds.len(),
            position
        );

        let mut bounds = self.bounds.clone();
        bounds[position].lower = bounds[position].lower.max(value.ceil() as i64);
        Self {
            depth: self.depth + 1,
            state: NodeState::Pending,
            bounds,
        }
    }
}

impl std::fmt::Display for SearchNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchNode(depth: {}, state: {}, num_bounds: {})",
            self.depth,
            self.state,
            self.bounds.len()
        )
    }
}
