use std::collections::HashSet;

use crate::graph::Graph;

mod reducers;

pub use reducers::{DIMMED_EDGE_COLOR, EdgeStyle, FADED_NODE_COLOR, NodeStyle, edge_style, node_style};

/// Two-state hover machine: idle, or focused on one node with its
/// direct neighborhood cached. The render surface translates raw
/// pointer hits into strictly sequential enter/leave events; a leave
/// always precedes the next enter.
#[derive(Debug, Default)]
pub struct HoverController {
    hovered: Option<usize>,
    neighbors: HashSet<usize>,
}

/// Snapshot of the controller's state, consulted by the reducers. The
/// reducers only read it; they never mutate anything.
pub struct HoverState<'a> {
    pub hovered: Option<usize>,
    pub neighbors: &'a HashSet<usize>,
}

impl HoverController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Pointer entered a node: focus it and recompute its neighborhood
    /// in full. Returns whether the state changed, which is the signal
    /// to re-evaluate all visual attributes.
    pub fn pointer_enter(&mut self, graph: &Graph, index: usize) -> bool {
        if self.hovered == Some(index) {
            return false;
        }

        self.hovered = Some(index);
        self.neighbors.clear();
        self.neighbors.extend(graph.neighbors(index).iter().copied());
        true
    }

    /// Pointer left the hovered node: back to idle.
    pub fn pointer_leave(&mut self) -> bool {
        if self.hovered.is_none() {
            return false;
        }

        self.hovered = None;
        self.neighbors.clear();
        true
    }

    pub fn state(&self) -> HoverState<'_> {
        HoverState {
            hovered: self.hovered,
            neighbors: &self.neighbors,
        }
    }
}
