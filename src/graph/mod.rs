use std::collections::HashMap;

use eframe::egui::{Color32, Vec2};

mod build;
mod palette;

pub use build::{GraphBuilder, node_radius};
pub use palette::{CATEGORY_COLORS, NEUTRAL_COLOR, Palette};

/// A study (or a referenced-only study) in the relationship graph.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub radius: f32,
    pub color: Color32,
    /// World-space position. `Vec2::ZERO` until the layout runs.
    pub position: Vec2,
}

/// The node/edge store. Mutated by the builder and by
/// [`Graph::apply_positions`]; read-only during interaction.
///
/// Edges are undirected index pairs with no duplicates and no
/// self-loops. Edge identity is the unordered pair itself.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index_by_id: HashMap<String, usize>,
    edges: Vec<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Inserts a node unless its id is already present. The first
    /// insertion wins; a re-insert keeps the existing attributes.
    /// Returns the node's index either way.
    pub(crate) fn insert_node(&mut self, node: Node) -> usize {
        if let Some(&index) = self.index_by_id.get(&node.id) {
            return index;
        }

        let index = self.nodes.len();
        self.index_by_id.insert(node.id.clone(), index);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        index
    }

    /// Inserts an undirected edge. The builder is responsible for
    /// deduplication and self-loop filtering before calling this.
    pub(crate) fn insert_edge(&mut self, a: usize, b: usize) {
        self.edges.push((a, b));
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
    }

    /// Writes finished layout positions into the store. Positions
    /// beyond the node count are ignored; missing ones leave the node
    /// at its previous position.
    pub fn apply_positions(&mut self, positions: &[Vec2]) {
        for (node, position) in self.nodes.iter_mut().zip(positions) {
            node.position = *position;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    fn blank_node(id: &str) -> Node {
        Node {
            id: id.to_owned(),
            label: id.to_owned(),
            radius: 8.0,
            color: NEUTRAL_COLOR,
            position: Vec2::ZERO,
        }
    }

    #[test]
    fn reinsert_keeps_first_attributes() {
        let mut graph = Graph::default();
        let first = graph.insert_node(Node {
            radius: 12.0,
            ..blank_node("Law")
        });
        let second = graph.insert_node(blank_node("Law"));

        assert_eq!(first, second);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node(first).unwrap().radius, 12.0);
    }

    #[test]
    fn adjacency_tracks_both_endpoints() {
        let mut graph = Graph::default();
        let a = graph.insert_node(blank_node("A"));
        let b = graph.insert_node(blank_node("B"));
        graph.insert_edge(a, b);

        assert_eq!(graph.neighbors(a), &[b]);
        assert_eq!(graph.neighbors(b), &[a]);
        assert_eq!(graph.neighbors(99), &[] as &[usize]);
    }

    #[test]
    fn apply_positions_writes_through() {
        let mut graph = Graph::default();
        let a = graph.insert_node(blank_node("A"));
        graph.apply_positions(&[vec2(3.0, -4.0)]);
        assert_eq!(graph.node(a).unwrap().position, vec2(3.0, -4.0));
    }
}
