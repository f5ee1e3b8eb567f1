use eframe::egui::Color32;

use crate::graph::Node;

use super::HoverState;

/// Color for nodes outside the hovered neighborhood.
pub const FADED_NODE_COLOR: Color32 = Color32::from_rgb(0xcc, 0xcc, 0xcc);

/// Color for edges not touching the hovered node.
pub const DIMMED_EDGE_COLOR: Color32 = Color32::from_rgb(0xe0, 0xe0, 0xe0);

/// Effective visual attributes of a node for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyle {
    pub label: String,
    pub radius: f32,
    pub color: Color32,
    pub visible: bool,
}

/// Effective visual attributes of an edge for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeStyle {
    pub color: Color32,
    pub visible: bool,
}

/// Pure per-frame node reducer. Base attributes when idle or when the
/// node is the hovered node or one of its neighbors; otherwise the node
/// is demoted, not hidden: label suppressed, half size, neutral color.
pub fn node_style(state: &HoverState<'_>, index: usize, node: &Node) -> NodeStyle {
    let base = NodeStyle {
        label: node.label.clone(),
        radius: node.radius,
        color: node.color,
        visible: true,
    };

    let Some(hovered) = state.hovered else {
        return base;
    };
    if hovered == index || state.neighbors.contains(&index) {
        return base;
    }

    NodeStyle {
        label: String::new(),
        radius: node.radius * 0.5,
        color: FADED_NODE_COLOR,
        visible: true,
    }
}

/// Pure per-frame edge reducer. Base attributes when idle or when
/// either endpoint is the hovered node; otherwise dimmed, still drawn.
pub fn edge_style(state: &HoverState<'_>, endpoints: (usize, usize), base: EdgeStyle) -> EdgeStyle {
    let Some(hovered) = state.hovered else {
        return base;
    };
    if endpoints.0 == hovered || endpoints.1 == hovered {
        return base;
    }

    EdgeStyle {
        color: DIMMED_EDGE_COLOR,
        visible: true,
    }
}
