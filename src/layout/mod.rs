use std::f32::consts::PI;

use eframe::egui::{Vec2, vec2};

use crate::graph::Graph;
use crate::util::seeded_unit_pair;

mod forces;
mod overlap;
mod quadtree;

/// Default round budget for the force simulation.
pub const DEFAULT_ITERATIONS: usize = 500;

#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
    /// Simulation rounds. The full budget always runs.
    pub iterations: usize,
    /// Seed for the initial node placement.
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: 0,
        }
    }
}

/// Computes a world-space position for every node: random seeding
/// inside a bounded disc, the fixed-budget force relaxation, then one
/// overlap-removal pass. The engine holds the positions only for the
/// duration of this call; the caller hands them to the graph store.
pub fn compute_positions(graph: &Graph, config: &LayoutConfig) -> Vec<Vec2> {
    let node_count = graph.node_count();
    if node_count == 0 {
        return Vec::new();
    }

    let region = (node_count as f32).sqrt() * 120.0;
    let mut positions = graph
        .nodes()
        .iter()
        .map(|node| seed_position(&node.id, config.seed, region))
        .collect::<Vec<_>>();

    forces::simulate(graph, &mut positions, config.iterations, region);

    let radii = graph
        .nodes()
        .iter()
        .map(|node| node.radius)
        .collect::<Vec<_>>();
    overlap::resolve_overlaps(&mut positions, &radii);

    positions
}

/// Uniform position inside the disc of the given radius, deterministic
/// per (id, seed).
fn seed_position(id: &str, seed: u64, region: f32) -> Vec2 {
    let (u, v) = seeded_unit_pair(id, seed);
    let angle = u * PI;
    let distance = region * ((v + 1.0) * 0.5).sqrt();
    vec2(angle.cos(), angle.sin()) * distance
}
