use eframe::egui::{Vec2, vec2};

use crate::graph::Graph;

use super::quadtree::QuadTree;

/// Barnes-Hut opening criterion: a cell whose side/distance ratio is
/// below this stands in for all of its points.
const THETA: f32 = 0.72;
const MIN_DISTANCE: f32 = 0.5;
const SPRING_STRENGTH: f32 = 0.18;
const GRAVITY: f32 = 0.0012;
const COOLING: f32 = 0.965;
const STEP_SCALE: f32 = 0.92;

fn pair_repulsion(point: Vec2, other: Vec2, strength: f32) -> Vec2 {
    let delta = point - other;
    let distance = delta.length().max(MIN_DISTANCE);
    let direction = if delta.length_sq() > 1e-8 {
        delta / distance
    } else {
        vec2(1.0, 0.0)
    };
    direction * (strength / distance)
}

fn accumulate_repulsion(
    cell: &QuadTree,
    index: usize,
    positions: &[Vec2],
    strength: f32,
    force: &mut Vec2,
) {
    if cell.mass <= 0.0 {
        return;
    }

    let point = positions[index];

    if cell.is_leaf() {
        for &other in &cell.points {
            if other != index {
                *force += pair_repulsion(point, positions[other], strength);
            }
        }
        return;
    }

    let delta = point - cell.center_of_mass;
    let distance = delta.length().max(MIN_DISTANCE);
    if !cell.bounds.contains(point) && (cell.bounds.side_length() / distance) < THETA {
        *force += (delta / distance) * (strength * cell.mass / distance);
        return;
    }

    for child in cell.children.iter().flatten() {
        accumulate_repulsion(child, index, positions, strength, force);
    }
}

/// Runs the attraction/repulsion relaxation for exactly `iterations`
/// rounds. There is no convergence check; the budget is the contract.
pub(super) fn simulate(graph: &Graph, positions: &mut [Vec2], iterations: usize, region: f32) {
    let node_count = positions.len();
    if node_count < 2 {
        return;
    }

    let radii = graph
        .nodes()
        .iter()
        .map(|node| node.radius)
        .collect::<Vec<_>>();

    let area = (region * 2.4).powi(2);
    let k = (area / node_count as f32).sqrt().max(24.0);
    let repulsion = k * k;
    let mut temperature = (k * 5.5).max(140.0);
    let mut displacements = vec![Vec2::ZERO; node_count];

    for _ in 0..iterations {
        displacements.fill(Vec2::ZERO);

        if let Some(tree) = QuadTree::build(positions) {
            for (index, displacement) in displacements.iter_mut().enumerate() {
                accumulate_repulsion(&tree, index, positions, repulsion, displacement);
            }
        }

        for &(from, to) in graph.edges() {
            if from >= node_count || to >= node_count || from == to {
                continue;
            }

            let delta = positions[from] - positions[to];
            let distance = delta.length().max(MIN_DISTANCE);
            let direction = delta / distance;

            let ideal = k + (radii[from] + radii[to]) * 3.5;
            let pull = (distance - ideal) * SPRING_STRENGTH;
            displacements[from] -= direction * pull;
            displacements[to] += direction * pull;
        }

        for (displacement, position) in displacements.iter_mut().zip(positions.iter()) {
            *displacement -= *position * GRAVITY;
        }

        for (position, displacement) in positions.iter_mut().zip(displacements.iter()) {
            let length = displacement.length();
            if length > 0.0 {
                *position += *displacement / length * length.min(temperature) * STEP_SCALE;
            }
        }

        temperature *= COOLING;
    }
}
