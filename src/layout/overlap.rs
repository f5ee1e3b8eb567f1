use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use super::quadtree::QuadTree;

const MAX_SWEEPS: usize = 128;
const MARGIN: f32 = 2.0;

/// Corrective pass run once after the force simulation: nudges apart
/// any two circles whose radii intersect. Considers only radius and
/// position, never edges.
pub(super) fn resolve_overlaps(positions: &mut [Vec2], radii: &[f32]) {
    if positions.len() < 2 || positions.len() != radii.len() {
        return;
    }

    let max_radius = radii.iter().copied().fold(0.0f32, f32::max);
    let reach = (max_radius * 2.0) + MARGIN;
    let reach_sq = reach * reach;
    let mut shifts = vec![Vec2::ZERO; positions.len()];

    for _ in 0..MAX_SWEEPS {
        let Some(tree) = QuadTree::build(positions) else {
            return;
        };

        shifts.fill(Vec2::ZERO);
        let mut moved = false;
        separate_pairs(
            &tree, &tree, true, positions, radii, reach_sq, &mut shifts, &mut moved,
        );

        if !moved {
            return;
        }
        for (position, shift) in positions.iter_mut().zip(&shifts) {
            *position += *shift;
        }
    }
}

fn push_apart(
    from: usize,
    to: usize,
    positions: &[Vec2],
    radii: &[f32],
    shifts: &mut [Vec2],
    moved: &mut bool,
) {
    let delta = positions[from] - positions[to];
    let distance = delta.length();
    let min_distance = radii[from] + radii[to] + MARGIN;
    if distance >= min_distance {
        return;
    }

    let direction = if distance > 0.0001 {
        delta / distance
    } else {
        // Coincident circles get a stable synthetic direction so the
        // pair separates the same way every run.
        let angle = ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * TAU;
        vec2(angle.cos(), angle.sin())
    };

    let push = (min_distance - distance) * 0.5;
    shifts[from] += direction * push;
    shifts[to] -= direction * push;
    *moved = true;
}

#[allow(clippy::too_many_arguments)]
fn separate_pairs(
    cell_a: &QuadTree,
    cell_b: &QuadTree,
    same_cell: bool,
    positions: &[Vec2],
    radii: &[f32],
    reach_sq: f32,
    shifts: &mut [Vec2],
    moved: &mut bool,
) {
    if cell_a.bounds.distance_sq_to(cell_b.bounds) > reach_sq {
        return;
    }

    if cell_a.is_leaf() && cell_b.is_leaf() {
        if same_cell {
            for i in 0..cell_a.points.len() {
                for j in (i + 1)..cell_a.points.len() {
                    push_apart(
                        cell_a.points[i],
                        cell_a.points[j],
                        positions,
                        radii,
                        shifts,
                        moved,
                    );
                }
            }
        } else {
            for &from in &cell_a.points {
                for &to in &cell_b.points {
                    push_apart(from, to, positions, radii, shifts, moved);
                }
            }
        }
        return;
    }

    if same_cell {
        for first in 0..4 {
            let Some(child_a) = cell_a.children[first].as_ref() else {
                continue;
            };

            separate_pairs(
                child_a, child_a, true, positions, radii, reach_sq, shifts, moved,
            );

            for second in (first + 1)..4 {
                if let Some(child_b) = cell_a.children[second].as_ref() {
                    separate_pairs(
                        child_a, child_b, false, positions, radii, reach_sq, shifts, moved,
                    );
                }
            }
        }
        return;
    }

    let split_a = if cell_a.is_leaf() {
        false
    } else if cell_b.is_leaf() {
        true
    } else {
        cell_a.bounds.half_extent >= cell_b.bounds.half_extent
    };

    if split_a {
        for child in cell_a.children.iter().flatten() {
            separate_pairs(
                child, cell_b, false, positions, radii, reach_sq, shifts, moved,
            );
        }
    } else {
        for child in cell_b.children.iter().flatten() {
            separate_pairs(
                cell_a, child, false, positions, radii, reach_sq, shifts, moved,
            );
        }
    }
}
