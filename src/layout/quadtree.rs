use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 8;
const MAX_DEPTH: usize = 12;

#[derive(Clone, Copy)]
pub(super) struct Bounds {
    pub(super) center: Vec2,
    pub(super) half_extent: f32,
}

impl Bounds {
    fn enclosing(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);

        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return None;
        }

        let span = (max.x - min.x).max(max.y - min.y).max(1.0);
        Some(Self {
            center: (min + max) * 0.5,
            half_extent: (span * 0.5) + 1.0,
        })
    }

    pub(super) fn contains(self, point: Vec2) -> bool {
        (point.x - self.center.x).abs() <= self.half_extent
            && (point.y - self.center.y).abs() <= self.half_extent
    }

    pub(super) fn side_length(self) -> f32 {
        self.half_extent * 2.0
    }

    /// Squared distance between the closest points of two squares, zero
    /// when they touch or overlap.
    pub(super) fn distance_sq_to(self, other: Self) -> f32 {
        let spread = self.half_extent + other.half_extent;
        let dx = ((self.center.x - other.center.x).abs() - spread).max(0.0);
        let dy = ((self.center.y - other.center.y).abs() - spread).max(0.0);
        (dx * dx) + (dy * dy)
    }

    fn child(self, quadrant: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let offset = match quadrant {
            0 => vec2(-quarter, -quarter),
            1 => vec2(quarter, -quarter),
            2 => vec2(-quarter, quarter),
            _ => vec2(quarter, quarter),
        };
        Self {
            center: self.center + offset,
            half_extent: quarter,
        }
    }

    fn quadrant_for(self, point: Vec2) -> usize {
        let right = point.x >= self.center.x;
        let lower = point.y >= self.center.y;
        (usize::from(right)) | (usize::from(lower) << 1)
    }
}

/// Region-aggregation tree over node positions. Interior cells carry
/// their aggregate mass and center of mass so distant regions can stand
/// in for their members during repulsion.
pub(super) struct QuadTree {
    pub(super) bounds: Bounds,
    pub(super) center_of_mass: Vec2,
    pub(super) mass: f32,
    pub(super) points: Vec<usize>,
    pub(super) children: [Option<Box<QuadTree>>; 4],
}

impl QuadTree {
    /// Returns `None` for an empty point set or when any coordinate is
    /// non-finite.
    pub(super) fn build(positions: &[Vec2]) -> Option<Self> {
        if positions.is_empty() {
            return None;
        }
        let bounds = Bounds::enclosing(positions)?;
        let points = (0..positions.len()).collect();
        Some(Self::grow(bounds, points, positions, 0))
    }

    fn grow(bounds: Bounds, points: Vec<usize>, positions: &[Vec2], depth: usize) -> Self {
        let mass = points.len() as f32;
        let mut center_of_mass = Vec2::ZERO;
        for &index in &points {
            center_of_mass += positions[index];
        }
        if mass > 0.0 {
            center_of_mass /= mass;
        }

        let mut cell = Self {
            bounds,
            center_of_mass,
            mass,
            points,
            children: std::array::from_fn(|_| None),
        };

        if depth >= MAX_DEPTH || cell.points.len() <= LEAF_CAPACITY {
            return cell;
        }

        let mut buckets = std::array::from_fn::<_, 4, _>(|_| Vec::new());
        for &index in &cell.points {
            buckets[bounds.quadrant_for(positions[index])].push(index);
        }

        // Coincident points all land in one bucket; splitting further
        // would recurse without progress.
        if buckets.iter().filter(|bucket| !bucket.is_empty()).count() <= 1 {
            return cell;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if !bucket.is_empty() {
                cell.children[quadrant] = Some(Box::new(Self::grow(
                    bounds.child(quadrant),
                    bucket,
                    positions,
                    depth + 1,
                )));
            }
        }
        cell.points.clear();
        cell
    }

    pub(super) fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_builds_nothing() {
        assert!(QuadTree::build(&[]).is_none());
    }

    #[test]
    fn non_finite_input_builds_nothing() {
        assert!(QuadTree::build(&[vec2(f32::NAN, 0.0)]).is_none());
    }

    #[test]
    fn coincident_points_stay_in_one_leaf() {
        let positions = vec![vec2(5.0, 5.0); 40];
        let tree = QuadTree::build(&positions).unwrap();
        assert!(tree.is_leaf());
        assert_eq!(tree.points.len(), 40);
        assert_eq!(tree.mass, 40.0);
    }

    #[test]
    fn mass_is_conserved_across_subdivision() {
        let positions: Vec<Vec2> = (0..100)
            .map(|i| vec2((i % 10) as f32 * 17.0, (i / 10) as f32 * 13.0))
            .collect();
        let tree = QuadTree::build(&positions).unwrap();
        assert!(!tree.is_leaf());
        assert_eq!(tree.mass, 100.0);

        fn leaf_point_count(cell: &QuadTree) -> usize {
            if cell.is_leaf() {
                return cell.points.len();
            }
            cell.children
                .iter()
                .flatten()
                .map(|child| leaf_point_count(child))
                .sum()
        }
        assert_eq!(leaf_point_count(&tree), 100);
    }

    #[test]
    fn separated_bounds_report_positive_distance() {
        let near = Bounds {
            center: Vec2::ZERO,
            half_extent: 1.0,
        };
        let far = Bounds {
            center: vec2(10.0, 0.0),
            half_extent: 1.0,
        };
        assert_eq!(near.distance_sq_to(far), 64.0);
        assert_eq!(near.distance_sq_to(near), 0.0);
    }
}
