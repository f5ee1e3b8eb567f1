use std::collections::HashSet;

use eframe::egui::Vec2;

use crate::data::StudyRecord;

use super::palette::{NEUTRAL_COLOR, Palette};
use super::{Graph, Node};

/// Radius for studies without a usable student count, and the floor for
/// all others.
pub const DEFAULT_RADIUS: f32 = 8.0;

/// Node radius from a student count. Monotone in the count and never
/// below [`DEFAULT_RADIUS`].
pub fn node_radius(student_count: Option<f64>) -> f32 {
    match student_count {
        Some(count) if count.is_finite() && count > 0.0 => {
            ((count / 1.5).sqrt() * 1.2).max(f64::from(DEFAULT_RADIUS)) as f32
        }
        _ => DEFAULT_RADIUS,
    }
}

/// sdbm over UTF-16 code units with 32-bit wrapping, matching the hash
/// historically used for the edge dedup key.
fn sdbm(text: &str) -> i32 {
    let mut hash = 0i32;
    for unit in text.encode_utf16() {
        hash = i32::from(unit)
            .wrapping_add(hash.wrapping_shl(6))
            .wrapping_add(hash.wrapping_shl(16))
            .wrapping_sub(hash);
    }
    hash
}

/// Order-independent key for an unordered endpoint pair. Distinct pairs
/// can collide (the hash is a rolling accumulation, not cryptographic),
/// in which case the later edge is silently dropped as a false
/// duplicate. Known caveat, kept as-is.
fn edge_key(a: &str, b: &str) -> i64 {
    i64::from(sdbm(a)) + i64::from(sdbm(b))
}

/// Turns an ordered sequence of study records into a populated
/// [`Graph`]. Owns the palette assignment and the edge dedup set for
/// the duration of one build.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    palette: Palette,
    seen_edge_keys: HashSet<i64>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two passes, as the source data is shaped for: the first inserts
    /// every primary study so its derived attributes win over any
    /// reference-only placeholder, the second inserts referenced
    /// studies and the deduplicated edges between them.
    pub fn build(mut self, records: &[StudyRecord]) -> Graph {
        let mut graph = Graph::default();

        for record in records {
            let Some(id) = record.identity() else {
                continue;
            };

            let color = self
                .palette
                .color_for(record.faculty.first().map(String::as_str));
            graph.insert_node(Node {
                id: id.to_owned(),
                label: id.to_owned(),
                radius: node_radius(record.student_count),
                color,
                position: Vec2::ZERO,
            });
        }

        for record in records {
            let Some(id) = record.identity() else {
                continue;
            };
            // identity() returned Some in the first pass, so the lookup
            // cannot fail.
            let Some(source) = graph.index_of(id) else {
                continue;
            };

            for related in &record.related {
                if related.is_empty() || related == id {
                    continue;
                }

                let target = graph.insert_node(Node {
                    id: related.clone(),
                    label: related.clone(),
                    radius: DEFAULT_RADIUS,
                    color: NEUTRAL_COLOR,
                    position: Vec2::ZERO,
                });

                if self.seen_edge_keys.insert(edge_key(id, related)) {
                    graph.insert_edge(source, target);
                }
            }
        }

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::palette::CATEGORY_COLORS;

    fn record(study: &str, related: &[&str]) -> StudyRecord {
        StudyRecord {
            study: Some(study.to_owned()),
            related: related.iter().map(|s| (*s).to_owned()).collect(),
            ..Default::default()
        }
    }

    fn edge_id_pairs(graph: &Graph) -> HashSet<(String, String)> {
        graph
            .edges()
            .iter()
            .map(|&(a, b)| {
                let mut pair = [
                    graph.node(a).unwrap().id.clone(),
                    graph.node(b).unwrap().id.clone(),
                ];
                pair.sort();
                (pair[0].clone(), pair[1].clone())
            })
            .collect()
    }

    #[test]
    fn radius_is_monotone_and_floored() {
        assert_eq!(node_radius(None), DEFAULT_RADIUS);
        assert_eq!(node_radius(Some(-3.0)), DEFAULT_RADIUS);
        assert_eq!(node_radius(Some(f64::NAN)), DEFAULT_RADIUS);
        assert_eq!(node_radius(Some(1.0)), DEFAULT_RADIUS);

        let mut previous = 0.0f32;
        for count in 1..2000 {
            let radius = node_radius(Some(f64::from(count)));
            assert!(radius >= DEFAULT_RADIUS);
            assert!(radius >= previous);
            previous = radius;
        }
        assert!(node_radius(Some(10_000.0)) > DEFAULT_RADIUS);
    }

    #[test]
    fn node_count_covers_primary_and_related_identities() {
        let records = [
            record("A", &["B", "C"]),
            record("B", &["A"]),
            record("D", &[]),
        ];
        let graph = GraphBuilder::new().build(&records);

        // Distinct identities: A, B, C, D.
        assert_eq!(graph.node_count(), 4);
    }

    #[test]
    fn edges_are_deduplicated_regardless_of_direction() {
        let records = [record("A", &["B", "B"]), record("B", &["A"])];
        let graph = GraphBuilder::new().build(&records);

        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn edge_set_is_order_independent() {
        let forward = [
            record("A", &["B", "C"]),
            record("B", &["C"]),
            record("C", &["A"]),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let graph_a = GraphBuilder::new().build(&forward);
        let graph_b = GraphBuilder::new().build(&reversed);

        assert_eq!(edge_id_pairs(&graph_a), edge_id_pairs(&graph_b));
    }

    #[test]
    fn self_references_are_filtered() {
        let graph = GraphBuilder::new().build(&[record("A", &["A", "B"])]);

        assert_eq!(graph.edge_count(), 1);
        let a = graph.index_of("A").unwrap();
        assert!(!graph.neighbors(a).contains(&a));
    }

    #[test]
    fn records_without_identity_are_skipped() {
        let nameless = StudyRecord {
            related: vec!["B".to_owned()],
            ..Default::default()
        };
        let graph = GraphBuilder::new().build(&[nameless, record("A", &[])]);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn primary_attributes_win_over_reference_placeholders() {
        let records = [
            record("A", &["B"]),
            StudyRecord {
                study: Some("B".to_owned()),
                faculty: vec!["Science".to_owned()],
                student_count: Some(600.0),
                related: Vec::new(),
            },
        ];
        let graph = GraphBuilder::new().build(&records);
        let b = graph.node(graph.index_of("B").unwrap()).unwrap();

        // B is a primary record, so it gets its own radius and faculty
        // color even though A references it.
        assert!(b.radius > DEFAULT_RADIUS);
        assert_ne!(b.color, NEUTRAL_COLOR);
    }

    #[test]
    fn duplicated_primary_record_keeps_first_attributes() {
        let records = [
            StudyRecord {
                study: Some("A".to_owned()),
                student_count: Some(600.0),
                ..Default::default()
            },
            StudyRecord {
                study: Some("A".to_owned()),
                student_count: Some(6.0),
                ..Default::default()
            },
        ];
        let graph = GraphBuilder::new().build(&records);

        assert_eq!(graph.node_count(), 1);
        let a = graph.node(0).unwrap();
        assert_eq!(a.radius, node_radius(Some(600.0)));
    }

    #[test]
    fn reference_only_nodes_are_neutral() {
        let graph = GraphBuilder::new().build(&[record("A", &["B"])]);
        let b = graph.node(graph.index_of("B").unwrap()).unwrap();

        assert_eq!(b.radius, DEFAULT_RADIUS);
        assert_eq!(b.color, NEUTRAL_COLOR);
        assert_eq!(b.label, "B");
    }

    #[test]
    fn faculty_colors_follow_first_seen_order() {
        let records = [
            StudyRecord {
                study: Some("A".to_owned()),
                faculty: vec!["Science".to_owned()],
                ..Default::default()
            },
            StudyRecord {
                study: Some("B".to_owned()),
                faculty: vec!["Arts".to_owned()],
                ..Default::default()
            },
            StudyRecord {
                study: Some("C".to_owned()),
                faculty: vec!["Science".to_owned()],
                ..Default::default()
            },
        ];
        let graph = GraphBuilder::new().build(&records);

        let color_of = |id: &str| graph.node(graph.index_of(id).unwrap()).unwrap().color;
        assert_eq!(color_of("A"), CATEGORY_COLORS[0]);
        assert_eq!(color_of("B"), CATEGORY_COLORS[1]);
        assert_eq!(color_of("C"), CATEGORY_COLORS[0]);
    }

    #[test]
    fn symmetric_key_matches_for_swapped_endpoints() {
        assert_eq!(edge_key("Biology", "Chemistry"), edge_key("Chemistry", "Biology"));
        assert_ne!(edge_key("Biology", "Chemistry"), edge_key("Biology", "Physics"));
    }
}
