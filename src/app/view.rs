use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::interact::{EdgeStyle, edge_style, node_style};

use super::render_utils::{
    blend_color, circle_visible, draw_background, edge_visible, world_to_screen,
};
use super::{SearchMatchCache, ViewModel};

const BASE_EDGE_COLOR: Color32 = Color32::from_rgb(0x99, 0x99, 0x99);
const SEARCH_MATCH_COLOR: Color32 = Color32::from_rgb(0x2f, 0x74, 0xd0);
/// Labels only render once a node is drawn at least this large,
/// unless a hover is active.
const LABEL_SIZE_THRESHOLD: f32 = 14.0;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    fn update_screen_space(&mut self, rect: Rect) {
        let pan = self.pan;
        let zoom = self.zoom;
        let scratch = &mut self.view_scratch;

        scratch.screen_positions.clear();
        scratch.screen_radii.clear();
        for node in self.graph.nodes() {
            scratch
                .screen_positions
                .push(world_to_screen(rect, pan, zoom, node.position));
            scratch
                .screen_radii
                .push((node.radius * zoom.powf(0.40)).clamp(2.5, 46.0));
        }
    }

    fn cached_search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        if self.hover.hovered().is_some() {
            return None;
        }

        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .graph
            .nodes()
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                fuzzy_match_score(&matcher, &node.label, query).map(|_| index)
            })
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);
        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);
        self.update_screen_space(rect);

        let hit = if response.hovered() {
            self.node_under_pointer(ui)
        } else {
            None
        };
        if self.apply_pointer_hit(hit) {
            // Hover transitions re-run the reducers over everything.
            ui.ctx().request_repaint();
        }
        if self.hover.hovered().is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let search_matches = self.cached_search_matches();
        let state = self.hover.state();

        let base_edge = EdgeStyle {
            color: BASE_EDGE_COLOR,
            visible: true,
        };
        let zoom_sqrt = self.zoom.sqrt();
        let mut visible_edges = 0usize;
        for &edge in self.graph.edges() {
            let start = self.view_scratch.screen_positions[edge.0];
            let end = self.view_scratch.screen_positions[edge.1];
            if !edge_visible(rect, start, end, 2.5) {
                continue;
            }

            let style = edge_style(&state, edge, base_edge);
            if !style.visible {
                continue;
            }

            let width = (1.1 * zoom_sqrt).clamp(0.5, 3.0);
            painter.line_segment([start, end], Stroke::new(width, style.color));
            visible_edges += 1;
        }
        self.visible_edge_count = visible_edges;

        let mut visible_nodes = 0usize;
        for (index, node) in self.graph.nodes().iter().enumerate() {
            let position = self.view_scratch.screen_positions[index];
            if !circle_visible(rect, position, self.view_scratch.screen_radii[index]) {
                continue;
            }
            visible_nodes += 1;

            let style = node_style(&state, index, node);
            if !style.visible {
                continue;
            }
            let screen_radius = (style.radius * self.zoom.powf(0.40)).clamp(2.0, 46.0);

            let mut color = style.color;
            if let Some(matches) = &search_matches
                && matches.contains(&index)
            {
                color = blend_color(color, SEARCH_MATCH_COLOR, 0.55);
            }

            painter.circle_filled(position, screen_radius, color);
            painter.circle_stroke(
                position,
                screen_radius,
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(30, 30, 30, 170)),
            );

            let show_label = !style.label.is_empty()
                && (state.hovered.is_some() || screen_radius >= LABEL_SIZE_THRESHOLD);
            if show_label {
                painter.text(
                    position + vec2(screen_radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    &style.label,
                    FontId::proportional(12.0),
                    Color32::from_gray(40),
                );
            }
        }
        self.visible_node_count = visible_nodes;

        if let Some(hovered) = self.hover.hovered()
            && let Some(node) = self.graph.node(hovered)
        {
            let caption = format!(
                "{}  |  {} links",
                node.label,
                self.graph.neighbors(hovered).len()
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                caption,
                FontId::proportional(13.0),
                Color32::from_gray(40),
            );
        }
    }
}
