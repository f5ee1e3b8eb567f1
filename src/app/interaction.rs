use eframe::egui::{self, Rect, Ui};

use super::ViewModel;
use super::render_utils::screen_to_world;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.05, 6.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    /// Closest node circle under the pointer, if any.
    pub(in crate::app) fn node_under_pointer(&self, ui: &Ui) -> Option<usize> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        self.view_scratch
            .screen_positions
            .iter()
            .zip(&self.view_scratch.screen_radii)
            .enumerate()
            .filter_map(|(index, (position, radius))| {
                let distance = position.distance(pointer);
                if distance <= *radius {
                    Some((index, distance))
                } else {
                    None
                }
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// Feeds the frame's hit-test result to the hover controller as
    /// sequential enter/leave events (a leave always comes before the
    /// next enter). Returns whether the hover state changed.
    pub(in crate::app) fn apply_pointer_hit(&mut self, hit: Option<usize>) -> bool {
        match hit {
            Some(index) => {
                if self.hover.hovered() == Some(index) {
                    false
                } else {
                    let left = self.hover.pointer_leave();
                    self.hover.pointer_enter(&self.graph, index) || left
                }
            }
            None => self.hover.pointer_leave(),
        }
    }
}
