use std::path::Path;

use eframe::egui::{self, Context, RichText};

use super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn show_top_panel(
        &mut self,
        ctx: &Context,
        data_path: &Path,
        reload_requested: &mut bool,
        is_reloading: bool,
    ) {
        egui::TopBottomPanel::top("study-atlas-top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("study-atlas");
                ui.separator();
                ui.label(
                    RichText::new(data_path.display().to_string())
                        .monospace()
                        .weak(),
                );
                ui.separator();
                ui.label(format!(
                    "{} studies, {} links ({}/{} in view)",
                    self.graph.node_count(),
                    self.graph.edge_count(),
                    self.visible_node_count,
                    self.visible_edge_count,
                ));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if is_reloading {
                        ui.spinner();
                        ui.label("reloading...");
                    } else if ui.button("Reload").clicked() {
                        *reload_requested = true;
                    }

                    let search_field = egui::TextEdit::singleline(&mut self.search)
                        .hint_text("search studies")
                        .desired_width(220.0);
                    if ui.add(search_field).changed() {
                        self.search_match_cache = None;
                    }
                });
            });
        });
    }
}
