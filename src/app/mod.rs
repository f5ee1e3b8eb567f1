use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Pos2, Vec2};

use crate::data::load_records;
use crate::graph::{Graph, GraphBuilder};
use crate::interact::HoverController;
use crate::layout::{LayoutConfig, compute_positions};

mod interaction;
mod panels;
mod render_utils;
mod view;

pub struct StudyAtlasApp {
    data_path: PathBuf,
    layout: LayoutConfig,
    state: AppState,
    reload_rx: Option<Receiver<Result<Graph, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Graph, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: Graph,
    hover: HoverController,
    pan: Vec2,
    zoom: f32,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    view_scratch: ViewScratch,
    visible_node_count: usize,
    visible_edge_count: usize,
}

struct SearchMatchCache {
    query: String,
    matches: Arc<HashSet<usize>>,
}

#[derive(Default)]
struct ViewScratch {
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
}

/// Full pipeline run on the loader thread: records in, laid-out graph
/// out. Positions are applied before the graph crosses back to the UI
/// thread, so reducers never observe a partial layout.
fn prepare_graph(data_path: &Path, layout: &LayoutConfig) -> anyhow::Result<Graph> {
    let records = load_records(data_path)?;
    let mut graph = GraphBuilder::new().build(&records);
    let positions = compute_positions(&graph, layout);
    graph.apply_positions(&positions);
    Ok(graph)
}

impl StudyAtlasApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, data_path: PathBuf, layout: LayoutConfig) -> Self {
        let state = Self::start_load(data_path.clone(), layout);
        Self {
            data_path,
            layout,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(data_path: PathBuf, layout: LayoutConfig) -> Receiver<Result<Graph, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = prepare_graph(&data_path, &layout).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(data_path: PathBuf, layout: LayoutConfig) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(data_path, layout),
        }
    }
}

impl eframe::App for StudyAtlasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(graph) => AppState::Ready(Box::new(ViewModel::new(graph))),
                        Err(error) => AppState::Error(error),
                    });
                } else {
                    ctx.request_repaint();
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Arranging the study graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the study graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.data_path.clone(), self.layout));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.data_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.data_path.clone(), self.layout));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(graph) => AppState::Ready(Box::new(ViewModel::new(graph))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(AppState::Error("Background loader disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}

impl ViewModel {
    fn new(graph: Graph) -> Self {
        Self {
            graph,
            hover: HoverController::new(),
            pan: Vec2::ZERO,
            zoom: 1.0,
            search: String::new(),
            search_match_cache: None,
            view_scratch: ViewScratch::default(),
            visible_node_count: 0,
            visible_edge_count: 0,
        }
    }

    fn show(
        &mut self,
        ctx: &Context,
        data_path: &Path,
        reload_requested: &mut bool,
        is_reloading: bool,
    ) {
        self.show_top_panel(ctx, data_path, reload_requested, is_reloading);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_graph(ui);
        });
    }
}
