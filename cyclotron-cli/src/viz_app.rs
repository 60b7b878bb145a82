//! Interactive cyclotron window.
//!
//! The app owns a [`TrajectoryEngine`] and talks to it only through its public
//! API. While running, a [`Ticker`] paces one batch per 20 ms; while stopped,
//! the frame slider scrubs through the recorded history. An optional preset
//! file is watched and re-applied whenever it changes.

use anyhow::Result;
use cyclotron_core::{
    advance, list_species, load_parameters, GapDirection, ParticleSpecies, Phase,
    SimulationParameters, StepRecord, TickOutcome, Ticker, TrajectoryEngine, DEE_RADIUS,
    GAP_WIDTH,
};
use cyclotron_core::params::{
    MAGNETIC_FIELD_RANGE, SPEED_FACTOR_RANGE, STEPS_PER_TICK_RANGE, VOLTAGE_RANGE,
};
use eframe::egui::{self, Color32, Pos2, Rect, Shape, Stroke};
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;

/// Half-width of the visible world square, in m
const VIEW_EXTENT: f64 = 0.6;
const SOURCE_RADIUS: f64 = 0.015;

const DEE_IDLE: Color32 = Color32::from_rgba_premultiplied(76, 78, 80, 102);
const DEE_POSITIVE: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);
const DEE_NEGATIVE: Color32 = Color32::from_rgb(0x34, 0x98, 0xdb);
const STATUS_POSITIVE: Color32 = Color32::from_rgb(0xc0, 0x39, 0x2b);
const STATUS_NEGATIVE: Color32 = Color32::from_rgb(0x29, 0x80, 0xb9);
const STATUS_BENDING: Color32 = Color32::from_rgb(0x2c, 0x3e, 0x50);
const FIELD_ARROW: Color32 = Color32::from_rgb(0xf1, 0xc4, 0x0f);
const SOURCE: Color32 = Color32::from_rgb(0xf3, 0x9c, 0x12);

pub fn launch(initial: SimulationParameters, preset: Option<PathBuf>) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_title("Cyclotron Simulator"),
        ..Default::default()
    };
    eframe::run_native(
        "Cyclotron Simulator",
        options,
        Box::new(move |cc| {
            let app: Box<dyn eframe::App> = Box::new(VizApp::new(initial, preset, cc));
            Ok(app)
        }),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
}

/// Visual cyclotron application
pub struct VizApp {
    engine: TrajectoryEngine,
    params: SimulationParameters,
    ticker: Ticker,
    frame: usize,
    preset_path: Option<PathBuf>,
    /// Preset change that arrived while running; applied on the next stop
    pending_preset: Option<SimulationParameters>,
    last_load_error: Option<String>,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl VizApp {
    pub fn new(
        params: SimulationParameters,
        preset_path: Option<PathBuf>,
        _cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let preset_path = preset_path.map(|p| std::fs::canonicalize(&p).unwrap_or(p));

        let (tx, rx) = mpsc::channel();
        let mut watcher = None;
        if let Some(path) = &preset_path {
            watcher = notify::recommended_watcher(move |res| {
                let _ = tx.send(res);
            })
            .ok();
            if let Some(w) = watcher.as_mut() {
                if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                    log::warn!("not watching {}: {}", path.display(), e);
                }
            }
        }

        Self {
            engine: TrajectoryEngine::new(),
            params,
            ticker: Ticker::default(),
            frame: 0,
            preset_path,
            pending_preset: None,
            last_load_error: None,
            file_watcher: watcher,
            file_receiver: rx,
        }
    }

    fn start(&mut self) {
        if self.engine.is_running() {
            return;
        }
        self.engine.begin(&self.params);
        self.ticker.start(Instant::now());
    }

    fn stop(&mut self) {
        self.engine.stop();
        self.ticker.cancel();
        if let Some(params) = self.pending_preset.take() {
            self.apply_parameters(params);
        }
    }

    fn reset(&mut self) {
        self.stop();
        self.engine.reset();
        self.frame = 0;
    }

    fn select_species(&mut self, species: &'static ParticleSpecies) {
        if species.name != self.params.species.name {
            self.params.species = species;
            self.reset();
        }
    }

    /// Take over parameters from a preset. A new species starts a new run.
    fn apply_parameters(&mut self, params: SimulationParameters) {
        let species_changed = params.species.name != self.params.species.name;
        self.params = params;
        if species_changed {
            self.engine.stop();
            self.ticker.cancel();
            self.engine.reset();
            self.frame = 0;
        }
    }

    fn check_file_changes(&mut self) {
        let mut changed = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_) | notify::EventKind::Create(_),
                    paths,
                    ..
                }) => {
                    if let Some(path) = &self.preset_path {
                        changed |= paths.contains(path);
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("file watcher error: {}", e);
                }
            }
        }

        if !changed {
            return;
        }
        let Some(path) = self.preset_path.clone() else {
            return;
        };
        match load_parameters(&path) {
            Ok(params) => {
                log::info!("reloaded {}", path.display());
                self.last_load_error = None;
                if self.engine.is_running() {
                    self.pending_preset = Some(params);
                } else {
                    self.apply_parameters(params);
                }
            }
            Err(e) => {
                self.last_load_error = Some(format!("{}", e));
            }
        }
    }

    fn tick(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if self.engine.is_running() && self.ticker.poll(now) {
            if advance(&mut self.engine, &self.params) == TickOutcome::Finished {
                self.stop();
            }
            self.frame = self.engine.history_len().saturating_sub(1);
        }
        if let Some(wait) = self.ticker.time_until_next(now) {
            ctx.request_repaint_after(wait);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let running = self.engine.is_running();

        ui.heading("Simulation parameters");
        ui.add_space(8.0);

        ui.add_enabled_ui(!running, |ui| {
            ui.label(egui::RichText::new("PARTICLE").strong());
            let mut selected = self.params.species;
            egui::ComboBox::from_id_source("species")
                .selected_text(selected.name)
                .show_ui(ui, |ui| {
                    for species in list_species() {
                        ui.selectable_value(&mut selected, species, species.name);
                    }
                });
            ui.label(egui::RichText::new(selected.description).weak());
            self.select_species(selected);

            ui.add_space(8.0);
            ui.label(egui::RichText::new("INITIAL SPEED [v0]").strong());
            ui.add(
                egui::Slider::new(&mut self.params.initial_speed_factor, SPEED_FACTOR_RANGE)
                    .suffix(" u"),
            );
        });

        ui.add_space(8.0);
        ui.label(egui::RichText::new("ANIMATION RATE (STEPS)").strong());
        ui.add(
            egui::Slider::new(&mut self.params.steps_per_tick, STEPS_PER_TICK_RANGE)
                .suffix(" st."),
        );

        ui.separator();

        ui.add_enabled_ui(!running, |ui| {
            ui.label(egui::RichText::new("MAGNETIC FIELD B").strong());
            ui.add(egui::Slider::new(&mut self.params.magnetic_field, MAGNETIC_FIELD_RANGE).suffix(" T"));
            ui.label(egui::RichText::new("ELECTRODE VOLTAGE V").strong());
            ui.add(
                egui::Slider::new(&mut self.params.accelerating_voltage, VOLTAGE_RANGE)
                    .step_by(1.0)
                    .suffix(" V"),
            );
        });

        ui.add_space(4.0);
        ui.label(format!(
            "f = {:.3} MHz",
            self.params.cyclotron_frequency() / 1e6
        ));

        ui.add_space(16.0);
        self.status_box(ui);
        ui.add_space(16.0);

        if ui.button("▶ Start").clicked() {
            self.start();
        }
        if ui.button("⏸ Stop").clicked() {
            self.stop();
        }
        if ui.button("⏮ Reset").clicked() {
            self.reset();
        }

        if let Some(ref error) = self.last_load_error {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(format!("Preset error: {}", error)).color(Color32::RED));
        }
    }

    fn displayed(&self) -> Option<StepRecord<'_>> {
        self.engine.replay(self.frame as isize).ok()
    }

    fn status_box(&self, ui: &mut egui::Ui) {
        let (text, fill) = match self.displayed().map(|r| r.phase()) {
            Some(Phase::Accelerating(direction)) => (
                Phase::Accelerating(direction).label(),
                if direction == GapDirection::Positive {
                    STATUS_POSITIVE
                } else {
                    STATUS_NEGATIVE
                },
            ),
            Some(Phase::Bending) => (Phase::Bending.label(), STATUS_BENDING),
            None => ("READY", STATUS_BENDING),
        };
        egui::Frame::none()
            .fill(fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(text).monospace().strong().color(Color32::WHITE));
                });
            });
    }

    fn playback(&mut self, ui: &mut egui::Ui) {
        let len = self.engine.history_len();
        let scrubbable = !self.engine.is_running() && len > 0;
        ui.horizontal(|ui| {
            ui.label("Frame by frame:");
            let max = len.saturating_sub(1);
            ui.add_enabled(
                scrubbable,
                egui::Slider::new(&mut self.frame, 0..=max).show_value(false),
            );
            ui.monospace(format!("Frame: {}", self.frame));
        });
    }

    fn canvas(&self, ui: &mut egui::Ui) {
        let rect = ui.max_rect();
        let painter = ui.painter();
        let view = View::new(rect);
        let record = self.displayed();
        let direction = record.map_or(GapDirection::Off, |r| r.gap_direction);

        let (left_fill, right_fill) = match direction {
            GapDirection::Positive => (DEE_POSITIVE, DEE_NEGATIVE),
            GapDirection::Negative => (DEE_NEGATIVE, DEE_POSITIVE),
            GapDirection::Off => (DEE_IDLE, DEE_IDLE),
        };
        painter.add(Shape::convex_polygon(dee_outline(&view, -1.0), left_fill, Stroke::NONE));
        painter.add(Shape::convex_polygon(dee_outline(&view, 1.0), right_fill, Stroke::NONE));

        painter.circle(
            view.to_screen(0.0, 0.0),
            view.length(SOURCE_RADIUS),
            SOURCE,
            Stroke::new(1.0, Color32::BLACK),
        );

        if direction != GapDirection::Off {
            let sign = direction.signum() as f32;
            let half = view.length(GAP_WIDTH) * 1.5;
            painter.arrow(
                view.to_screen(0.0, 0.0) - egui::vec2(sign * half, 0.0),
                egui::vec2(2.0 * sign * half, 0.0),
                Stroke::new(4.0, FIELD_ARROW),
            );
        }

        if let Some(record) = record {
            let [r, g, b] = self.params.species.rgb();
            let path: Vec<Pos2> = record.points().map(|p| view.to_screen(p.x, p.y)).collect();
            painter.add(Shape::line(path, Stroke::new(2.0, Color32::from_rgb(r, g, b))));
            painter.circle_filled(
                view.to_screen(record.position.x, record.position.y),
                4.0,
                Color32::BLACK,
            );
        } else {
            painter.circle_filled(view.to_screen(0.0, 0.0), 4.0, Color32::BLACK);
        }
    }
}

/// Maps world coordinates in m onto the canvas, y pointing up
struct View {
    center: Pos2,
    scale: f32,
}

impl View {
    fn new(rect: Rect) -> Self {
        let world_range = (2.0 * VIEW_EXTENT) as f32;
        Self {
            center: rect.center(),
            scale: (rect.width().min(rect.height()) / world_range) * 0.95,
        }
    }

    fn to_screen(&self, x: f64, y: f64) -> Pos2 {
        self.center + egui::vec2(x as f32 * self.scale, -(y as f32) * self.scale)
    }

    fn length(&self, meters: f64) -> f32 {
        meters as f32 * self.scale
    }
}

/// Half-disk of one dee; `side` is -1 for the left dee and +1 for the right
fn dee_outline(view: &View, side: f64) -> Vec<Pos2> {
    let inner = side * GAP_WIDTH / 2.0;
    let segments = 64;
    (0..=segments)
        .map(|i| {
            let t = -std::f64::consts::FRAC_PI_2 + std::f64::consts::PI * i as f64 / segments as f64;
            view.to_screen(inner + side * DEE_RADIUS * t.cos(), DEE_RADIUS * t.sin())
        })
        .collect()
}

impl eframe::App for VizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();
        self.tick(ctx);

        egui::SidePanel::right("controls")
            .min_width(280.0)
            .show(ctx, |ui| self.controls(ui));

        egui::TopBottomPanel::bottom("playback").show(ctx, |ui| self.playback(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.canvas(ui));
    }
}
