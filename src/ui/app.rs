use eframe::egui;
use log::{error, warn};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::engine::api_client::HttpTriviaApi;
use crate::engine::controller::GuessRoundController;
use crate::engine::engine::Engine;
use crate::engine::protocol::{EngineCommand, EngineResponse, SessionView};
use crate::model::candidate_index::CandidateIndex;
use crate::model::game_kind::GameKind;
use crate::model::message::{Message, Tone};
use crate::model::suggestion_panel::GuessField;
use crate::ui::center_panel::draw_center_panel;
use crate::ui::left_panel::draw_left_panel;
use crate::ui::right_panel::draw_right_panel;
use crate::ui::settings::UiSettings;
use crate::ui::settings_io::{load_settings, save_settings};

/* =========================
   UI State
   ========================= */

#[derive(Default)]
pub struct UiState {
    pub settings: UiSettings,
    pub view: SessionView,
    pub rendered_messages: Vec<Message>,
    pub should_auto_scroll: bool,

    pub candidates: CandidateIndex,
    pub directors: CandidateIndex,
    pub guess: GuessField,
    pub director_guess: GuessField,
    pub year_input: String,

    pub progress: Option<(u8, String)>,
    pub picked_sample: Option<(usize, String)>,

    pub server_url_draft: String,
    pub connection_status: Option<(bool, String)>,
    pub ui_error: Option<String>,
}

impl UiState {
    /// Input widgets start empty for every new game.
    fn reset_inputs(&mut self) {
        self.guess.clear();
        self.director_guess.clear();
        self.year_input.clear();
        self.picked_sample = None;
    }
}

/* =========================
   Theme
   ========================= */

#[derive(Clone)]
pub struct Theme {
    pub success: egui::Color32,
    pub error: egui::Color32,
    pub neutral: egui::Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            success: egui::Color32::from_rgb(40, 110, 60),
            error: egui::Color32::from_rgb(140, 50, 50),
            neutral: egui::Color32::from_rgb(80, 80, 80),
        }
    }
}

impl Theme {
    pub fn tone(&self, tone: Tone) -> egui::Color32 {
        match tone {
            Tone::Success => self.success,
            Tone::Error => self.error,
            Tone::Neutral => self.neutral,
        }
    }
}

/* =========================
   App
   ========================= */

pub struct TriviaApp {
    pub ui: UiState,
    pub theme: Theme,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
    engine_thread: Option<JoinHandle<()>>,
}

impl TriviaApp {
    pub fn new() -> Self {
        let settings = load_settings();
        let (cmd_tx, resp_rx, engine_thread) = spawn_engine(&settings);

        let app = Self {
            ui: UiState {
                server_url_draft: settings.server_url.clone(),
                settings,
                ..Default::default()
            },
            theme: Theme::default(),
            cmd_tx,
            resp_rx,
            engine_thread: Some(engine_thread),
        };

        app.send_command(EngineCommand::NewGame(GameKind::default()));
        app
    }

    pub fn send_command(&self, cmd: EngineCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            error!("engine thread is gone");
        }
    }

    pub fn start_game(&mut self, kind: GameKind) {
        self.ui.reset_inputs();
        self.ui.progress = None;
        self.ui.view = SessionView {
            kind,
            ..Default::default()
        };
        self.send_command(EngineCommand::NewGame(kind));
    }

    /// Points the engine at a new server. The old engine thread, and any
    /// polling it was doing, is shut down first.
    pub fn apply_server_url(&mut self) {
        let url = self.ui.server_url_draft.trim().to_string();
        if url.is_empty() {
            self.ui.ui_error = Some("Server URL cannot be empty".to_string());
            return;
        }

        self.ui.settings.server_url = url;
        self.ui.ui_error = None;
        self.ui.connection_status = None;
        save_settings(&self.ui.settings);

        self.stop_engine();
        let (cmd_tx, resp_rx, engine_thread) = spawn_engine(&self.ui.settings);
        self.cmd_tx = cmd_tx;
        self.resp_rx = resp_rx;
        self.engine_thread = Some(engine_thread);

        self.ui.candidates = CandidateIndex::empty();
        self.ui.directors = CandidateIndex::empty();
        let kind = self.ui.view.kind;
        self.start_game(kind);
    }

    pub fn persist_settings(&self) {
        save_settings(&self.ui.settings);
    }

    fn stop_engine(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        if let Some(handle) = self.engine_thread.take() {
            if handle.join().is_err() {
                warn!("engine thread panicked");
            }
        }
    }

    fn drain_responses(&mut self) {
        while let Ok(resp) = self.resp_rx.try_recv() {
            match resp {
                EngineResponse::Candidates { titles, directors } => {
                    self.ui.candidates = titles;
                    self.ui.directors = directors;
                }
                EngineResponse::SessionUpdated(view) => {
                    if view.session.is_some() || !view.polling {
                        self.ui.progress = None;
                    }
                    self.ui.view = view;
                }
                EngineResponse::Progress { percent, message } => {
                    self.ui.progress = Some((percent, message));
                }
                EngineResponse::FullMessageHistory(msgs) => {
                    self.ui.rendered_messages = msgs;
                    self.ui.should_auto_scroll = true;
                }
                EngineResponse::ConnectionChecked { ok, message } => {
                    self.ui.connection_status = Some((ok, message));
                }
                EngineResponse::Failed(reason) => {
                    self.ui.progress = None;
                    self.ui.ui_error = Some(reason);
                }
            }
        }
    }
}

impl Default for TriviaApp {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TriviaApp {
    fn drop(&mut self) {
        self.persist_settings();
        self.stop_engine();
    }
}

fn spawn_engine(
    settings: &UiSettings,
) -> (
    mpsc::Sender<EngineCommand>,
    mpsc::Receiver<EngineResponse>,
    JoinHandle<()>,
) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let url = settings.server_url.clone();
    let interval = settings.poll_interval();

    let handle = std::thread::spawn(move || match HttpTriviaApi::new(&url) {
        Ok(api) => {
            let controller = GuessRoundController::new(api).with_poll_interval(interval);
            let mut engine = Engine::new(cmd_rx, resp_tx, controller);
            engine.run();
        }
        Err(e) => {
            error!("could not build HTTP client: {}", e);
            let _ = resp_tx.send(EngineResponse::Failed(e.to_string()));
        }
    });

    (cmd_tx, resp_rx, handle)
}

/* =========================
   egui App
   ========================= */

impl eframe::App for TriviaApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.ui.settings.clamped_scale());
        ctx.set_visuals(if self.ui.settings.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        self.drain_responses();

        draw_left_panel(ctx, self);
        draw_right_panel(ctx, self);
        draw_center_panel(ctx, self);

        self.ui.should_auto_scroll = false;

        // responses arrive from another thread
        ctx.request_repaint_after(Duration::from_millis(150));
    }
}

/* =========================
   UI Helpers
   ========================= */

pub fn bubble(ui: &mut egui::Ui, color: egui::Color32, text: &str) {
    egui::Frame::new()
        .fill(color)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
        });
}
