use eframe::egui;

use super::app::{bubble, TriviaApp};
use crate::engine::protocol::EngineCommand;
use crate::model::bonus_round::BonusStatus;

pub fn draw_right_panel(ctx: &egui::Context, app: &mut TriviaApp) {
    egui::SidePanel::right("right")
        .resizable(true)
        .default_width(300.0)
        .min_width(240.0)
        .show(ctx, |ui| {
            draw_score(ui, app);
            ui.separator();

            ui.collapsing("Server", |ui| draw_server(ui, app));
            ui.separator();

            ui.heading("Feedback");
            egui::ScrollArea::vertical()
                .stick_to_bottom(app.ui.should_auto_scroll)
                .show(ui, |ui| {
                    for msg in &app.ui.rendered_messages {
                        ui.add_space(4.0);
                        bubble(ui, app.theme.tone(msg.tone), &msg.text);
                    }
                });
        });
}

/* =========================
   Score
   ========================= */

fn draw_score(ui: &mut egui::Ui, app: &TriviaApp) {
    let view = &app.ui.view;
    ui.heading("Score");

    let Some(session) = &view.session else {
        ui.label("No game loaded");
        return;
    };

    ui.label(format!("Movie: {} points", session.score()));

    if let Some(bonus) = &view.bonus {
        let text = match bonus.status() {
            BonusStatus::Open => "Director: waiting for a guess".to_string(),
            BonusStatus::Unavailable => "Director: not available".to_string(),
            _ => format!("Director: {} points", bonus.score()),
        };
        ui.label(text);
    }

    ui.strong(format!("Total: {} points", view.total_score));

    if session.accepts_input() {
        ui.label(format!("{} attempts left", session.remaining()));
    }
}

/* =========================
   Server
   ========================= */

fn draw_server(ui: &mut egui::Ui, app: &mut TriviaApp) {
    ui.label("Server URL");
    ui.text_edit_singleline(&mut app.ui.server_url_draft);

    ui.horizontal(|ui| {
        if ui.button("Apply").clicked() {
            app.apply_server_url();
        }
        if ui.button("Test connection").clicked() {
            app.ui.connection_status = None;
            app.send_command(EngineCommand::CheckConnection);
        }
        if ui.button("Reload titles").clicked() {
            app.send_command(EngineCommand::LoadCandidates);
        }
    });

    if let Some((ok, message)) = &app.ui.connection_status {
        let color = if *ok { app.theme.success } else { app.theme.error };
        ui.colored_label(color, message);
    }

    if let Some(err) = &app.ui.ui_error {
        ui.colored_label(app.theme.error, err);
    }

    ui.label(format!(
        "{} titles, {} directors loaded",
        app.ui.candidates.len(),
        app.ui.directors.len()
    ));
}
