use eframe::egui;

use crate::model::game_kind::GameKind;
use crate::ui::app::TriviaApp;

pub fn draw_left_panel(ctx: &egui::Context, app: &mut TriviaApp) {
    if app.ui.settings.sidebar_collapsed {
        egui::SidePanel::left("left_collapsed")
            .resizable(false)
            .exact_width(32.0)
            .show(ctx, |ui| {
                if ui.small_button("»").on_hover_text("Show games").clicked() {
                    app.ui.settings.sidebar_collapsed = false;
                    app.persist_settings();
                }
            });
        return;
    }

    egui::SidePanel::left("left")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Games");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("«").on_hover_text("Hide").clicked() {
                        app.ui.settings.sidebar_collapsed = true;
                        app.persist_settings();
                    }
                });
            });

            ui.separator();

            let current = app.ui.view.kind;
            let mut chosen: Option<GameKind> = None;

            for kind in GameKind::ALL {
                if ui.selectable_label(kind == current, kind.title()).clicked() {
                    chosen = Some(kind);
                }
            }

            ui.add_space(6.0);
            if ui.button("🎲 Surprise me").clicked() {
                chosen = Some(GameKind::random());
            }

            if let Some(kind) = chosen {
                app.start_game(kind);
            }

            ui.separator();
            draw_layout_controls(ui, app);
        });
}

/* =========================
   Layout
   ========================= */

fn draw_layout_controls(ui: &mut egui::Ui, app: &mut TriviaApp) {
    let settings = &mut app.ui.settings;
    let mut changed = false;

    changed |= ui.checkbox(&mut settings.dark_mode, "Dark mode").changed();

    ui.label("UI Scale");
    changed |= ui
        .add(egui::Slider::new(&mut settings.ui_scale, 0.75..=2.0))
        .drag_stopped();

    if changed {
        app.persist_settings();
    }
}
