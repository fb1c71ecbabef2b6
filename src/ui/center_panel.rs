use eframe::egui;

use crate::engine::protocol::{EngineCommand, SessionView};
use crate::model::candidate_index::CandidateIndex;
use crate::model::game_kind::GameKind;
use crate::model::payload::{CastMember, FrameColorResult, MatchMovie};
use crate::model::reveal::{RevealData, RevealField, YearQuestion, CAST_MATCH_VISIBILITY};
use crate::model::session::{GameSession, SessionStatus};
use crate::model::suggestion_panel::{GuessField, PanelKey};
use super::app::TriviaApp;

pub fn draw_center_panel(ctx: &egui::Context, app: &mut TriviaApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let view = app.ui.view.clone();

        ui.horizontal(|ui| {
            ui.heading(view.kind.title());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("New game").clicked() {
                    app.start_game(view.kind);
                }
            });
        });
        ui.separator();

        if let Some(err) = &view.load_error {
            ui.colored_label(app.theme.error, err);
            if ui.button("Try again").clicked() {
                app.start_game(view.kind);
            }
            return;
        }

        let Some(session) = view.session.as_ref() else {
            draw_waiting(ui, app);
            return;
        };

        draw_round_status(ui, session);
        ui.add_space(6.0);

        egui::ScrollArea::vertical()
            .max_height((ui.available_height() - 140.0).max(120.0))
            .show(ui, |ui| {
                draw_reveal(ui, app, session);
            });

        ui.separator();
        draw_input(ui, app, &view, session);
    });
}

fn draw_waiting(ui: &mut egui::Ui, app: &TriviaApp) {
    match &app.ui.progress {
        Some((percent, message)) => {
            ui.label(message);
            ui.add(
                egui::ProgressBar::new(f32::from(*percent) / 100.0)
                    .show_percentage(),
            );
        }
        None => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading...");
            });
        }
    }
}

fn draw_round_status(ui: &mut egui::Ui, session: &GameSession) {
    let text = match session.status() {
        SessionStatus::InProgress => format!(
            "Round {} of {}",
            session.current_round() + 1,
            session.round_count()
        ),
        SessionStatus::Won => format!("Solved: {}", session.answer()),
        SessionStatus::Lost => format!("Out of rounds: {}", session.answer()),
        SessionStatus::Loading => "Loading...".to_string(),
    };
    ui.strong(text);

    if let Some(card) = session.answer_card() {
        ui.horizontal_wrapped(|ui| {
            if let Some(year) = card.year {
                ui.label(format!("Released in {year}"));
            }
            if let Some(url) = &card.poster {
                ui.hyperlink_to("Poster", url);
            }
        });
        if let Some(summary) = &card.summary {
            ui.weak(summary);
        }
    }
}

/* =========================
   Reveal
   ========================= */

fn draw_reveal(ui: &mut egui::Ui, app: &mut TriviaApp, session: &GameSession) {
    let shown = session.revealed_count();

    match session.reveal() {
        RevealData::Cast(cast) => {
            for member in cast.iter().take(shown) {
                cast_line(ui, member);
            }
        }

        RevealData::Quotes(quotes) => {
            for (i, quote) in quotes.iter().take(shown).enumerate() {
                let text = egui::RichText::new(quote);
                // newest block is the one being guessed on
                let text = if i + 1 == shown { text.strong() } else { text.weak() };
                ui.group(|ui| {
                    ui.label(text);
                });
            }
        }

        RevealData::Frames(frames) => {
            let base = app.ui.settings.server_url.trim_end_matches('/').to_string();
            for (i, frame) in frames.iter().take(shown).enumerate() {
                ui.hyperlink_to(format!("Frame {}", i + 1), format!("{base}{}", frame.url_path()));
            }
        }

        RevealData::Poster(poster) => {
            let step = poster.step(shown.saturating_sub(1));
            if let Some(url) = &poster.poster {
                ui.horizontal(|ui| {
                    ui.hyperlink_to("Poster", url);
                    if step.blur > 0 {
                        ui.weak(format!("(blur {}px)", step.blur));
                    }
                });
            }
            if let Some(tagline) = poster.tagline.as_ref().filter(|_| step.complete) {
                ui.label(egui::RichText::new(tagline).italics());
            }
            ui.label(step.summary);
        }

        RevealData::Movies(movies) => {
            let round = session.visibility_round();
            for movie in movies {
                ui.group(|ui| movie_card(ui, movie, round));
                ui.add_space(4.0);
            }
        }

        RevealData::Year(question) => year_card(ui, question),

        RevealData::FrameColor(result) => {
            draw_color_bar(ui, result, &mut app.ui.picked_sample);
            match &app.ui.picked_sample {
                Some((index, color)) => {
                    ui.label(format!(
                        "Sample {} of {} ({color}), every {} frames",
                        index + 1,
                        result.total_samples,
                        result.sample_rate
                    ));
                }
                None => {
                    ui.weak("Click the bar to inspect a sample");
                }
            }
        }
    }
}

fn cast_line(ui: &mut egui::Ui, member: &CastMember) {
    match &member.character {
        Some(character) => ui.label(format!("• {} as {}", member.name, character)),
        None => ui.label(format!("• {}", member.name)),
    };
}

fn movie_card(ui: &mut egui::Ui, movie: &MatchMovie, round: usize) {
    let visible = |field| CAST_MATCH_VISIBILITY.is_visible(field, round);

    if visible(RevealField::Year) {
        ui.strong(movie.display_title());
    } else if visible(RevealField::Title) {
        ui.strong(&movie.title);
    }
    if visible(RevealField::Poster) {
        if let Some(url) = &movie.poster {
            ui.hyperlink_to("Poster", url);
        }
    }
    if visible(RevealField::Director) {
        if let Some(director) = &movie.director {
            ui.label(format!("Director: {director}"));
        }
    }
    if visible(RevealField::Cast) && !movie.cast.is_empty() {
        let names: Vec<&str> = movie.cast.iter().map(|c| c.name.as_str()).collect();
        ui.label(format!("Cast: {}", names.join(", ")));
    }
    if visible(RevealField::Genres) && !movie.genres.is_empty() {
        ui.label(format!("Genres: {}", movie.genres.join(", ")));
    }
    if visible(RevealField::Rating) {
        if let Some(rating) = movie.display_rating() {
            ui.label(format!("Rating: {rating:.1}"));
        }
    }
    if visible(RevealField::Overview) {
        if let Some(overview) = &movie.overview {
            ui.weak(overview);
        }
    }
}

fn year_card(ui: &mut egui::Ui, question: &YearQuestion) {
    if let Some(url) = &question.poster {
        ui.hyperlink_to("Poster", url);
    }
    if let Some(tagline) = &question.tagline {
        ui.label(egui::RichText::new(tagline).italics());
    }
    if let Some(summary) = &question.summary {
        ui.label(summary);
    }
    for member in &question.cast {
        cast_line(ui, member);
    }
}

fn draw_color_bar(
    ui: &mut egui::Ui,
    result: &FrameColorResult,
    picked: &mut Option<(usize, String)>,
) {
    let size = egui::vec2(ui.available_width(), 80.0);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

    let count = result.frame_colors.len().max(1);
    let strip_width = rect.width() / count as f32;
    let painter = ui.painter();

    for (i, sample) in result.frame_colors.iter().enumerate() {
        let [r, g, b] = sample.rgb().unwrap_or([0, 0, 0]);
        let left = rect.left() + i as f32 * strip_width;
        let strip = egui::Rect::from_min_max(
            egui::pos2(left, rect.top()),
            egui::pos2(left + strip_width + 0.5, rect.bottom()),
        );
        painter.rect_filled(strip, 0.0, egui::Color32::from_rgb(r, g, b));
    }

    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            let fraction = (pos.x - rect.left()) / rect.width();
            if let Some((index, sample)) = result.sample_at(fraction) {
                *picked = Some((index, sample.color.clone()));
            }
        }
    }
}

/* =========================
   Input
   ========================= */

fn draw_input(ui: &mut egui::Ui, app: &mut TriviaApp, view: &SessionView, session: &GameSession) {
    if view.bonus.is_some() {
        draw_director_phase(ui, app, view);
        return;
    }

    if !session.accepts_input() {
        return;
    }

    match session.kind() {
        GameKind::Year => draw_year_input(ui, app),
        GameKind::FrameColor => draw_choices(ui, app, session),
        _ => {
            let hint = match session.kind() {
                GameKind::CastMatch => "Which actor links these movies?",
                _ => "Type a movie title...",
            };
            let submitted = {
                let ui_state = &mut app.ui;
                guess_input(ui, &mut ui_state.guess, &ui_state.candidates, "guess_input", hint)
            };
            if let Some(text) = submitted {
                app.send_command(EngineCommand::SubmitGuess(text));
            }
            if ui.button("Skip").clicked() {
                app.ui.guess.clear();
                app.send_command(EngineCommand::Skip);
            }
        }
    }
}

fn draw_year_input(ui: &mut egui::Ui, app: &mut TriviaApp) {
    let mut send = false;
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.ui.year_input)
                .hint_text("Release year")
                .desired_width(120.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
        }
        if ui.button("Submit").clicked() {
            send = true;
        }
    });

    if send {
        let text = app.ui.year_input.trim().to_string();
        // keep bad input around so it can be fixed
        if text.parse::<i32>().is_ok() {
            app.ui.year_input.clear();
        }
        app.send_command(EngineCommand::GuessYear(text));
    }
}

fn draw_choices(ui: &mut egui::Ui, app: &mut TriviaApp, session: &GameSession) {
    let RevealData::FrameColor(result) = session.reveal() else {
        return;
    };

    let mut picked = None;
    ui.horizontal_wrapped(|ui| {
        for (i, option) in result.options.iter().enumerate() {
            if ui.button(option).clicked() {
                picked = Some(i);
            }
        }
    });

    if let Some(index) = picked {
        app.send_command(EngineCommand::PickChoice(index));
    }
}

fn draw_director_phase(ui: &mut egui::Ui, app: &mut TriviaApp, view: &SessionView) {
    if !view.awaiting_director() {
        if let Some(bonus) = &view.bonus {
            if let Some(director) = bonus.director() {
                ui.label(format!("Directed by {director}"));
            }
        }
        return;
    }

    ui.strong("Bonus round: who directed it?");
    let submitted = {
        let ui_state = &mut app.ui;
        guess_input(
            ui,
            &mut ui_state.director_guess,
            &ui_state.directors,
            "director_input",
            "Type a director...",
        )
    };
    if let Some(text) = submitted {
        app.send_command(EngineCommand::GuessDirector(text));
    }
    if ui.button("Skip bonus").clicked() {
        app.ui.director_guess.clear();
        app.send_command(EngineCommand::SkipDirector);
    }
}

/// Text input with the autocomplete panel. Returns text to submit.
fn guess_input(
    ui: &mut egui::Ui,
    field: &mut GuessField,
    index: &CandidateIndex,
    id_source: &str,
    hint: &str,
) -> Option<String> {
    let input_id = egui::Id::new(id_source);
    let mut submitted = None;

    // arrows drive the panel, not the cursor
    let focused = ui.memory(|m| m.has_focus(input_id));
    if focused && field.panel.is_open() {
        if ui.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowDown)) {
            field.on_key(PanelKey::Down);
        }
        if ui.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::ArrowUp)) {
            field.on_key(PanelKey::Up);
        }
    }

    let response = ui
        .horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut field.text)
                    .id(input_id)
                    .hint_text(hint)
                    .desired_width(ui.available_width() - 80.0),
            );
            if ui.button("Guess").clicked() {
                submitted = Some(field.take_submission());
            }
            response
        })
        .inner;

    if response.changed() {
        field.on_edit(index);
    }

    if response.lost_focus() {
        if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submitted = field.on_key(PanelKey::Enter);
            if submitted.is_none() {
                // a suggestion was committed; keep typing
                ui.memory_mut(|m| m.request_focus(input_id));
            }
        } else if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            field.on_key(PanelKey::Escape);
        }
    }

    if field.panel.is_open() {
        let mut picked = None;
        let panel = egui::Frame::group(ui.style()).show(ui, |ui| {
            for (row, title) in field.panel.suggestions().iter().enumerate() {
                let highlighted = field.panel.highlighted() == Some(row);
                if ui.selectable_label(highlighted, title).clicked() {
                    picked = Some(row);
                }
            }
        });

        if let Some(row) = picked {
            field.pick(row);
            ui.memory_mut(|m| m.request_focus(input_id));
        } else {
            let clicked_outside = ui.input(|i| {
                i.pointer.any_pressed()
                    && i.pointer.press_origin().is_some_and(|p| {
                        !panel.response.rect.contains(p) && !response.rect.contains(p)
                    })
            });
            if clicked_outside {
                field.panel.close();
            }
        }
    }

    submitted
}
