use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use log::{debug, info};

use crate::engine::api_client::{check_connection, TriviaApi};
use crate::engine::controller::{GuessRoundController, StartOutcome};
use crate::engine::error::TriviaResult;
use crate::engine::frame_poller::PollEvent;
use crate::engine::protocol::{EngineCommand, EngineResponse, SessionView};
use crate::model::bonus_round::{BonusStatus, DIRECTOR_POINTS};
use crate::model::message::Message;
use crate::model::outcome::{BonusOutcome, RoundOutcome};

/// How often the loop wakes up to forward poll events when no command arrives.
const TICK: Duration = Duration::from_millis(100);
const MAX_HISTORY: usize = 100;

pub struct Engine<A> {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    messages: Vec<Message>,
    pending_note: Option<Message>,
    controller: GuessRoundController<A>,
}

impl<A> Engine<A>
where
    A: TriviaApi + Clone + Send + 'static,
{
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        controller: GuessRoundController<A>,
    ) -> Self {
        Self {
            rx,
            tx,
            messages: Vec::new(),
            pending_note: None,
            controller,
        }
    }

    pub fn controller(&self) -> &GuessRoundController<A> {
        &self.controller
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Runs until `Shutdown` arrives or the UI side hangs up.
    pub fn run(&mut self) {
        loop {
            match self.rx.recv_timeout(TICK) {
                Ok(EngineCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Ok(cmd) => self.handle(cmd),
                Err(RecvTimeoutError::Timeout) => {}
            }
            self.forward_poll_events();
        }

        info!("engine shutting down");
        self.controller.shutdown();
    }

    pub fn handle(&mut self, cmd: EngineCommand) {
        match cmd {
            EngineCommand::LoadCandidates => {
                self.controller.load_candidates();
                self.send_candidates();
            }

            EngineCommand::NewGame(kind) => {
                match self.controller.start_session(kind) {
                    Ok(StartOutcome::Ready) => {}
                    Ok(StartOutcome::Processing) => {
                        self.push(Message::neutral("Analyzing movie frames..."));
                    }
                    Err(e) => {
                        self.push(Message::error(e.to_string()));
                        let _ = self.tx.send(EngineResponse::Failed(e.to_string()));
                    }
                }
                if self.controller.ensure_candidates() {
                    self.send_candidates();
                }
                self.publish();
            }

            EngineCommand::SubmitGuess(text) => {
                let outcome = self.with_bonus_watch(|c| c.submit_guess(&text));
                self.report_round(&outcome);
            }

            EngineCommand::Skip => {
                let outcome = self.with_bonus_watch(|c| c.skip());
                self.report_round(&outcome);
            }

            EngineCommand::GuessYear(text) => {
                let result = self.controller.guess_year(&text);
                self.report_checked(result);
            }

            EngineCommand::PickChoice(index) => {
                let result = self.controller.pick_choice(index);
                self.report_checked(result);
            }

            EngineCommand::GuessDirector(text) => {
                let outcome = self.controller.guess_director(&text);
                self.report_bonus(&outcome);
            }

            EngineCommand::SkipDirector => {
                let outcome = self.controller.skip_director();
                self.report_bonus(&outcome);
            }

            EngineCommand::CheckConnection => {
                let (ok, message) = match check_connection(self.controller.api()) {
                    Ok(message) => (true, message),
                    Err(e) => (false, format!("Connection failed: {e}")),
                };
                let _ = self.tx.send(EngineResponse::ConnectionChecked { ok, message });
            }

            EngineCommand::Shutdown => self.controller.shutdown(),
        }
    }

    /// Sends any poll events the controller picked up since the last tick.
    pub fn forward_poll_events(&mut self) {
        let events = self.controller.pump_poller();
        if events.is_empty() {
            return;
        }

        for event in events {
            match event {
                PollEvent::Progress { percent, message } => {
                    debug!("frame progress {}%: {}", percent, message);
                    let _ = self.tx.send(EngineResponse::Progress { percent, message });
                }
                PollEvent::Completed(_) => match self.controller.load_error() {
                    Some(err) => {
                        let err = err.to_string();
                        self.push(Message::error(err.clone()));
                        let _ = self.tx.send(EngineResponse::Failed(err));
                    }
                    None => self.push(Message::neutral("Which movie are these colours from?")),
                },
                PollEvent::Failed(reason) => {
                    self.push(Message::error(reason.clone()));
                    let _ = self.tx.send(EngineResponse::Failed(reason));
                }
            }
        }

        self.publish();
    }

    /* =========================
       Reporting
       ========================= */

    fn with_bonus_watch<F>(&mut self, f: F) -> RoundOutcome
    where
        F: FnOnce(&mut GuessRoundController<A>) -> RoundOutcome,
    {
        let had_bonus = self.controller.bonus().is_some();
        let outcome = f(&mut self.controller);

        // the director phase opens as the movie phase ends
        if !had_bonus {
            if let Some(bonus) = self.controller.bonus() {
                let note = match bonus.status() {
                    BonusStatus::Unavailable => Message::for_bonus(&BonusOutcome::Unavailable, None),
                    _ => Some(Message::neutral(format!(
                        "Bonus round: who directed it? (+{DIRECTOR_POINTS} points)"
                    ))),
                };
                self.pending_note = note;
            }
        }
        outcome
    }

    fn report_round(&mut self, outcome: &RoundOutcome) {
        if let Some(session) = self.controller.session() {
            if let Some(msg) = Message::for_outcome(outcome, session) {
                self.push(msg);
            }
        }
        if let Some(note) = self.pending_note.take() {
            self.push(note);
        }
        self.publish();
    }

    fn report_checked(&mut self, result: TriviaResult<RoundOutcome>) {
        match result {
            Ok(outcome) => self.report_round(&outcome),
            Err(e) => {
                debug!("rejected input: {}", e);
                self.push(Message::error(e.to_string()));
                self.publish();
            }
        }
    }

    fn report_bonus(&mut self, outcome: &BonusOutcome) {
        let director = self.controller.bonus().and_then(|b| b.director());
        if let Some(msg) = Message::for_bonus(outcome, director) {
            self.push(msg);
        }
        if let BonusOutcome::Correct { .. } | BonusOutcome::Missed | BonusOutcome::Skipped = outcome {
            self.push(Message::neutral(format!(
                "Total score: {} points",
                self.controller.total_score()
            )));
        }
        self.publish();
    }

    fn push(&mut self, msg: Message) {
        self.messages.push(msg);
        if self.messages.len() > MAX_HISTORY {
            let excess = self.messages.len() - MAX_HISTORY;
            self.messages.drain(..excess);
        }
    }

    fn send_candidates(&self) {
        let _ = self.tx.send(EngineResponse::Candidates {
            titles: self.controller.candidates().clone(),
            directors: self.controller.directors().clone(),
        });
    }

    /// Sends the current session and the feedback history.
    fn publish(&self) {
        let c = &self.controller;
        let view = SessionView {
            kind: c.kind(),
            session: c.session().cloned(),
            bonus: c.bonus().cloned(),
            status: c.status(),
            total_score: c.total_score(),
            polling: c.is_polling(),
            load_error: c.load_error().map(str::to_string),
        };

        let _ = self.tx.send(EngineResponse::SessionUpdated(view));
        let _ = self
            .tx
            .send(EngineResponse::FullMessageHistory(self.messages.clone()));
    }
}
