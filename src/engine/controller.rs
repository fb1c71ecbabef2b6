use std::time::Duration;

use log::{error, info, warn};

use crate::engine::api_client::{fetch, TriviaApi};
use crate::engine::apply_guess;
use crate::engine::error::{TriviaError, TriviaResult};
use crate::engine::frame_poller::{FramePoller, PollEvent, DEFAULT_POLL_INTERVAL};
use crate::engine::load_game::{frame_color_session, load_game, LoadedGame};
use crate::model::bonus_round::DirectorBonus;
use crate::model::candidate_index::CandidateIndex;
use crate::model::game_kind::{CandidateSource, GameKind};
use crate::model::outcome::{BonusOutcome, RoundOutcome};
use crate::model::payload::{ActorListing, DirectorListing, LibraryListing};
use crate::model::session::{GameSession, SessionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Ready,
    /// Waiting on server-side processing; progress arrives through polling.
    Processing,
}

/// Drives one game at a time: loads it, routes guesses into the session and
/// keeps the candidate lists for autocomplete.
pub struct GuessRoundController<A> {
    api: A,
    kind: GameKind,
    candidates: CandidateIndex,
    directors: CandidateIndex,
    loaded_for: Option<GameKind>,
    session: Option<GameSession>,
    bonus: Option<DirectorBonus>,
    pending_director: Option<String>,
    poller: Option<FramePoller>,
    poll_interval: Duration,
    load_error: Option<String>,
}

impl<A> GuessRoundController<A>
where
    A: TriviaApi + Clone + Send + 'static,
{
    pub fn new(api: A) -> Self {
        Self {
            api,
            kind: GameKind::default(),
            candidates: CandidateIndex::empty(),
            directors: CandidateIndex::empty(),
            loaded_for: None,
            session: None,
            bonus: None,
            pending_director: None,
            poller: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            load_error: None,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn bonus(&self) -> Option<&DirectorBonus> {
        self.bonus.as_ref()
    }

    pub fn candidates(&self) -> &CandidateIndex {
        &self.candidates
    }

    pub fn directors(&self) -> &CandidateIndex {
        &self.directors
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_some()
    }

    /// `Loading` until a session exists.
    pub fn status(&self) -> SessionStatus {
        self.session
            .as_ref()
            .map_or(SessionStatus::Loading, GameSession::status)
    }

    pub fn total_score(&self) -> u32 {
        let movie = self.session.as_ref().map_or(0, GameSession::score);
        let bonus = self.bonus.as_ref().map_or(0, DirectorBonus::score);
        movie + bonus
    }

    /// Loads suggestion lists for the current game. Failures leave the lists
    /// empty; they never affect answer checking.
    pub fn load_candidates(&mut self) -> &CandidateIndex {
        let source = self.kind.config().candidates;
        self.candidates = match load_candidate_source(&self.api, source) {
            Ok(index) => index,
            Err(e) => {
                warn!("could not load suggestions for {:?}: {}", self.kind, e);
                CandidateIndex::empty()
            }
        };

        self.directors = if self.kind == GameKind::Timeline {
            fetch::<DirectorListing, _>(&self.api, "/api/directors")
                .map(|l| CandidateIndex::new(l.directors))
                .unwrap_or_else(|e| {
                    warn!("could not load directors: {}", e);
                    CandidateIndex::empty()
                })
        } else {
            CandidateIndex::empty()
        };

        self.loaded_for = Some(self.kind);
        &self.candidates
    }

    /// Loads suggestion lists unless the current game's lists are already in.
    pub fn ensure_candidates(&mut self) -> bool {
        let wants = |k: GameKind| (k.config().candidates, k == GameKind::Timeline);
        if self.loaded_for.map(wants) == Some(wants(self.kind)) {
            return false;
        }
        self.load_candidates();
        true
    }

    /// Throws away the current game and loads a new one of `kind`.
    pub fn start_session(&mut self, kind: GameKind) -> TriviaResult<StartOutcome> {
        self.cancel_polling();
        self.kind = kind;
        self.session = None;
        self.bonus = None;
        self.pending_director = None;
        self.load_error = None;

        let loaded = match load_game(&self.api, kind) {
            Ok(loaded) => loaded,
            Err(e) => {
                error!("could not start {:?}: {}", kind, e);
                self.load_error = Some(e.to_string());
                return Err(e);
            }
        };

        match loaded {
            LoadedGame::Ready { session, director } => {
                info!("{:?} started with {} rounds", kind, session.round_count());
                self.session = Some(session);
                self.pending_director = director;
                Ok(StartOutcome::Ready)
            }
            LoadedGame::Processing { session_id } => {
                info!("{:?} waiting on server session {}", kind, session_id);
                self.poller = Some(FramePoller::spawn(
                    self.api.clone(),
                    session_id,
                    self.poll_interval,
                ));
                Ok(StartOutcome::Processing)
            }
        }
    }

    pub fn submit_guess(&mut self, raw: &str) -> RoundOutcome {
        let Some(session) = self.session.as_mut() else {
            return RoundOutcome::Ignored;
        };
        let outcome = apply_guess::submit_guess(session, raw);
        self.after_round(&outcome);
        outcome
    }

    pub fn skip(&mut self) -> RoundOutcome {
        let Some(session) = self.session.as_mut() else {
            return RoundOutcome::Ignored;
        };
        let outcome = apply_guess::skip(session);
        self.after_round(&outcome);
        outcome
    }

    pub fn guess_year(&mut self, raw: &str) -> TriviaResult<RoundOutcome> {
        match self.session.as_mut() {
            Some(session) => apply_guess::guess_year(session, raw),
            None => Ok(RoundOutcome::Ignored),
        }
    }

    pub fn pick_choice(&mut self, index: usize) -> TriviaResult<RoundOutcome> {
        match self.session.as_mut() {
            Some(session) => apply_guess::pick_choice(session, index),
            None => Ok(RoundOutcome::Ignored),
        }
    }

    pub fn guess_director(&mut self, raw: &str) -> BonusOutcome {
        self.bonus
            .as_mut()
            .map_or(BonusOutcome::Ignored, |b| b.guess(raw))
    }

    pub fn skip_director(&mut self) -> BonusOutcome {
        self.bonus
            .as_mut()
            .map_or(BonusOutcome::Ignored, DirectorBonus::skip)
    }

    /// Applies any poll events that arrived since the last call. A completed
    /// job becomes the session; a failed one ends polling with an error.
    pub fn pump_poller(&mut self) -> Vec<PollEvent> {
        let mut seen = Vec::new();
        let Some(poller) = self.poller.as_ref() else {
            return seen;
        };

        while let Some(event) = poller.try_next() {
            let terminal = event.is_terminal();
            seen.push(event);
            if terminal {
                break;
            }
        }

        if let Some(last) = seen.last().filter(|e| e.is_terminal()).cloned() {
            self.poller = None;
            self.finish_polling(last);
        }

        seen
    }

    /// Like `pump_poller` but waits up to `timeout` for the first event.
    pub fn wait_poller(&mut self, timeout: Duration) -> Option<PollEvent> {
        let event = self.poller.as_ref()?.next_timeout(timeout)?;
        if event.is_terminal() {
            self.poller = None;
            self.finish_polling(event.clone());
        }
        Some(event)
    }

    /// Stops any running poll loop and asks the server to drop the work.
    pub fn cancel_polling(&mut self) {
        if let Some(mut poller) = self.poller.take() {
            poller.cancel();
        }
    }

    pub fn shutdown(&mut self) {
        self.cancel_polling();
    }

    fn finish_polling(&mut self, event: PollEvent) {
        match event {
            PollEvent::Completed(result) => {
                match frame_color_session(&self.kind.config(), result) {
                    Ok(session) => {
                        info!("frame colours ready for {:?}", self.kind);
                        self.session = Some(session);
                    }
                    Err(e) => {
                        error!("frame result unusable: {}", e);
                        self.load_error = Some(e.to_string());
                    }
                }
            }
            PollEvent::Failed(message) => {
                error!("frame processing failed: {}", message);
                self.load_error = Some(TriviaError::PollFailed(message).to_string());
            }
            PollEvent::Progress { .. } => {}
        }
    }

    fn after_round(&mut self, outcome: &RoundOutcome) {
        if self.kind == GameKind::Timeline && outcome.ends_session() && self.bonus.is_none() {
            self.bonus = Some(DirectorBonus::open(self.pending_director.take()));
        }
    }
}

fn load_candidate_source<A: TriviaApi + ?Sized>(
    api: &A,
    source: CandidateSource,
) -> TriviaResult<CandidateIndex> {
    let index = match source {
        CandidateSource::Library => {
            let library: LibraryListing = fetch(api, "/api/library")?;
            CandidateIndex::new(library.movies.into_iter().chain(library.shows))
        }
        CandidateSource::LibraryMovies => {
            let library: LibraryListing = fetch(api, "/api/library")?;
            CandidateIndex::new(library.movies)
        }
        CandidateSource::Actors => {
            let actors: ActorListing = fetch(api, "/api/actors")?;
            CandidateIndex::new(actors.actors)
        }
        CandidateSource::None => CandidateIndex::empty(),
    };
    Ok(index)
}
