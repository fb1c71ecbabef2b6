use crate::engine::normalize::normalize_answer;
use crate::model::outcome::BonusOutcome;

pub const DIRECTOR_POINTS: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusStatus {
    Open,
    Correct,
    Missed,
    Skipped,
    /// The payload had no director, so there was nothing to guess.
    Unavailable,
}

/// The timeline game's one-shot director guess after the movie phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorBonus {
    director: Option<String>,
    status: BonusStatus,
    score: u32,
}

impl DirectorBonus {
    pub fn open(director: Option<String>) -> Self {
        let director = director.filter(|d| !d.trim().is_empty());
        let status = if director.is_some() {
            BonusStatus::Open
        } else {
            BonusStatus::Unavailable
        };

        Self {
            director,
            status,
            score: 0,
        }
    }

    pub fn director(&self) -> Option<&str> {
        self.director.as_deref()
    }

    pub fn status(&self) -> BonusStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_open(&self) -> bool {
        self.status == BonusStatus::Open
    }

    /// Empty input is ignored. Any other guess settles the bonus.
    pub fn guess(&mut self, raw: &str) -> BonusOutcome {
        if !self.is_open() {
            return BonusOutcome::Ignored;
        }
        let guess = raw.trim();
        if guess.is_empty() {
            return BonusOutcome::Ignored;
        }

        let Some(director) = self.director.as_deref() else {
            return BonusOutcome::Unavailable;
        };

        if guess.to_lowercase() == normalize_answer(director) {
            self.status = BonusStatus::Correct;
            self.score = DIRECTOR_POINTS;
            BonusOutcome::Correct {
                score: DIRECTOR_POINTS,
            }
        } else {
            self.status = BonusStatus::Missed;
            BonusOutcome::Missed
        }
    }

    pub fn skip(&mut self) -> BonusOutcome {
        if !self.is_open() {
            return BonusOutcome::Ignored;
        }
        self.status = BonusStatus::Skipped;
        BonusOutcome::Skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_director_scores() {
        let mut bonus = DirectorBonus::open(Some("Michael Mann".into()));
        assert_eq!(bonus.guess("michael mann"), BonusOutcome::Correct { score: 300 });
        assert_eq!(bonus.score(), 300);
        assert_eq!(bonus.guess("michael mann"), BonusOutcome::Ignored);
    }

    #[test]
    fn wrong_or_skipped_scores_zero() {
        let mut bonus = DirectorBonus::open(Some("Michael Mann".into()));
        assert_eq!(bonus.guess(""), BonusOutcome::Ignored);
        assert!(bonus.is_open());
        assert_eq!(bonus.guess("Ridley Scott"), BonusOutcome::Missed);
        assert_eq!(bonus.score(), 0);

        let mut skipped = DirectorBonus::open(Some("Michael Mann".into()));
        assert_eq!(skipped.skip(), BonusOutcome::Skipped);
        assert_eq!(skipped.status(), BonusStatus::Skipped);
    }

    #[test]
    fn missing_director_resolves_immediately() {
        let bonus = DirectorBonus::open(None);
        assert_eq!(bonus.status(), BonusStatus::Unavailable);
        assert!(!bonus.is_open());

        assert_eq!(DirectorBonus::open(Some("  ".into())).status(), BonusStatus::Unavailable);
    }
}
