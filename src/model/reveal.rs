//! Per-game reveal data and the rules for how much of it a round discloses.
//!
//! Every schedule here is monotonic: anything visible at round N stays
//! visible at every later round.

use crate::model::payload::{CastMember, FrameColorResult, FrameImage, MatchMovie};

pub const POSTER_START_BLUR: u32 = 15;
pub const POSTER_BLUR_STEP: u32 = 3;
pub const POSTER_START_WORDS: usize = 3;
pub const POSTER_WORD_STEP: usize = 3;

pub const YEAR_CAST_LIMIT: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum RevealData {
    /// Cast reveal and timeline: one more cast member per round.
    Cast(Vec<CastMember>),
    Quotes(Vec<String>),
    Frames(Vec<FrameImage>),
    Poster(PosterReveal),
    /// Cast match: every card, gated field by field.
    Movies(Vec<MatchMovie>),
    Year(YearQuestion),
    FrameColor(FrameColorResult),
}

impl RevealData {
    /// Number of sequential units the data holds, for the prefix games.
    pub fn unit_count(&self) -> usize {
        match self {
            RevealData::Cast(cast) => cast.len(),
            RevealData::Quotes(quotes) => quotes.len(),
            RevealData::Frames(frames) => frames.len(),
            RevealData::Poster(poster) => poster.step_count(),
            RevealData::Movies(_) | RevealData::Year(_) | RevealData::FrameColor(_) => 1,
        }
    }

    /// How many units are disclosed at `round`. Round 0 shows the first one.
    pub fn revealed_at(&self, round: usize) -> usize {
        (round + 1).min(self.unit_count())
    }
}

/* =========================
   Poster
   ========================= */

#[derive(Debug, Clone, PartialEq)]
pub struct PosterReveal {
    pub poster: Option<String>,
    pub tagline: Option<String>,
    words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PosterStep {
    pub blur: u32,
    pub summary: String,
    pub complete: bool,
}

impl PosterReveal {
    pub fn new(poster: Option<String>, summary: &str, tagline: Option<String>) -> Self {
        Self {
            poster,
            tagline,
            words: summary.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn blur_at(step: usize) -> u32 {
        let drop = (step as u32).saturating_mul(POSTER_BLUR_STEP);
        POSTER_START_BLUR.saturating_sub(drop)
    }

    pub fn words_at(&self, step: usize) -> usize {
        (POSTER_START_WORDS + step * POSTER_WORD_STEP).min(self.words.len())
    }

    /// Steps until the poster is sharp and the whole summary is shown.
    pub fn step_count(&self) -> usize {
        let mut step = 0;
        while Self::blur_at(step) > 0 || self.words_at(step) < self.words.len() {
            step += 1;
        }
        step + 1
    }

    pub fn step(&self, step: usize) -> PosterStep {
        let shown = self.words_at(step);
        let mut summary = self.words[..shown].join(" ");
        let complete = shown >= self.words.len();
        if !complete {
            summary.push_str("...");
        }

        PosterStep {
            blur: Self::blur_at(step),
            summary,
            complete,
        }
    }
}

/* =========================
   Year
   ========================= */

#[derive(Debug, Clone, PartialEq)]
pub struct YearQuestion {
    pub year: i32,
    pub summary: Option<String>,
    pub cast: Vec<CastMember>,
    pub poster: Option<String>,
    pub tagline: Option<String>,
}

/* =========================
   Answer card
   ========================= */

/// Extra details about the answer, held back until the game is over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerCard {
    pub year: Option<i32>,
    pub poster: Option<String>,
    pub summary: Option<String>,
}

impl AnswerCard {
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.poster.is_none() && self.summary.is_none()
    }
}

/* =========================
   Field visibility (cast match)
   ========================= */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealField {
    Title,
    Year,
    Poster,
    Director,
    Cast,
    Genres,
    Rating,
    Overview,
}

/// Fixed "visible from round N" thresholds for one game.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityTable(&'static [(RevealField, usize)]);

pub const CAST_MATCH_VISIBILITY: VisibilityTable = VisibilityTable(&[
    (RevealField::Title, 0),
    (RevealField::Year, 0),
    (RevealField::Poster, 1),
    (RevealField::Director, 2),
    (RevealField::Cast, 3),
    (RevealField::Genres, 3),
    (RevealField::Rating, 3),
    (RevealField::Overview, 3),
]);

impl VisibilityTable {
    /// Round from which `field` shows, or `None` if this game never shows it.
    pub fn threshold(&self, field: RevealField) -> Option<usize> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, round)| *round)
    }

    pub fn is_visible(&self, field: RevealField, round: usize) -> bool {
        self.threshold(field).map_or(false, |t| round >= t)
    }

    pub fn visible_fields(&self, round: usize) -> Vec<RevealField> {
        self.0
            .iter()
            .filter(|(_, t)| round >= *t)
            .map(|(f, _)| *f)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cast(n: usize) -> Vec<CastMember> {
        (0..n)
            .map(|i| CastMember {
                name: format!("Actor {i}"),
                profile_path: None,
                character: None,
            })
            .collect()
    }

    #[test]
    fn prefix_reveal_caps_at_unit_count() {
        let data = RevealData::Cast(cast(3));
        assert_eq!(data.revealed_at(0), 1);
        assert_eq!(data.revealed_at(2), 3);
        assert_eq!(data.revealed_at(11), 3);
    }

    #[test]
    fn poster_steps_sharpen_and_lengthen() {
        let poster = PosterReveal::new(None, "one two three four five six seven", None);

        let first = poster.step(0);
        assert_eq!(first.blur, 15);
        assert_eq!(first.summary, "one two three...");

        let second = poster.step(1);
        assert_eq!(second.blur, 12);
        assert_eq!(second.summary, "one two three four five six...");

        // blur reaches 0 at step 5, words are exhausted at step 2
        assert_eq!(poster.step_count(), 6);
        let last = poster.step(5);
        assert_eq!(last.blur, 0);
        assert!(last.complete);
        assert_eq!(last.summary, "one two three four five six seven");
    }

    #[test]
    fn long_poster_summary_needs_more_steps() {
        let summary = vec!["w"; 30].join(" ");
        let poster = PosterReveal::new(None, &summary, None);
        // 3 + 3 * 9 = 30 words at step 9
        assert_eq!(poster.step_count(), 10);
    }

    #[test]
    fn visibility_is_monotonic() {
        let table = CAST_MATCH_VISIBILITY;
        for r1 in 0..6 {
            for r2 in r1..6 {
                for field in table.visible_fields(r1) {
                    assert!(table.is_visible(field, r2), "{:?} hidden again at {}", field, r2);
                }
            }
        }
    }

    #[test]
    fn poster_steps_never_go_backwards() {
        for words in [0, 1, 4, 7, 30, 61] {
            let summary = vec!["w"; words].join(" ");
            let poster = PosterReveal::new(Some("http://p".into()), &summary, None);
            let mut prev = poster.step(0);
            for step in 1..poster.step_count() + 3 {
                let next = poster.step(step);
                assert!(next.blur <= prev.blur, "blur grew at step {step}");
                assert!(
                    poster.words_at(step) >= poster.words_at(step - 1),
                    "summary shrank at step {step}"
                );
                assert!(!prev.complete || next.complete);
                prev = next;
            }
        }
    }

    #[test]
    fn every_schedule_only_reveals_more() {
        let schedules = [
            RevealData::Cast(cast(5)),
            RevealData::Quotes(vec!["a".into(), "b".into(), "c".into()]),
            RevealData::Frames(
                (0..6)
                    .map(|i| FrameImage {
                        filename: format!("f{i}.jpg"),
                    })
                    .collect(),
            ),
            RevealData::Poster(PosterReveal::new(None, "one two three four five six seven", None)),
            RevealData::Year(YearQuestion {
                year: 1995,
                summary: None,
                cast: cast(2),
                poster: None,
                tagline: None,
            }),
        ];

        for data in &schedules {
            for round in 1..20 {
                assert!(
                    data.revealed_at(round) >= data.revealed_at(round - 1),
                    "{:?} hid a unit at round {}",
                    data,
                    round
                );
                assert!(data.revealed_at(round) <= data.unit_count());
            }
        }
    }

    #[test]
    fn cast_match_thresholds() {
        let table = CAST_MATCH_VISIBILITY;
        assert_eq!(table.visible_fields(0), vec![RevealField::Title, RevealField::Year]);
        assert!(!table.is_visible(RevealField::Poster, 0));
        assert!(table.is_visible(RevealField::Poster, 1));
        assert!(table.is_visible(RevealField::Director, 2));
        assert!(!table.is_visible(RevealField::Overview, 2));
        assert_eq!(table.visible_fields(3).len(), 8);
    }
}
