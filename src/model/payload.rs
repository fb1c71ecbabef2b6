use serde::{Deserialize, Serialize};

/* =========================
   Shared reveal pieces
   ========================= */

/// One cast member. Older endpoints send bare names, newer ones send objects
/// with `profile` or `profile_path`; both decode into this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CastEntry")]
pub struct CastMember {
    pub name: String,
    pub profile_path: Option<String>,
    pub character: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CastEntry {
    Named {
        name: String,
        #[serde(default, alias = "profile")]
        profile_path: Option<String>,
        #[serde(default)]
        character: Option<String>,
    },
    Bare(String),
}

impl From<CastEntry> for CastMember {
    fn from(entry: CastEntry) -> Self {
        match entry {
            CastEntry::Named {
                name,
                profile_path,
                character,
            } => CastMember {
                name,
                profile_path,
                character,
            },
            CastEntry::Bare(name) => CastMember {
                name,
                profile_path: None,
                character: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameImage {
    pub filename: String,
}

impl FrameImage {
    pub fn url_path(&self) -> String {
        format!("/api/framed/frames/{}", self.filename)
    }
}

/// A movie card in the cast-match game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchMovie {
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl MatchMovie {
    /// Rating rounded to one decimal, as shown on the card.
    pub fn display_rating(&self) -> Option<f32> {
        self.rating.map(|r| (r * 10.0).round() / 10.0)
    }

    pub fn display_title(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameColorSample {
    pub color: String,
}

impl FrameColorSample {
    /// Parses `#rrggbb` or `rgb(r, g, b)`.
    pub fn rgb(&self) -> Option<[u8; 3]> {
        let c = self.color.trim();

        if let Some(hex) = c.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some([channel(0)?, channel(2)?, channel(4)?]);
        }

        let inner = c.strip_prefix("rgb(")?.strip_suffix(')')?;
        let mut parts = inner.split(',').map(|p| p.trim().parse::<u8>().ok());
        let rgb = [parts.next()??, parts.next()??, parts.next()??];
        if parts.next().is_some() {
            return None;
        }
        Some(rgb)
    }
}

/// Finished frame-colour analysis, either cached or delivered by polling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameColorResult {
    pub title: String,
    #[serde(default)]
    pub frame_colors: Vec<FrameColorSample>,
    #[serde(default)]
    pub total_samples: usize,
    #[serde(default)]
    pub sample_rate: u32,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl FrameColorResult {
    /// Sample under a horizontal position given as a 0..1 fraction of the bar.
    pub fn sample_at(&self, fraction: f32) -> Option<(usize, &FrameColorSample)> {
        if !(0.0..1.0).contains(&fraction) {
            return None;
        }
        let index = (fraction * self.frame_colors.len() as f32).floor() as usize;
        self.frame_colors.get(index).map(|s| (index, s))
    }
}

/* =========================
   Game payloads
   ========================= */

#[derive(Debug, Clone, Deserialize)]
pub struct CastPayload {
    #[serde(default, alias = "answer")]
    pub title: Option<String>,
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PosterPayload {
    #[serde(default, alias = "answer")]
    pub title: Option<String>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
}

/// Artwork block some endpoints attach; the path is a full image URL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbArt {
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuotePayload {
    #[serde(default, alias = "answer")]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub quotes: Vec<String>,
    #[serde(default)]
    pub total_rounds: Option<usize>,
    #[serde(default)]
    pub tmdb: Option<TmdbArt>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FramedPayload {
    #[serde(default, alias = "answer")]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub frames: Vec<FrameImage>,
    #[serde(default)]
    pub total_rounds: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMatchPayload {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub movies: Vec<MatchMovie>,
    #[serde(default)]
    pub total_rounds: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelinePayload {
    #[serde(default, alias = "answer")]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YearPayload {
    #[serde(default, alias = "answer")]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
}

/// Reply of `GET /api/trivia/frame`.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameStart {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub result: Option<FrameColorResult>,
    #[serde(default)]
    pub movie_title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Processing,
    Completed,
    Error,
}

/// Reply of `GET /api/trivia/frame/progress/<id>`.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameProgress {
    pub status: ProgressStatus,
    #[serde(default)]
    pub progress: f32,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<FrameColorResult>,
}

impl FrameProgress {
    pub fn percent(&self) -> u8 {
        self.progress.clamp(0.0, 100.0).round() as u8
    }
}

/* =========================
   Candidate listings
   ========================= */

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryListing {
    #[serde(default)]
    pub movies: Vec<String>,
    #[serde(default)]
    pub shows: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorListing {
    #[serde(default)]
    pub actors: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectorListing {
    #[serde(default)]
    pub directors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_accepts_bare_names_and_objects() {
        let payload: CastPayload = serde_json::from_str(
            r#"{"title":"Heat","cast":["Al Pacino",{"name":"Robert De Niro","profile":"http://img/dn.jpg"}]}"#,
        )
        .unwrap();

        assert_eq!(payload.cast[0].name, "Al Pacino");
        assert_eq!(payload.cast[0].profile_path, None);
        assert_eq!(payload.cast[1].profile_path.as_deref(), Some("http://img/dn.jpg"));
    }

    #[test]
    fn answer_is_an_alias_for_title() {
        let payload: QuotePayload =
            serde_json::from_str(r#"{"answer":"Heat","quotes":["a"]}"#).unwrap();
        assert_eq!(payload.title.as_deref(), Some("Heat"));
    }

    #[test]
    fn colour_parsing() {
        let hex = FrameColorSample { color: "#ff8000".into() };
        let rgb = FrameColorSample { color: "rgb(1, 2, 3)".into() };
        let bad = FrameColorSample { color: "rgb(1,2)".into() };
        assert_eq!(hex.rgb(), Some([255, 128, 0]));
        assert_eq!(rgb.rgb(), Some([1, 2, 3]));
        assert_eq!(bad.rgb(), None);
    }

    #[test]
    fn sample_lookup_by_position() {
        let result = FrameColorResult {
            title: "Heat".into(),
            frame_colors: ["#000000", "#111111", "#222222", "#333333"]
                .iter()
                .map(|c| FrameColorSample { color: c.to_string() })
                .collect(),
            total_samples: 4,
            sample_rate: 24,
            options: vec![],
            correct_answer: 0,
        };

        assert_eq!(result.sample_at(0.0).map(|(i, _)| i), Some(0));
        assert_eq!(result.sample_at(0.6).map(|(i, _)| i), Some(2));
        assert!(result.sample_at(1.0).is_none());
        assert!(result.sample_at(-0.1).is_none());
    }

    #[test]
    fn progress_percent_is_clamped() {
        let p: FrameProgress =
            serde_json::from_str(r#"{"status":"processing","progress":140.2}"#).unwrap();
        assert_eq!(p.percent(), 100);
        assert_eq!(p.status, ProgressStatus::Processing);
    }

    #[test]
    fn match_movie_rating_rounds() {
        let movie: MatchMovie =
            serde_json::from_str(r#"{"title":"Heat","year":1995,"rating":7.86}"#).unwrap();
        assert_eq!(movie.display_rating(), Some(7.9));
        assert_eq!(movie.display_title(), "Heat (1995)");
    }
}
