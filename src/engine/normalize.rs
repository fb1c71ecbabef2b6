//! Guess normalization shared by every title-guessing game.

/// Lower-cases and trims a raw guess, then drops a trailing `" (YYYY)"`
/// suffix so that "Heat (1995)" picked from the suggestion list matches "Heat".
pub fn normalize_guess(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    strip_year_suffix(&lowered).trim_end().to_string()
}

pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Exact equality after normalization. No fuzzy matching.
pub fn titles_match(guess: &str, answer: &str) -> bool {
    let guess = normalize_guess(guess);
    !guess.is_empty() && guess == normalize_answer(answer)
}

fn strip_year_suffix(s: &str) -> &str {
    let bytes = s.as_bytes();
    if bytes.len() < 6 {
        return s;
    }

    let tail = &bytes[bytes.len() - 6..];
    let is_year = tail[0] == b'('
        && tail[5] == b')'
        && tail[1..5].iter().all(|b| b.is_ascii_digit());

    if is_year {
        // the six tail bytes are ASCII, so this is a char boundary
        &s[..s.len() - 6]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_year_suffix_and_case() {
        assert_eq!(normalize_guess("  Heat (1995) "), "heat");
        assert_eq!(normalize_guess("HEAT(1995)"), "heat");
    }

    #[test]
    fn keeps_non_year_parentheses() {
        assert_eq!(normalize_guess("Alien (Director's Cut)"), "alien (director's cut)");
        assert_eq!(normalize_guess("Leon (19x5)"), "leon (19x5)");
        assert_eq!(normalize_guess("(1995)"), "");
    }

    #[test]
    fn only_the_trailing_year_is_removed() {
        assert_eq!(normalize_guess("1917 (2019)"), "1917");
        assert_eq!(normalize_guess("Blade Runner (1982) (2007)"), "blade runner (1982)");
    }

    #[test]
    fn matching_is_exact_after_normalization() {
        assert!(titles_match("heat (1995)", "Heat"));
        assert!(titles_match("The Matrix", "the matrix"));
        assert!(!titles_match("Matrix", "The Matrix"));
        assert!(!titles_match("", "Heat"));
    }

    #[test]
    fn unicode_titles_lowercase() {
        assert!(titles_match("AMÉLIE (2001)", "Amélie"));
    }
}
