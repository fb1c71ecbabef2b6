use crate::model::candidate_index::CandidateIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKey {
    Down,
    Up,
    Enter,
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    None,
    /// Put this suggestion into the input field.
    Commit(String),
    /// Submit the current input as a guess.
    Submit,
}

/// Autocomplete dropdown state: the current suggestions and the highlighted row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionPanel {
    suggestions: Vec<String>,
    highlighted: Option<usize>,
}

impl SuggestionPanel {
    pub fn is_open(&self) -> bool {
        !self.suggestions.is_empty()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Re-filters after the input changed. Clears the highlight.
    pub fn update_query(&mut self, index: &CandidateIndex, query: &str) {
        self.suggestions = index.suggestions(query);
        self.highlighted = None;
    }

    pub fn close(&mut self) {
        self.suggestions.clear();
        self.highlighted = None;
    }

    pub fn handle_key(&mut self, key: PanelKey) -> PanelAction {
        match key {
            PanelKey::Down => {
                if let Some(last) = self.suggestions.len().checked_sub(1) {
                    self.highlighted = Some(self.highlighted.map_or(0, |i| (i + 1).min(last)));
                }
                PanelAction::None
            }
            PanelKey::Up => {
                self.highlighted = match self.highlighted {
                    Some(0) | None => None,
                    Some(i) => Some(i - 1),
                };
                PanelAction::None
            }
            PanelKey::Enter => match self.highlighted.and_then(|i| self.suggestions.get(i)) {
                Some(choice) => {
                    let choice = choice.clone();
                    self.close();
                    PanelAction::Commit(choice)
                }
                None => PanelAction::Submit,
            },
            PanelKey::Escape => {
                self.close();
                PanelAction::None
            }
        }
    }

    /// Mouse pick of a row.
    pub fn select(&mut self, row: usize) -> Option<String> {
        let choice = self.suggestions.get(row).cloned();
        if choice.is_some() {
            self.close();
        }
        choice
    }
}

/// A text input with its own suggestion panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessField {
    pub text: String,
    pub panel: SuggestionPanel,
}

impl GuessField {
    pub fn on_edit(&mut self, index: &CandidateIndex) {
        let query = self.text.clone();
        self.panel.update_query(index, &query);
    }

    /// Enter or Submit. Returns the text to submit, if any.
    pub fn on_key(&mut self, key: PanelKey) -> Option<String> {
        match self.panel.handle_key(key) {
            PanelAction::Commit(choice) => {
                self.text = choice;
                None
            }
            PanelAction::Submit => Some(self.take_submission()),
            PanelAction::None => None,
        }
    }

    pub fn pick(&mut self, row: usize) {
        if let Some(choice) = self.panel.select(row) {
            self.text = choice;
        }
    }

    /// Hands the input over for submission. Submitting always closes the panel
    /// and clears the field.
    pub fn take_submission(&mut self) -> String {
        self.panel.close();
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.panel.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_panel() -> SuggestionPanel {
        let index = CandidateIndex::new(["Alien", "Aliens", "Alias"]);
        let mut panel = SuggestionPanel::default();
        panel.update_query(&index, "ali");
        panel
    }

    #[test]
    fn arrows_clamp() {
        let mut panel = open_panel();
        panel.handle_key(PanelKey::Up);
        assert_eq!(panel.highlighted(), None);

        for _ in 0..5 {
            panel.handle_key(PanelKey::Down);
        }
        assert_eq!(panel.highlighted(), Some(2));

        panel.handle_key(PanelKey::Up);
        panel.handle_key(PanelKey::Up);
        assert_eq!(panel.highlighted(), Some(0));
        panel.handle_key(PanelKey::Up);
        assert_eq!(panel.highlighted(), None);
    }

    #[test]
    fn down_on_empty_panel_does_nothing() {
        let mut panel = SuggestionPanel::default();
        panel.handle_key(PanelKey::Down);
        assert_eq!(panel.highlighted(), None);
    }

    #[test]
    fn enter_commits_highlight_or_submits() {
        let mut panel = open_panel();
        assert_eq!(panel.handle_key(PanelKey::Enter), PanelAction::Submit);

        panel.handle_key(PanelKey::Down);
        panel.handle_key(PanelKey::Down);
        assert_eq!(
            panel.handle_key(PanelKey::Enter),
            PanelAction::Commit("Aliens".into())
        );
        assert!(!panel.is_open());
    }

    #[test]
    fn escape_closes_without_touching_input() {
        let index = CandidateIndex::new(["Alien"]);
        let mut field = GuessField {
            text: "ali".into(),
            ..Default::default()
        };
        field.on_edit(&index);
        assert!(field.panel.is_open());

        assert_eq!(field.on_key(PanelKey::Escape), None);
        assert!(!field.panel.is_open());
        assert_eq!(field.text, "ali");
    }

    #[test]
    fn new_query_resets_highlight() {
        let index = CandidateIndex::new(["Alien", "Aliens"]);
        let mut field = GuessField {
            text: "ali".into(),
            ..Default::default()
        };
        field.on_edit(&index);
        field.on_key(PanelKey::Down);
        assert_eq!(field.panel.highlighted(), Some(0));

        field.text = "alie".into();
        field.on_edit(&index);
        assert_eq!(field.panel.highlighted(), None);
    }

    #[test]
    fn submission_closes_panel_and_clears_text() {
        let index = CandidateIndex::new(["Alien"]);
        let mut field = GuessField {
            text: "ali".into(),
            ..Default::default()
        };
        field.on_edit(&index);

        assert_eq!(field.on_key(PanelKey::Enter), Some("ali".to_string()));
        assert!(field.text.is_empty());
        assert!(!field.panel.is_open());
    }

    #[test]
    fn mouse_pick_fills_text() {
        let index = CandidateIndex::new(["Alien", "Alias"]);
        let mut field = GuessField {
            text: "ali".into(),
            ..Default::default()
        };
        field.on_edit(&index);
        field.pick(1);
        assert_eq!(field.text, "Alias");
        assert!(!field.panel.is_open());
    }
}
