//! Selection surfaces: decide which page title is active for a run cycle.

/// Chooses the active page from the ordered list of registered titles.
pub trait PageSelector {
    /// Return the chosen title, or `None` to take the first registered page.
    fn select(&mut self, titles: &[&str]) -> Option<String>;
}

/// Selection that persists across run cycles, like a sidebar radio list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    current: Option<String>,
    preferred: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on `title` when it is registered instead of the first page.
    pub fn with_preferred(title: Option<String>) -> Self {
        Self {
            current: None,
            preferred: title,
        }
    }

    /// Record a user choice for the next cycle.
    pub fn choose(&mut self, title: impl Into<String>) {
        self.current = Some(title.into());
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

impl PageSelector for SelectionState {
    fn select(&mut self, titles: &[&str]) -> Option<String> {
        let keep = self
            .current
            .as_deref()
            .is_some_and(|cur| titles.contains(&cur));

        if !keep {
            let preferred = self
                .preferred
                .as_deref()
                .filter(|p| titles.contains(p));
            self.current = preferred.or(titles.first().copied()).map(str::to_string);
        }

        self.current.clone()
    }
}

/// Always selects the same label, registered or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSelection(pub String);

impl PageSelector for FixedSelection {
    fn select(&mut self, _titles: &[&str]) -> Option<String> {
        Some(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_title() {
        let mut sel = SelectionState::new();
        assert_eq!(sel.select(&["X", "Y"]), Some("X".to_string()));
        assert_eq!(sel.current(), Some("X"));
    }

    #[test]
    fn persists_prior_choice() {
        let mut sel = SelectionState::new();
        sel.choose("Y");
        assert_eq!(sel.select(&["X", "Y"]), Some("Y".to_string()));
        assert_eq!(sel.select(&["X", "Y"]), Some("Y".to_string()));
    }

    #[test]
    fn vanished_choice_falls_back() {
        let mut sel = SelectionState::with_preferred(Some("Z".into()));
        sel.choose("gone");
        assert_eq!(sel.select(&["X", "Z"]), Some("Z".to_string()));

        let mut sel = SelectionState::with_preferred(Some("missing".into()));
        assert_eq!(sel.select(&["X", "Z"]), Some("X".to_string()));
    }

    #[test]
    fn empty_title_list_selects_nothing() {
        let mut sel = SelectionState::new();
        assert_eq!(sel.select(&[]), None);
    }

    #[test]
    fn fixed_selection_ignores_titles() {
        let mut sel = FixedSelection("Nope".into());
        assert_eq!(sel.select(&["X"]), Some("Nope".to_string()));
    }
}
