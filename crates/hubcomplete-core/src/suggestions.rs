use crate::suggestion::Suggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Collapsed,
    Expanded,
}

/// Keys the suggestion list reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
    Escape,
}

/// A chosen suggestion; the host opens `url` in a new browsing context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub label: String,
    pub url: String,
}

impl From<&Suggestion> for Selection {
    fn from(suggestion: &Suggestion) -> Self {
        Self {
            label: suggestion.label.clone(),
            url: suggestion.url.clone(),
        }
    }
}

/// Visibility and keyboard focus of the suggestion list
#[derive(Debug, Clone)]
pub struct SuggestionList {
    visibility: Visibility,
    focused: usize,
    items: Vec<Suggestion>,
    /// Focused index waiting to be scrolled into view
    reveal: Option<usize>,
}

impl Default for SuggestionList {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionList {
    pub fn new() -> Self {
        Self {
            visibility: Visibility::Collapsed,
            focused: 0,
            items: Vec::new(),
            reveal: None,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_expanded(&self) -> bool {
        self.visibility == Visibility::Expanded
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn items(&self) -> &[Suggestion] {
        &self.items
    }

    pub fn focused_item(&self) -> Option<&Suggestion> {
        self.items.get(self.focused)
    }

    /// New results arrived: show them with focus back on the first item
    pub fn replace(&mut self, items: Vec<Suggestion>) {
        self.items = items;
        self.focused = 0;
        self.visibility = Visibility::Expanded;
        self.request_reveal();
    }

    /// Drop results (query too short). Visibility is left alone.
    pub fn clear(&mut self) {
        self.items.clear();
        self.focused = 0;
        self.reveal = None;
    }

    pub fn expand(&mut self) {
        if self.visibility == Visibility::Collapsed {
            self.visibility = Visibility::Expanded;
            self.request_reveal();
        }
    }

    pub fn collapse(&mut self) {
        self.visibility = Visibility::Collapsed;
        self.reveal = None;
    }

    pub fn toggle(&mut self) {
        match self.visibility {
            Visibility::Collapsed => self.expand(),
            Visibility::Expanded => self.collapse(),
        }
    }

    pub fn handle_key(&mut self, key: NavKey) -> Option<Selection> {
        match key {
            NavKey::Down => {
                if self.is_expanded() {
                    if self.focused + 1 < self.items.len() {
                        self.set_focus(self.focused + 1);
                    }
                } else {
                    self.expand();
                }
                None
            }
            NavKey::Up => {
                self.set_focus(self.focused.saturating_sub(1));
                None
            }
            NavKey::Escape => {
                self.collapse();
                None
            }
            // The first item is not reachable with Enter; it has to be
            // clicked or focused away from and back.
            NavKey::Enter if self.focused > 0 => self.select(self.focused),
            NavKey::Enter => None,
        }
    }

    /// Choose the item at `index` and collapse the list
    pub fn select(&mut self, index: usize) -> Option<Selection> {
        let selection = self.items.get(index).map(Selection::from)?;
        self.collapse();
        Some(selection)
    }

    /// Index to scroll into view, taken once
    pub fn take_reveal(&mut self) -> Option<usize> {
        self.reveal.take()
    }

    fn set_focus(&mut self, index: usize) {
        if index != self.focused {
            self.focused = index;
            self.request_reveal();
        }
    }

    fn request_reveal(&mut self) {
        if self.is_expanded() && !self.items.is_empty() {
            self.reveal = Some(self.focused);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::SuggestionKind;

    fn items(n: usize) -> Vec<Suggestion> {
        (0..n)
            .map(|i| Suggestion {
                label: format!("item-{i:02}"),
                url: format!("https://github.com/item-{i:02}"),
                id: i as u64,
                kind: SuggestionKind::Repository,
            })
            .collect()
    }

    fn open_list(n: usize) -> SuggestionList {
        let mut list = SuggestionList::new();
        list.replace(items(n));
        list
    }

    #[test]
    fn test_initial_state() {
        let list = SuggestionList::new();
        assert_eq!(list.visibility(), Visibility::Collapsed);
        assert_eq!(list.focused(), 0);
        assert!(list.items().is_empty());
    }

    #[test]
    fn test_replace_expands_and_resets_focus() {
        let mut list = open_list(5);
        list.handle_key(NavKey::Down);
        list.handle_key(NavKey::Down);
        list.collapse();

        list.replace(items(3));
        assert!(list.is_expanded());
        assert_eq!(list.focused(), 0);
        assert_eq!(list.take_reveal(), Some(0));
    }

    #[test]
    fn test_down_saturates_at_last_item() {
        let mut list = open_list(12);
        for _ in 0..11 {
            list.handle_key(NavKey::Down);
        }
        assert_eq!(list.focused(), 11);
        list.handle_key(NavKey::Down);
        assert_eq!(list.focused(), 11);
    }

    #[test]
    fn test_up_saturates_at_first_item() {
        let mut list = open_list(4);
        list.handle_key(NavKey::Down);
        for _ in 0..5 {
            list.handle_key(NavKey::Up);
        }
        assert_eq!(list.focused(), 0);
    }

    #[test]
    fn test_up_works_while_collapsed() {
        let mut list = open_list(4);
        list.handle_key(NavKey::Down);
        list.handle_key(NavKey::Down);
        list.handle_key(NavKey::Escape);
        list.handle_key(NavKey::Up);
        assert!(!list.is_expanded());
        assert_eq!(list.focused(), 1);
    }

    #[test]
    fn test_down_on_collapsed_list_only_opens() {
        let mut list = open_list(4);
        list.handle_key(NavKey::Down);
        list.handle_key(NavKey::Escape);
        assert!(!list.is_expanded());

        list.handle_key(NavKey::Down);
        assert!(list.is_expanded());
        assert_eq!(list.focused(), 1);
    }

    #[test]
    fn test_down_on_empty_expanded_list() {
        let mut list = open_list(0);
        list.handle_key(NavKey::Down);
        assert_eq!(list.focused(), 0);
        assert_eq!(list.take_reveal(), None);
    }

    #[test]
    fn test_enter_ignores_first_item() {
        let mut list = open_list(3);
        assert_eq!(list.handle_key(NavKey::Enter), None);
        assert!(list.is_expanded());

        list.handle_key(NavKey::Down);
        let selection = list.handle_key(NavKey::Enter).expect("second item selected");
        assert_eq!(selection.url, "https://github.com/item-01");
        assert!(!list.is_expanded());
    }

    #[test]
    fn test_select_any_index_collapses() {
        let mut list = open_list(5);
        let selection = list.select(2).unwrap();
        assert_eq!(selection.label, "item-02");
        assert_eq!(list.visibility(), Visibility::Collapsed);
        // Focus is untouched by clicking
        assert_eq!(list.focused(), 0);
        assert_eq!(list.select(99), None);
    }

    #[test]
    fn test_toggle_flips_visibility() {
        let mut list = open_list(2);
        list.toggle();
        assert!(!list.is_expanded());
        list.toggle();
        assert!(list.is_expanded());
    }

    #[test]
    fn test_reveal_follows_focus_only_when_visible() {
        let mut list = open_list(6);
        assert_eq!(list.take_reveal(), Some(0));
        assert_eq!(list.take_reveal(), None);

        list.handle_key(NavKey::Down);
        assert_eq!(list.take_reveal(), Some(1));

        list.collapse();
        list.handle_key(NavKey::Up);
        assert_eq!(list.take_reveal(), None);

        list.expand();
        assert_eq!(list.take_reveal(), Some(0));
    }

    #[test]
    fn test_clear_keeps_visibility() {
        let mut list = open_list(3);
        list.handle_key(NavKey::Down);
        list.clear();
        assert!(list.is_expanded());
        assert_eq!(list.focused(), 0);
        assert!(list.focused_item().is_none());
        assert_eq!(list.handle_key(NavKey::Enter), None);
    }
}
