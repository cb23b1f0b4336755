use crate::aggregate::SearchOutcome;
use crate::scheduler::{Gate, QueryScheduler, SearchRequest};
use crate::settings::Settings;
use crate::suggestions::{NavKey, Selection, SuggestionList};
use crate::view::{Body, ItemView, View, WidgetBounds};
use crate::worker::SearchResults;
use crate::{MIN_QUERY_CHARS, is_qualifying};
use std::sync::mpsc::Sender;
use std::time::Instant;

/// The autocomplete widget.
///
/// Owns the input value, loading flag, error lines and the suggestion list.
/// Every method is an event handler called from the host's single UI thread;
/// searches run elsewhere and come back through [`Autocomplete::on_search_completed`].
pub struct Autocomplete {
    input: String,
    loading: bool,
    errors: Vec<String>,
    list: SuggestionList,
    scheduler: QueryScheduler,
    query_tx: Sender<SearchRequest>,
    torn_down: bool,
}

impl Autocomplete {
    pub fn new(settings: &Settings, query_tx: Sender<SearchRequest>) -> Self {
        Self {
            input: String::new(),
            loading: false,
            errors: Vec::new(),
            list: SuggestionList::new(),
            scheduler: QueryScheduler::new(settings.debounce),
            query_tx,
            torn_down: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn list(&self) -> &SuggestionList {
        &self.list
    }

    /// The input changed to `value`
    pub fn handle_input(&mut self, value: &str, now: Instant) {
        if self.torn_down || value == self.input {
            return;
        }
        self.input = value.to_string();

        match self.scheduler.on_input_changed(value, now) {
            Gate::TooShort => {
                self.list.clear();
                self.errors.clear();
                self.loading = false;
            }
            Gate::Scheduled => self.loading = true,
        }
    }

    /// Send the search whose quiet window has elapsed. Returns true if one was sent.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(request) = self.scheduler.poll(now) else {
            return false;
        };

        log::debug!("Dispatching search {} {:?}", request.id, request.query);
        if self.query_tx.send(request).is_err() {
            log::warn!("Search worker is not running");
            self.loading = false;
            self.errors = vec!["Search is unavailable".to_string()];
            return false;
        }
        true
    }

    /// When the pending search becomes due, for the host's poll timeout
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    /// Apply finished search results. Superseded results are dropped and
    /// false is returned.
    pub fn on_search_completed(&mut self, results: SearchResults) -> bool {
        if self.torn_down || !self.scheduler.is_current(results.request_id) {
            log::debug!(
                "Dropping stale results for search {} {:?}",
                results.request_id,
                results.query
            );
            return false;
        }

        let SearchOutcome { results, errors } = results.outcome;
        self.errors = errors;
        self.list.replace(results);
        self.loading = false;
        true
    }

    pub fn handle_key(&mut self, key: NavKey) -> Option<Selection> {
        self.list.handle_key(key)
    }

    /// Expand/collapse control
    pub fn toggle(&mut self) {
        self.list.toggle();
    }

    /// Clicking into the input shows the list again
    pub fn click_input(&mut self) {
        self.list.expand();
    }

    pub fn click_item(&mut self, index: usize) -> Option<Selection> {
        self.list.select(index)
    }

    /// Pointer pressed at (`col`, `row`); collapses when outside `bounds`.
    /// Returns true if the list was collapsed.
    pub fn on_pointer(&mut self, col: u16, row: u16, bounds: &WidgetBounds) -> bool {
        if bounds.contains(col, row) {
            return false;
        }
        self.list.collapse();
        true
    }

    /// Focused index that should be scrolled into view, taken once
    pub fn take_reveal(&mut self) -> Option<usize> {
        self.list.take_reveal()
    }

    /// Cancel pending work; results still in flight will be ignored
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        if self.scheduler.cancel_pending() {
            log::debug!("Cancelled pending search on teardown");
        }
        self.loading = false;
        self.torn_down = true;
    }

    pub fn view(&self) -> View<'_> {
        let qualifies = is_qualifying(&self.input);
        let items = self.list.items();

        let body = if !qualifies {
            Body::Hint {
                min_chars: MIN_QUERY_CHARS,
            }
        } else if items.is_empty() && !self.loading {
            Body::NoResults
        } else if self.list.is_expanded() && !self.loading {
            let focused = self.list.focused();
            Body::Suggestions(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, s)| ItemView {
                        label: &s.label,
                        kind: s.kind,
                        focused: i == focused,
                    })
                    .collect(),
            )
        } else {
            Body::Hidden
        };

        View {
            input: &self.input,
            loading: self.loading,
            expanded: self.list.is_expanded(),
            expandable: qualifies && !items.is_empty(),
            errors: if qualifies && !self.loading {
                &self.errors
            } else {
                &[]
            },
            body,
        }
    }
}

impl Drop for Autocomplete {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::{Suggestion, SuggestionKind};
    use std::sync::mpsc::{self, Receiver};
    use std::time::Duration;

    const DEBOUNCE: Duration = Duration::from_millis(2000);

    fn widget() -> (Autocomplete, Receiver<SearchRequest>) {
        let (tx, rx) = mpsc::channel();
        (Autocomplete::new(&Settings::with_debounce(DEBOUNCE), tx), rx)
    }

    fn completed(request: &SearchRequest, labels: &[&str]) -> SearchResults {
        SearchResults {
            request_id: request.id,
            query: request.query.clone(),
            outcome: SearchOutcome {
                results: labels
                    .iter()
                    .enumerate()
                    .map(|(i, label)| Suggestion {
                        label: label.to_string(),
                        url: format!("https://github.com/{label}"),
                        id: i as u64,
                        kind: SuggestionKind::User,
                    })
                    .collect(),
                errors: Vec::new(),
            },
            duration: Duration::ZERO,
        }
    }

    #[test]
    fn test_initial_view_shows_hint() {
        let (widget, _rx) = widget();
        let view = widget.view();
        assert_eq!(view.input, "");
        assert!(!view.loading);
        assert!(!view.expanded);
        assert!(!view.expandable);
        assert_eq!(view.body, Body::Hint { min_chars: 3 });
    }

    #[test]
    fn test_loading_is_set_synchronously() {
        let (mut widget, rx) = widget();
        let t0 = Instant::now();
        widget.handle_input("mdn", t0);
        assert!(widget.is_loading());
        assert_eq!(widget.view().body, Body::Hidden);
        // Nothing sent before the quiet window
        assert!(!widget.tick(t0 + Duration::from_millis(10)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_completion_expands_and_clears_loading() {
        let (mut widget, rx) = widget();
        let t0 = Instant::now();
        widget.handle_input("mdn", t0);
        assert!(widget.tick(t0 + DEBOUNCE));
        let request = rx.try_recv().unwrap();

        assert!(widget.on_search_completed(completed(&request, &["mdn", "mdnx"])));
        assert!(!widget.is_loading());
        let view = widget.view();
        assert!(view.expanded);
        assert!(view.expandable);
        match view.body {
            Body::Suggestions(items) => {
                assert_eq!(items.len(), 2);
                assert!(items[0].focused);
                assert!(!items[1].focused);
            }
            other => panic!("expected suggestions, got {other:?}"),
        }
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let (mut widget, rx) = widget();
        let t0 = Instant::now();
        widget.handle_input("mdn", t0);
        widget.tick(t0 + DEBOUNCE);
        let old = rx.try_recv().unwrap();

        widget.handle_input("rust", t0 + DEBOUNCE + Duration::from_millis(5));
        assert!(!widget.on_search_completed(completed(&old, &["mdn"])));
        assert!(widget.is_loading());
        assert!(widget.list().items().is_empty());
    }

    #[test]
    fn test_unchanged_input_is_ignored() {
        let (mut widget, rx) = widget();
        let t0 = Instant::now();
        widget.handle_input("mdn", t0);
        widget.handle_input("mdn", t0 + Duration::from_millis(1500));
        // The second call did not restart the window
        assert!(widget.tick(t0 + DEBOUNCE));
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn test_teardown_cancels_pending_search() {
        let (mut widget, rx) = widget();
        let t0 = Instant::now();
        widget.handle_input("mdn", t0);
        widget.teardown();
        assert!(!widget.tick(t0 + DEBOUNCE * 2));
        assert!(rx.try_recv().is_err());
        assert!(!widget.is_loading());
    }

    #[test]
    fn test_dropping_widget_cancels_pending_search() {
        let (mut widget, rx) = widget();
        widget.handle_input("mdn", Instant::now());
        drop(widget);
        // Channel closed without any request
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_tick_without_worker_reports_error() {
        let (mut widget, rx) = widget();
        drop(rx);
        let t0 = Instant::now();
        widget.handle_input("mdn", t0);
        assert!(!widget.tick(t0 + DEBOUNCE));
        assert!(!widget.is_loading());
        assert_eq!(widget.view().errors, ["Search is unavailable".to_string()]);
    }
}
