//! # hubcomplete-core
//!
//! The interaction engine behind the GitHub users & repositories autocomplete.
//!
//! - [`QueryScheduler`] gates keystrokes behind a minimum length and a quiet
//!   window, and tells stale completions apart from current ones.
//! - [`aggregate::search`] queries both sources in parallel and merges the
//!   results into one sorted [`SearchOutcome`].
//! - [`SuggestionList`] is the visibility/focus state machine.
//! - [`Autocomplete`] wires them together for a host (see the `hubcomplete`
//!   terminal UI) and exposes a [`View`] of everything that should be drawn.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hubcomplete_api::GithubClient;
//! use hubcomplete_core::aggregate;
//!
//! let client = GithubClient::from_env()?;
//! let outcome = aggregate::search(&client, "mdn");
//! for suggestion in &outcome.results {
//!     println!("{} {}", suggestion.label, suggestion.url);
//! }
//! # Ok::<(), hubcomplete_api::FetchError>(())
//! ```

pub mod aggregate;
mod autocomplete;
pub mod collate;
mod debounce;
mod scheduler;
mod settings;
mod suggestion;
mod suggestions;
pub mod view;
pub mod worker;

pub use aggregate::SearchOutcome;
pub use autocomplete::Autocomplete;
pub use debounce::Debouncer;
pub use scheduler::{Gate, QueryScheduler, SearchRequest};
pub use settings::Settings;
pub use suggestion::{Suggestion, SuggestionKind};
pub use suggestions::{NavKey, Selection, SuggestionList, Visibility};
pub use view::{Body, ItemView, Region, View, Viewport, WidgetBounds};
pub use worker::{SearchResults, spawn_worker};

/// Minimum number of characters before a search is scheduled
pub const MIN_QUERY_CHARS: usize = 3;

/// Items requested from each source per search
pub const PER_PAGE: u32 = 50;

/// Whether `query` is long enough to be searched
pub fn is_qualifying(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_CHARS
}
