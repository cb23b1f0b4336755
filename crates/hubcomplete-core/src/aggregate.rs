//! Fetch aggregation across the two search sources.

use crate::PER_PAGE;
use crate::collate;
use crate::suggestion::Suggestion;
use hubcomplete_api::{FetchError, SearchBackend, SearchPage, Source};
use serde::Serialize;

/// Result of one aggregation cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    /// Items from every source that succeeded, in dictionary order by label
    pub results: Vec<Suggestion>,
    /// One line per failed source, repositories first
    pub errors: Vec<String>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.errors.is_empty()
    }
}

/// Error line shown for a failed source
pub fn failure_message(source: Source, error: &FetchError) -> String {
    let detail = error.detail();
    if detail.trim().is_empty() {
        format!("Failed to fetch {}", source.name())
    } else {
        format!("Failed to fetch {}: {}", source.name(), detail)
    }
}

fn collect<T: Into<Suggestion>>(
    outcome: &mut SearchOutcome,
    source: Source,
    fetched: Result<SearchPage<T>, FetchError>,
) {
    match fetched {
        Ok(page) => {
            log::debug!("{} returned {} items", source, page.items.len());
            outcome
                .results
                .extend(page.items.into_iter().map(Into::into));
        }
        Err(e) => {
            log::warn!("Fetching {} failed: {}", source, e);
            outcome.errors.push(failure_message(source, &e));
        }
    }
}

/// Query both sources in parallel and merge what comes back.
///
/// Never fails as a whole: a failing source turns into an error line and the
/// other source still contributes. Nothing is requested for an empty query.
pub fn search<B>(backend: &B, query: &str) -> SearchOutcome
where
    B: SearchBackend + Sync + ?Sized,
{
    if query.is_empty() {
        return SearchOutcome::default();
    }

    let (repositories, users) = rayon::join(
        || backend.search_repositories(query, PER_PAGE),
        || backend.search_users(query, PER_PAGE),
    );

    let mut outcome = SearchOutcome::default();
    // Repositories go in first so they win label ties after the stable sort
    collect(&mut outcome, Source::Repositories, repositories);
    collect(&mut outcome, Source::Users, users);
    collate::sort_by_label(&mut outcome.results);
    outcome
}
