//! GitHub search API client.
//!
//! Two read-only endpoints are used, one per [`Source`]. Both accept a free-text
//! `q` parameter and a `per_page` page size and answer with a [`SearchPage`].

mod client;
mod types;

pub use client::{FetchError, GithubClient, SearchBackend};
pub use types::{RepositoryItem, SearchPage, Source, UserItem};

const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Base URL of the search API, overridable with `GITHUB_API_URL`.
pub fn get_api_base_url() -> String {
    match std::env::var("GITHUB_API_URL") {
        Ok(url) if !url.trim().is_empty() => url.trim_end_matches('/').to_string(),
        _ => DEFAULT_API_BASE_URL.to_string(),
    }
}

/// Optional personal access token from `GITHUB_TOKEN`.
///
/// Unauthenticated search requests are heavily rate limited, so a token is
/// picked up when one is present in the environment.
pub fn get_token() -> Option<String> {
    std::env::var("GITHUB_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}
