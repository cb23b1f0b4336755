use serde::{Deserialize, Serialize};
use std::fmt;

/// Envelope shared by every search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage<T> {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<T>,
}

impl<T> SearchPage<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            total_count: items.len() as u64,
            incomplete_results: false,
            items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryItem {
    pub name: String,
    pub html_url: String,
    pub id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserItem {
    pub login: String,
    pub html_url: String,
    pub id: u64,
}

/// One of the two independent search backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Repositories,
    Users,
}

impl Source {
    /// Both sources, in the order their errors are reported
    pub const ALL: [Source; 2] = [Source::Repositories, Source::Users];

    /// Human-readable name, used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Source::Repositories => "repositories",
            Source::Users => "users",
        }
    }

    /// Endpoint path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            Source::Repositories => "/search/repositories",
            Source::Users => "/search/users",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
