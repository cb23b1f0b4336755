use hubcomplete_api::{RepositoryItem, UserItem};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Repository,
    User,
}

impl SuggestionKind {
    pub fn name(&self) -> &'static str {
        match self {
            SuggestionKind::Repository => "repository",
            SuggestionKind::User => "user",
        }
    }
}

/// A normalized search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub label: String,
    pub url: String,
    pub id: u64,
    pub kind: SuggestionKind,
}

impl Suggestion {
    /// List identity. Ids are only unique within a kind.
    pub fn key(&self) -> (SuggestionKind, u64) {
        (self.kind, self.id)
    }
}

impl From<RepositoryItem> for Suggestion {
    fn from(item: RepositoryItem) -> Self {
        Self {
            label: item.name,
            url: item.html_url,
            id: item.id,
            kind: SuggestionKind::Repository,
        }
    }
}

impl From<UserItem> for Suggestion {
    fn from(item: UserItem) -> Self {
        Self {
            label: item.login,
            url: item.html_url,
            id: item.id,
            kind: SuggestionKind::User,
        }
    }
}
