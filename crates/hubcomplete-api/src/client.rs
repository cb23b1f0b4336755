use crate::types::{RepositoryItem, SearchPage, Source, UserItem};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = "hubcomplete";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Search request failed ({status})")]
    Status {
        status: StatusCode,
        /// `message` field of the error body, when the backend sent one
        message: Option<String>,
    },

    #[error("Search request could not be completed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected search response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Human-readable detail for display next to the failed source.
    ///
    /// The backend's own message wins; otherwise the status line or the
    /// underlying error description is used.
    pub fn detail(&self) -> String {
        match self {
            FetchError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            FetchError::Status { status, .. } => status.to_string(),
            FetchError::Transport(e) => e.to_string(),
            FetchError::Decode(e) => e.to_string(),
        }
    }
}

/// A search backend serving both sources.
///
/// Implementations must be callable from several threads at once: the two
/// sources are queried in parallel.
pub trait SearchBackend {
    fn search_repositories(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<SearchPage<RepositoryItem>, FetchError>;

    fn search_users(&self, query: &str, per_page: u32) -> Result<SearchPage<UserItem>, FetchError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extract the `message` field from an error response body
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

pub struct GithubClient {
    api_base_url: String,
    token: Option<String>,
    client: Client,
}

impl GithubClient {
    pub fn new(api_base_url: String, token: Option<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    /// Client configured from `GITHUB_API_URL` and `GITHUB_TOKEN`
    pub fn from_env() -> Result<Self, FetchError> {
        Self::new(crate::get_api_base_url(), crate::get_token())
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn endpoint(&self, source: Source) -> String {
        format!("{}{}", self.api_base_url, source.path())
    }

    fn get_page<T: DeserializeOwned>(
        &self,
        source: Source,
        query: &str,
        per_page: u32,
    ) -> Result<SearchPage<T>, FetchError> {
        let url = self.endpoint(source);
        let per_page = per_page.to_string();
        log::debug!("GET {} q={:?} per_page={}", url, query, per_page);

        let mut request = self
            .client
            .get(&url)
            .query(&[("q", query), ("per_page", per_page.as_str())])
            .header(reqwest::header::ACCEPT, "application/vnd.github+json");
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                message: error_message(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

impl SearchBackend for GithubClient {
    fn search_repositories(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<SearchPage<RepositoryItem>, FetchError> {
        self.get_page(Source::Repositories, query, per_page)
    }

    fn search_users(&self, query: &str, per_page: u32) -> Result<SearchPage<UserItem>, FetchError> {
        self.get_page(Source::Users, query, per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_backend_field() {
        assert_eq!(
            error_message(r#"{"message": "API rate limit exceeded", "documentation_url": "x"}"#),
            Some("API rate limit exceeded".to_string())
        );
        assert_eq!(error_message(r#"{"message": "   "}"#), None);
        assert_eq!(error_message(r#"{"errors": []}"#), None);
        assert_eq!(error_message("<html>bad gateway</html>"), None);
        assert_eq!(error_message(""), None);
    }

    #[test]
    fn test_detail_uses_message_then_status() {
        let with_message = FetchError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some("users search response error".to_string()),
        };
        assert_eq!(with_message.detail(), "users search response error");

        let without_message = FetchError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: None,
        };
        assert_eq!(without_message.detail(), "503 Service Unavailable");
    }

    #[test]
    fn test_detail_for_decode_error() {
        let err = serde_json::from_str::<SearchPage<UserItem>>("{").unwrap_err();
        let fetch_err = FetchError::from(err);
        assert!(!fetch_err.detail().is_empty());
        assert!(fetch_err.to_string().starts_with("Unexpected search response"));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = GithubClient::new("http://localhost:8080/".to_string(), None).unwrap();
        assert_eq!(client.api_base_url(), "http://localhost:8080");
        assert_eq!(
            client.endpoint(Source::Repositories),
            "http://localhost:8080/search/repositories"
        );
        assert_eq!(
            client.endpoint(Source::Users),
            "http://localhost:8080/search/users"
        );
    }
}
