use hubcomplete_api::{FetchError, RepositoryItem, SearchBackend, SearchPage, UserItem};
use hubcomplete_core::{Autocomplete, SearchRequest, SearchResults, Settings, aggregate};
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

pub const DEBOUNCE: Duration = Duration::from_millis(2000);

/// Canned search backend that records every query it receives
#[derive(Default)]
pub struct FakeGithub {
    pub repositories: Vec<String>,
    pub users: Vec<String>,
    pub fail_repositories: bool,
    pub fail_users: bool,
    pub queries: Mutex<Vec<String>>,
}

impl FakeGithub {
    #[allow(unused)]
    pub fn with_items(repositories: &[&str], users: &[&str]) -> Self {
        Self {
            repositories: repositories.iter().map(|s| s.to_string()).collect(),
            users: users.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    /// `n` repositories named `repo-00`, `repo-01`, ...
    #[allow(unused)]
    pub fn numbered(n: usize) -> Self {
        Self {
            repositories: (0..n).map(|i| format!("repo-{i:02}")).collect(),
            ..Default::default()
        }
    }

    #[allow(unused)]
    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    fn server_error(what: &str) -> FetchError {
        FetchError::Status {
            status: 500u16.try_into().unwrap(),
            message: Some(format!("{what} search response error")),
        }
    }
}

impl SearchBackend for FakeGithub {
    fn search_repositories(
        &self,
        query: &str,
        _per_page: u32,
    ) -> Result<SearchPage<RepositoryItem>, FetchError> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail_repositories {
            return Err(Self::server_error("repositories"));
        }
        Ok(SearchPage::new(
            self.repositories
                .iter()
                .enumerate()
                .map(|(i, name)| RepositoryItem {
                    name: name.clone(),
                    html_url: format!("https://github.com/owner/{name}"),
                    id: 1000 + i as u64,
                })
                .collect(),
        ))
    }

    fn search_users(&self, _query: &str, _per_page: u32) -> Result<SearchPage<UserItem>, FetchError> {
        if self.fail_users {
            return Err(Self::server_error("users"));
        }
        Ok(SearchPage::new(
            self.users
                .iter()
                .enumerate()
                .map(|(i, login)| UserItem {
                    login: login.clone(),
                    html_url: format!("https://github.com/{login}"),
                    id: 2000 + i as u64,
                })
                .collect(),
        ))
    }
}

/// An [`Autocomplete`] on a virtual clock, with searches answered inline
pub struct Harness {
    pub widget: Autocomplete,
    pub backend: FakeGithub,
    pub requests: Receiver<SearchRequest>,
    pub start: Instant,
}

impl Harness {
    pub fn new(backend: FakeGithub) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            widget: Autocomplete::new(&Settings::with_debounce(DEBOUNCE), tx),
            backend,
            requests: rx,
            start: Instant::now(),
        }
    }

    pub fn at(&self, ms: u64) -> Instant {
        self.start + Duration::from_millis(ms)
    }

    pub fn type_at(&mut self, value: &str, ms: u64) {
        let now = self.at(ms);
        self.widget.handle_input(value, now);
    }

    /// Tick at `ms` and return the request that went out, if any
    pub fn tick_at(&mut self, ms: u64) -> Option<SearchRequest> {
        let now = self.at(ms);
        if self.widget.tick(now) {
            self.requests.try_recv().ok()
        } else {
            None
        }
    }

    pub fn run(&self, request: &SearchRequest) -> SearchResults {
        SearchResults {
            request_id: request.id,
            query: request.query.clone(),
            outcome: aggregate::search(&self.backend, &request.query),
            duration: Duration::ZERO,
        }
    }

    /// Type `value`, let the quiet window pass and deliver the results
    #[allow(unused)]
    pub fn search(&mut self, value: &str) {
        self.type_at(value, 0);
        let request = self.tick_at(DEBOUNCE.as_millis() as u64).unwrap();
        let results = self.run(&request);
        assert!(self.widget.on_search_completed(results));
    }
}
