//! [`MockFetcher`] for resolution test scenarios.
//!
//! Each route answers exactly one request, mirroring how a real chain
//! fetches every file at most once. Requests without a route fail with a
//! transport error naming the url, so a stray fetch shows up as a test
//! failure instead of a hang.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use repo_config::{
    ContentFetcher, DEFAULT_API_URL, FetchError, FetchResponse, FileLocation, RawContent,
};
use url::Url;

#[derive(Debug, Clone)]
enum Route {
    Respond(RawContent),
    NotFound,
    Fail(FetchError),
}

/// A scripted [`ContentFetcher`].
///
/// # Example
///
/// ```rust,no_run
/// use repo_test_utils::MockFetcher;
///
/// let fetcher = MockFetcher::new()
///     .not_found("https://api.github.com/repos/octocat/hello-world/contents/.github%2Fmy-app.yml")
///     .respond(
///         "https://api.github.com/repos/octocat/.github/contents/.github%2Fmy-app.yml",
///         "comment: hi",
///     );
/// // ... resolve ...
/// fetcher.assert_done();
/// ```
#[derive(Debug)]
pub struct MockFetcher {
    api_url: Url,
    routes: Mutex<HashMap<String, VecDeque<Route>>>,
    calls: Mutex<Vec<String>>,
}

impl Default for MockFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFetcher {
    /// Create a fetcher rendering urls against the public GitHub API.
    pub fn new() -> Self {
        Self::with_api_url(DEFAULT_API_URL)
    }

    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            api_url: Url::parse(api_url).expect("MockFetcher: invalid api url"),
            routes: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Url the fetcher renders for `owner/repo/path` on the default branch.
    pub fn url_for(&self, owner: &str, repo: &str, path: &str) -> String {
        self.resource_url(&FileLocation::new(owner, repo, path))
    }

    /// Answer one request for `url` with `body` as raw file content.
    pub fn respond(self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.route(url, Route::Respond(RawContent::new(body)))
    }

    /// Answer one request for `url` with `body` and a `Content-Type` header.
    pub fn respond_with_content_type(
        self,
        url: impl Into<String>,
        body: impl Into<Vec<u8>>,
        content_type: &str,
    ) -> Self {
        self.route(
            url,
            Route::Respond(RawContent::new(body).with_content_type(content_type)),
        )
    }

    /// Answer one request for `url` with a 404.
    pub fn not_found(self, url: impl Into<String>) -> Self {
        self.route(url, Route::NotFound)
    }

    /// Answer one request for `url` with a non-404 failure.
    pub fn fail(self, url: impl Into<String>, status: u16, message: &str) -> Self {
        self.route(url, Route::Fail(FetchError::with_status(status, message)))
    }

    fn route(self, url: impl Into<String>, route: Route) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(url.into())
            .or_default()
            .push_back(route);
        self
    }

    /// Urls requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Routes that have not been requested yet.
    pub fn pending(&self) -> Vec<String> {
        let routes = self.routes.lock().unwrap();
        let mut pending: Vec<String> = routes
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(url, _)| url.clone())
            .collect();
        pending.sort();
        pending
    }

    pub fn is_done(&self) -> bool {
        self.pending().is_empty()
    }

    /// Panic unless every scripted route was requested.
    pub fn assert_done(&self) {
        let pending = self.pending();
        assert!(
            pending.is_empty(),
            "MockFetcher: routes never requested: {pending:?}"
        );
    }
}

#[async_trait]
impl ContentFetcher for MockFetcher {
    fn resource_url(&self, location: &FileLocation) -> String {
        location.contents_url(&self.api_url).to_string()
    }

    async fn fetch(&self, location: &FileLocation) -> Result<FetchResponse, FetchError> {
        let url = self.resource_url(location);
        self.calls.lock().unwrap().push(url.clone());

        let route = self
            .routes
            .lock()
            .unwrap()
            .get_mut(&url)
            .and_then(VecDeque::pop_front);

        match route {
            Some(Route::Respond(raw)) => Ok(FetchResponse::Found(raw)),
            Some(Route::NotFound) => Ok(FetchResponse::NotFound),
            Some(Route::Fail(err)) => Err(err),
            None => Err(FetchError::transport(format!(
                "MockFetcher: no route for {url}"
            ))),
        }
    }
}
