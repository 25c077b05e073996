use anyhow::{Context, Result};
use gitact_core::ports::{GitHubConfig, GitHubPort, RateLimit};
use gitact_core::{ActivityEvent, FetchError, FetchResult, RepositoryRecord};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

/// GitHub adapter that implements GitHubPort over the public REST API
pub struct GitHubAdapter {
    client: Client,
    api_url: String,
    per_page: u32,
}

#[derive(Deserialize)]
struct RateLimitResponse {
    resources: RateLimitResources,
}

#[derive(Deserialize)]
struct RateLimitResources {
    core: RateLimit,
}

impl GitHubAdapter {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

        if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("token {}", token))
                .context("GITHUB_TOKEN contains characters not allowed in a header")?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            per_page: config.per_page.clamp(1, 100),
        })
    }

    /// Send a request and decode its JSON body
    fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder, username: &str) -> FetchResult<T> {
        let response = request
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if let Some(err) = status_error(response.status(), response.headers(), username) {
            return Err(err);
        }

        let body = response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

impl GitHubPort for GitHubAdapter {
    fn fetch_events(&self, username: &str) -> FetchResult<Vec<ActivityEvent>> {
        let url = format!("{}/users/{}/events", self.api_url, username);
        debug!("GET {}", url);

        let events: Vec<ActivityEvent> = self.get_json(self.client.get(&url), username)?;
        info!("Fetched {} events for {}", events.len(), username);
        Ok(events)
    }

    fn fetch_public_repositories(&self, username: &str) -> FetchResult<Vec<RepositoryRecord>> {
        let url = format!("{}/users/{}/repos", self.api_url, username);
        let per_page = self.per_page.to_string();
        let mut all = Vec::new();
        let mut page: u32 = 1;

        loop {
            debug!("GET {} page {}", url, page);
            let page_param = page.to_string();
            let request = self.client.get(&url).query(&[
                ("type", "public"),
                ("sort", "stars"),
                ("direction", "desc"),
                ("per_page", per_page.as_str()),
                ("page", page_param.as_str()),
            ]);

            let batch: Vec<RepositoryRecord> = self.get_json(request, username)?;
            let received = batch.len();
            all.extend(batch);

            if is_last_page(received, self.per_page) {
                break;
            }
            page += 1;
        }

        info!("Fetched {} repositories for {} in {} page(s)", all.len(), username, page);
        Ok(all)
    }

    fn rate_limit(&self) -> FetchResult<RateLimit> {
        let url = format!("{}/rate_limit", self.api_url);
        let response: RateLimitResponse = self.get_json(self.client.get(&url), "")?;
        Ok(response.resources.core)
    }
}

/// An empty or short page means there is nothing after it
fn is_last_page(received: usize, per_page: u32) -> bool {
    received == 0 || received < per_page as usize
}

/// Map a non-success response onto the fetch error taxonomy
fn status_error(status: StatusCode, headers: &HeaderMap, username: &str) -> Option<FetchError> {
    if status.is_success() {
        return None;
    }

    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let exhausted = header_value("x-ratelimit-remaining").as_deref() == Some("0");
    let reset = header_value("x-ratelimit-reset").and_then(|r| r.parse::<i64>().ok());

    let err = match status {
        StatusCode::NOT_FOUND => FetchError::NotFound { username: username.to_string() },
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited { status: status.as_u16(), reset },
        StatusCode::FORBIDDEN if exhausted => FetchError::RateLimited { status: status.as_u16(), reset },
        _ => FetchError::Http { status: status.as_u16() },
    };
    Some(err)
}
