use crate::github::models::{PullRequest, SearchResponse, UserProfile};
use async_trait::async_trait;
use color_eyre::eyre::{eyre, Result, WrapErr};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_SINCE: &str = "2024-09-30T00:00:00";
pub const DEFAULT_UNTIL: &str = "2024-11-07T23:59:59";

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Characters GitHub logins may contain are left alone; everything else is escaped.
const LOGIN_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Inclusive creation-date range used in the `created:` search qualifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchWindow {
    pub since: String,
    pub until: String,
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self {
            since: DEFAULT_SINCE.to_string(),
            until: DEFAULT_UNTIL.to_string(),
        }
    }
}

#[async_trait]
pub trait PullRequestSource: Send + Sync {
    async fn fetch_avatar(&self, username: &str) -> Result<String>;
    async fn search_pull_requests(
        &self,
        username: &str,
        window: &SearchWindow,
    ) -> Result<Vec<PullRequest>>;
}

/// Anonymous client for the public GitHub REST API.
pub struct GithubClient {
    http: Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("hacktrack/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        let http = Client::builder()
            .default_headers(headers)
            .timeout(HTTP_TIMEOUT)
            .build()
            .wrap_err("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn search_url(&self, username: &str, window: &SearchWindow) -> String {
        format!(
            "{}/search/issues?q=author:{}+is:pr+created:{}..{}",
            self.base_url,
            encode_login(username),
            window.since,
            window.until
        )
    }

    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/users/{}", self.base_url, encode_login(username))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let start = std::time::Instant::now();
        let response = self
            .http
            .get(url)
            .send()
            .await
            .wrap_err_with(|| format!("Request to {url} failed"))?;

        let status = response.status();
        tracing::debug!(%url, %status, elapsed_ms = start.elapsed().as_millis() as u64, "GET");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(eyre!("GitHub API error ({status}): {}", body.trim()));
        }

        response
            .json::<T>()
            .await
            .wrap_err_with(|| format!("Failed to decode response from {url}"))
    }
}

#[async_trait]
impl PullRequestSource for GithubClient {
    async fn fetch_avatar(&self, username: &str) -> Result<String> {
        let profile: UserProfile = self.get_json(&self.profile_url(username)).await?;
        Ok(profile.avatar_url)
    }

    async fn search_pull_requests(
        &self,
        username: &str,
        window: &SearchWindow,
    ) -> Result<Vec<PullRequest>> {
        let search: SearchResponse = self.get_json(&self.search_url(username, window)).await?;
        Ok(search.items)
    }
}

fn encode_login(username: &str) -> String {
    utf8_percent_encode(username, LOGIN_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn client() -> GithubClient {
        GithubClient::new(DEFAULT_API_URL).unwrap()
    }

    #[test]
    fn search_url_uses_fixed_window() {
        assert_eq!(
            client().search_url("octocat", &SearchWindow::default()),
            "https://api.github.com/search/issues?q=author:octocat+is:pr+created:2024-09-30T00:00:00..2024-11-07T23:59:59"
        );
    }

    #[test]
    fn search_url_custom_window() {
        let window = SearchWindow {
            since: "2023-10-01T00:00:00".to_string(),
            until: "2023-10-31T23:59:59".to_string(),
        };
        assert!(client()
            .search_url("octocat", &window)
            .ends_with("created:2023-10-01T00:00:00..2023-10-31T23:59:59"));
    }

    #[test]
    fn profile_url() {
        assert_eq!(
            client().profile_url("octo-cat_1"),
            "https://api.github.com/users/octo-cat_1"
        );
    }

    #[test]
    fn login_is_escaped() {
        assert_eq!(encode_login("a b&c"), "a%20b%26c");
        assert_eq!(encode_login("x+y"), "x%2By");
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let c = GithubClient::new("http://127.0.0.1:9999/").unwrap();
        assert_eq!(c.profile_url("u"), "http://127.0.0.1:9999/users/u");
    }
}
