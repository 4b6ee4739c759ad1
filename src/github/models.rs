use chrono::{DateTime, Local, Utc};
use serde::Deserialize;

/// A pull request as returned by the issue search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub id: u64,
    pub title: String,
    pub html_url: String,
    pub repository_url: String,
    pub created_at: DateTime<Utc>,
}

impl PullRequest {
    /// Final `/`-delimited segment of the repository API URL.
    pub fn repository_name(&self) -> &str {
        repository_name(&self.repository_url)
    }

    /// Creation date in the viewer's local time zone.
    ///
    /// chrono's `%x` is the fixed `MM/DD/YY` form unless the `unstable-locales`
    /// feature is enabled, so only the time zone follows the viewer, not the
    /// date order.
    pub fn created_local_date(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%x")
            .to_string()
    }
}

pub fn repository_name(repository_url: &str) -> &str {
    repository_url.rsplit('/').next().unwrap_or(repository_url)
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<PullRequest>,
}

/// Subset of `/users/{username}` the tracker cares about.
#[derive(Debug, Deserialize)]
pub struct UserProfile {
    pub avatar_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SEARCH_JSON: &str = r#"{
        "total_count": 2,
        "incomplete_results": false,
        "items": [
            {
                "id": 2571234,
                "number": 12,
                "title": "Fix typo in README",
                "html_url": "https://github.com/octo-org/hello-world/pull/12",
                "repository_url": "https://api.github.com/repos/octo-org/hello-world",
                "created_at": "2024-10-03T14:21:07Z",
                "state": "open"
            },
            {
                "id": 2571299,
                "title": "Add dark mode",
                "html_url": "https://github.com/octo-org/spoon-knife/pull/7",
                "repository_url": "https://api.github.com/repos/octo-org/spoon-knife",
                "created_at": "2024-10-21T08:00:00Z"
            }
        ]
    }"#;

    #[test]
    fn parses_search_items_in_order() {
        let resp: SearchResponse = serde_json::from_str(SEARCH_JSON).unwrap();
        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.items[0].id, 2571234);
        assert_eq!(resp.items[0].title, "Fix typo in README");
        assert_eq!(resp.items[1].title, "Add dark mode");
    }

    #[test]
    fn repository_name_is_last_segment() {
        let resp: SearchResponse = serde_json::from_str(SEARCH_JSON).unwrap();
        assert_eq!(resp.items[0].repository_name(), "hello-world");
        assert_eq!(resp.items[1].repository_name(), "spoon-knife");
    }

    #[test]
    fn repository_name_without_slash() {
        assert_eq!(repository_name("standalone"), "standalone");
    }

    #[test]
    fn repository_name_trailing_slash_is_empty() {
        assert_eq!(repository_name("https://api.github.com/repos/o/"), "");
    }

    #[test]
    fn missing_items_is_error() {
        assert!(serde_json::from_str::<SearchResponse>(r#"{"total_count": 0}"#).is_err());
    }

    #[test]
    fn malformed_created_at_is_error() {
        let json = r#"{"items": [{"id": 1, "title": "t", "html_url": "u",
            "repository_url": "r", "created_at": "yesterday"}]}"#;
        assert!(serde_json::from_str::<SearchResponse>(json).is_err());
    }

    #[test]
    fn local_date_is_month_day_year() {
        let resp: SearchResponse = serde_json::from_str(SEARCH_JSON).unwrap();
        let date = resp.items[0].created_local_date();
        let parts: Vec<&str> = date.split('/').collect();
        assert_eq!(parts.len(), 3, "unexpected date {date}");
        assert!(parts.iter().all(|p| p.len() == 2));
        // 2024-10-03T14:21Z is October 3 or 4 in every time zone
        assert_eq!(parts[0], "10");
        assert!(parts[1] == "03" || parts[1] == "04");
        assert_eq!(parts[2], "24");
    }

    #[test]
    fn parses_profile_avatar() {
        let json = r#"{"login": "octocat", "id": 1,
            "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(
            profile.avatar_url,
            "https://avatars.githubusercontent.com/u/583231?v=4"
        );
    }
}
