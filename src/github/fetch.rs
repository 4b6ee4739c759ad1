//! One search round-trip: profile lookup, then the pull request search.
//!
//! Every event carries the generation it was started with so the event loop can
//! drop responses that belong to a superseded query.

use crate::events::{AppEvent, EventSender};
use crate::github::client::{PullRequestSource, SearchWindow};

pub async fn run_fetch_cycle(
    source: &dyn PullRequestSource,
    username: &str,
    window: &SearchWindow,
    generation: u64,
    tx: &EventSender,
) {
    let avatar = match source.fetch_avatar(username).await {
        Ok(url) => url,
        Err(e) => {
            report_failure(tx, generation, &format!("{e:#}"));
            return;
        }
    };
    if tx
        .send(AppEvent::AvatarLoaded {
            generation,
            url: avatar,
        })
        .is_err()
    {
        tracing::warn!("fetch cycle: channel closed");
        return;
    }

    match source.search_pull_requests(username, window).await {
        Ok(items) => {
            tracing::info!(username, generation, count = items.len(), "search complete");
            if tx.send(AppEvent::SearchLoaded { generation, items }).is_err() {
                tracing::warn!("fetch cycle: channel closed");
            }
        }
        Err(e) => report_failure(tx, generation, &format!("{e:#}")),
    }
}

fn report_failure(tx: &EventSender, generation: u64, error: &str) {
    tracing::warn!(generation, "fetch failed: {error}");
    if tx
        .send(AppEvent::FetchFailed {
            generation,
            error: error.to_string(),
        })
        .is_err()
    {
        tracing::warn!("fetch cycle: channel closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::models::PullRequest;
    use async_trait::async_trait;
    use chrono::Utc;
    use color_eyre::eyre::{eyre, Result};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    struct FakeSource {
        avatar_fails: bool,
        search_fails: bool,
        searches: AtomicUsize,
    }

    impl FakeSource {
        fn new(avatar_fails: bool, search_fails: bool) -> Self {
            Self {
                avatar_fails,
                search_fails,
                searches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PullRequestSource for FakeSource {
        async fn fetch_avatar(&self, username: &str) -> Result<String> {
            if self.avatar_fails {
                return Err(eyre!("GitHub API error (404 Not Found)"));
            }
            Ok(format!("https://avatars.example/{username}"))
        }

        async fn search_pull_requests(
            &self,
            _username: &str,
            _window: &SearchWindow,
        ) -> Result<Vec<PullRequest>> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            if self.search_fails {
                return Err(eyre!("GitHub API error (403 Forbidden)"));
            }
            Ok(vec![PullRequest {
                id: 1,
                title: "First".to_string(),
                html_url: "https://github.com/o/r/pull/1".to_string(),
                repository_url: "https://api.github.com/repos/o/r".to_string(),
                created_at: Utc::now(),
            }])
        }
    }

    async fn collect(source: &FakeSource) -> Vec<AppEvent> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        run_fetch_cycle(source, "octocat", &SearchWindow::default(), 7, &tx).await;
        drop(tx);
        let mut events = Vec::new();
        while let Some(ev) = rx.recv().await {
            events.push(ev);
        }
        events
    }

    #[tokio::test]
    async fn avatar_then_results() {
        let source = FakeSource::new(false, false);
        let events = collect(&source).await;
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            AppEvent::AvatarLoaded { generation: 7, url } if url == "https://avatars.example/octocat"
        ));
        assert!(matches!(
            &events[1],
            AppEvent::SearchLoaded { generation: 7, items } if items.len() == 1
        ));
    }

    #[tokio::test]
    async fn avatar_failure_skips_search() {
        let source = FakeSource::new(true, false);
        let events = collect(&source).await;
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], AppEvent::FetchFailed { generation: 7, .. }));
        assert_eq!(source.searches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn search_failure_after_avatar() {
        let source = FakeSource::new(false, true);
        let events = collect(&source).await;
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], AppEvent::AvatarLoaded { .. }));
        assert!(matches!(
            &events[1],
            AppEvent::FetchFailed { generation: 7, error } if error.contains("403")
        ));
    }
}
