//! Event dispatch: applies key actions and fetch results to `AppState` and
//! starts the side effects (debounce timer, fetch task, settings write).

use crate::app::{AppState, InputChange};
use crate::browser;
use crate::debounce::Debouncer;
use crate::events::{AppEvent, EventSender};
use crate::github::client::PullRequestSource;
use crate::github::fetch;
use crate::input::{self, Action, InputContext};
use crate::settings::{Settings, SettingsStore};
use std::sync::Arc;

pub struct Controller {
    pub state: AppState,
    debouncer: Debouncer,
    source: Arc<dyn PullRequestSource>,
    settings: SettingsStore,
    tx: EventSender,
}

impl Controller {
    pub fn new(
        state: AppState,
        debouncer: Debouncer,
        source: Arc<dyn PullRequestSource>,
        settings: SettingsStore,
        tx: EventSender,
    ) -> Self {
        Self {
            state,
            debouncer,
            source,
            settings,
            tx,
        }
    }

    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                let ctx = InputContext {
                    has_error: self.state.error_banner().is_some(),
                };
                self.handle_action(input::map_key(key, &ctx));
            }
            AppEvent::Tick => {
                if self.state.loading {
                    self.state.advance_spinner();
                }
            }
            AppEvent::SearchDue { ticket } => {
                if self.debouncer.is_current(ticket) {
                    self.start_fetch();
                } else {
                    tracing::debug!(ticket, "dropping superseded debounce");
                }
            }
            AppEvent::AvatarLoaded { generation, url } => {
                if !self.state.apply_avatar(generation, url) {
                    tracing::debug!(generation, "dropping stale avatar");
                }
            }
            AppEvent::SearchLoaded { generation, items } => {
                if !self.state.apply_results(generation, items) {
                    tracing::debug!(generation, "dropping stale search results");
                }
            }
            AppEvent::FetchFailed { generation, error } => {
                if self.state.apply_failure(generation) {
                    tracing::error!(generation, "search failed: {error}");
                } else {
                    tracing::debug!(generation, "dropping stale failure: {error}");
                }
            }
            AppEvent::Error(e) => {
                tracing::error!("{e}");
                self.state.should_quit = true;
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::DismissError => self.state.dismiss_error(),
            Action::InsertChar(c) => {
                let change = self.state.push_char(c);
                self.on_input_changed(change);
            }
            Action::DeleteChar => {
                let change = self.state.pop_char();
                self.on_input_changed(change);
            }
            Action::ClearInput => {
                let change = self.state.set_username("");
                self.on_input_changed(change);
            }
            Action::SearchNow => {
                self.debouncer.cancel();
                self.start_fetch();
            }
            Action::ToggleTheme => self.toggle_theme(),
            Action::MoveUp => self.state.move_selection_up(),
            Action::MoveDown => self.state.move_selection_down(),
            Action::OpenSelected => {
                if let Some(url) = self.state.selected_url() {
                    if let Err(e) = browser::open_in_browser(url) {
                        tracing::warn!("{e}");
                    }
                }
            }
            Action::None => {}
        }
    }

    /// Replaces the username and reacts as if it had been typed.
    pub fn set_username(&mut self, username: &str) {
        let change = self.state.set_username(username);
        self.on_input_changed(change);
    }

    fn on_input_changed(&mut self, change: InputChange) {
        match change {
            InputChange::Unchanged => {}
            InputChange::Changed => self.debouncer.schedule(&self.tx),
            InputChange::Cleared => self.debouncer.cancel(),
        }
    }

    pub fn start_fetch(&mut self) {
        let Some(generation) = self.state.begin_fetch() else {
            return;
        };
        let source = Arc::clone(&self.source);
        let username = self.state.username.clone();
        let window = self.state.config.window.clone();
        let tx = self.tx.clone();
        tracing::info!(%username, generation, "starting search");
        spawn_monitored(self.tx.clone(), generation, async move {
            fetch::run_fetch_cycle(&*source, &username, &window, generation, &tx).await;
        });
    }

    fn toggle_theme(&mut self) {
        let theme = self.state.toggle_theme();
        if let Err(e) = self.settings.save(&Settings { theme }) {
            tracing::warn!("failed to persist theme: {e:#}");
        }
    }
}

/// Runs a fetch task and turns a panic inside it into a failure for that generation.
fn spawn_monitored(
    tx: EventSender,
    generation: u64,
    fut: impl std::future::Future<Output = ()> + Send + 'static,
) {
    tokio::spawn(async move {
        let handle = tokio::spawn(fut);
        if let Err(join_err) = handle.await {
            let msg = if join_err.is_panic() {
                "fetch task panicked"
            } else {
                "fetch task cancelled"
            };
            if tx
                .send(AppEvent::FetchFailed {
                    generation,
                    error: msg.to_string(),
                })
                .is_err()
            {
                tracing::warn!("fetch task: channel closed while reporting {msg}");
            }
        }
    });
}
