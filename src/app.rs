use crate::github::client::SearchWindow;
use crate::github::models::PullRequest;
use crate::settings::Theme;

// UI constants
pub const SPINNER_FRAME_COUNT: usize = 10;
pub const NARROW_WIDTH_THRESHOLD: u16 = 60;
pub const WIDE_WIDTH_THRESHOLD: u16 = 120;

/// Count at which the progress line switches to the enthusiastic tier.
pub const AWESOME_THRESHOLD: usize = 5;

pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data. Please try again.";

/// Immutable configuration set at startup.
pub struct AppConfig {
    pub window: SearchWindow,
}

/// What an edit did to the username.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChange {
    Unchanged,
    Changed,
    Cleared,
}

pub struct AppState {
    pub config: AppConfig,

    // Query
    pub username: String,

    // Results of the latest completed fetch
    pub pull_requests: Vec<PullRequest>,
    pub avatar_url: Option<String>,
    pub selected: usize,

    // Transient UI
    pub loading: bool,
    pub error: String,
    pub show_error: bool,
    pub spinner_frame: usize,
    pub should_quit: bool,

    pub theme: Theme,

    // Latest fetch issued; events tagged with anything older are stale.
    generation: u64,
}

impl AppState {
    pub fn new(window: SearchWindow, theme: Theme) -> Self {
        Self {
            config: AppConfig { window },
            username: String::new(),
            pull_requests: Vec::new(),
            avatar_url: None,
            selected: 0,
            loading: false,
            error: String::new(),
            show_error: false,
            spinner_frame: 0,
            should_quit: false,
            theme,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn set_username(&mut self, username: &str) -> InputChange {
        if self.username == username {
            return InputChange::Unchanged;
        }
        self.username = username.to_string();
        if self.username.is_empty() {
            self.clear_results();
            InputChange::Cleared
        } else {
            InputChange::Changed
        }
    }

    pub fn push_char(&mut self, c: char) -> InputChange {
        if c.is_control() {
            return InputChange::Unchanged;
        }
        self.username.push(c);
        InputChange::Changed
    }

    pub fn pop_char(&mut self) -> InputChange {
        if self.username.pop().is_none() {
            return InputChange::Unchanged;
        }
        if self.username.is_empty() {
            self.clear_results();
            InputChange::Cleared
        } else {
            InputChange::Changed
        }
    }

    /// Empties results and avatar and retires any fetch still in flight.
    fn clear_results(&mut self) {
        self.pull_requests.clear();
        self.avatar_url = None;
        self.selected = 0;
        self.loading = false;
        self.generation += 1;
    }

    /// Starts a fetch for the current username. Returns the generation to tag it
    /// with, or `None` when the username is empty (results are cleared instead).
    pub fn begin_fetch(&mut self) -> Option<u64> {
        if self.username.is_empty() {
            self.clear_results();
            return None;
        }
        self.generation += 1;
        self.loading = true;
        self.error.clear();
        Some(self.generation)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn apply_avatar(&mut self, generation: u64, url: String) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.avatar_url = Some(url);
        true
    }

    pub fn apply_results(&mut self, generation: u64, items: Vec<PullRequest>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.pull_requests = items;
        self.selected = 0;
        self.loading = false;
        true
    }

    /// Records a failed fetch. Previously displayed results stay as they are.
    pub fn apply_failure(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.error = FETCH_ERROR_MESSAGE.to_string();
        self.show_error = true;
        self.loading = false;
        true
    }

    pub fn dismiss_error(&mut self) {
        self.show_error = false;
    }

    pub fn error_banner(&self) -> Option<&str> {
        (self.show_error && !self.error.is_empty()).then_some(self.error.as_str())
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn progress_message(&self) -> String {
        progress_message(self.pull_requests.len())
    }

    /// Shown in place of the card grid when a search came back empty.
    pub fn empty_message(&self) -> Option<String> {
        if self.pull_requests.is_empty() && !self.loading && !self.username.is_empty() {
            Some(format!(
                "No pull requests found for {} during Hacktoberfest.",
                self.username
            ))
        } else {
            None
        }
    }

    pub fn move_selection_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if !self.pull_requests.is_empty() && self.selected < self.pull_requests.len() - 1 {
            self.selected += 1;
        }
    }

    pub fn selected_url(&self) -> Option<&str> {
        self.pull_requests
            .get(self.selected)
            .map(|pr| pr.html_url.as_str())
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAME_COUNT;
    }
}

pub fn progress_message(count: usize) -> String {
    match count {
        0 => "No pull requests made yet.".to_string(),
        1 => "1 pull request made!".to_string(),
        n if n < AWESOME_THRESHOLD => format!("{n} pull requests made!"),
        n => format!("{n} pull requests made! Awesome job!"),
    }
}
