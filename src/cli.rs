use crate::debounce::DEFAULT_DEBOUNCE_MS;
use crate::github::client::{SearchWindow, DEFAULT_API_URL, DEFAULT_SINCE, DEFAULT_UNTIL};
use chrono::NaiveDateTime;
use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use std::path::PathBuf;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("BUILD_NUMBER"));

#[derive(Parser, Debug)]
#[command(name = "hacktrack", version = VERSION, about = "Hacktoberfest pull request tracker TUI")]
pub struct Cli {
    /// GitHub username to search for on startup
    #[arg(short, long)]
    pub user: Option<String>,

    /// Start of the creation window (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, default_value = DEFAULT_SINCE, value_parser = parse_timestamp)]
    pub since: String,

    /// End of the creation window (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, default_value = DEFAULT_UNTIL, value_parser = parse_timestamp)]
    pub until: String,

    /// GitHub REST API base URL
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Quiet period after the last keystroke before searching
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    /// Settings file (defaults to ~/.config/hacktrack/settings.toml)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Write debug logs to $XDG_STATE_HOME/hacktrack/debug.log
    #[arg(short, long)]
    pub verbose: bool,
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

impl Cli {
    /// The creation window to search, rejecting one that ends before it starts.
    pub fn search_window(&self) -> Result<SearchWindow> {
        let since = NaiveDateTime::parse_from_str(&self.since, TIMESTAMP_FORMAT)?;
        let until = NaiveDateTime::parse_from_str(&self.until, TIMESTAMP_FORMAT)?;
        if since > until {
            return Err(eyre!(
                "--since ({}) is later than --until ({})",
                self.since,
                self.until
            ));
        }
        Ok(SearchWindow {
            since: self.since.clone(),
            until: self.until.clone(),
        })
    }
}

fn parse_timestamp(s: &str) -> std::result::Result<String, String> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map(|_| s.to_string())
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM:SS: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["hacktrack"]).unwrap();
        assert_eq!(cli.user, None);
        assert_eq!(cli.since, "2024-09-30T00:00:00");
        assert_eq!(cli.until, "2024-11-07T23:59:59");
        assert_eq!(cli.api_url, "https://api.github.com");
        assert_eq!(cli.debounce_ms, 500);
        assert!(!cli.verbose);
    }

    #[test]
    fn custom_window_and_user() {
        let cli = Cli::try_parse_from([
            "hacktrack",
            "-u",
            "octocat",
            "--since",
            "2023-10-01T00:00:00",
            "--until",
            "2023-10-31T23:59:59",
        ])
        .unwrap();
        assert_eq!(cli.user.as_deref(), Some("octocat"));
        assert_eq!(cli.since, "2023-10-01T00:00:00");
    }

    #[test]
    fn rejects_bad_timestamp() {
        assert!(Cli::try_parse_from(["hacktrack", "--since", "October"]).is_err());
        assert!(Cli::try_parse_from(["hacktrack", "--until", "2024-11-07"]).is_err());
    }

    #[test]
    fn default_window() {
        let cli = Cli::try_parse_from(["hacktrack"]).unwrap();
        assert_eq!(cli.search_window().unwrap(), SearchWindow::default());
    }

    #[test]
    fn single_instant_window_allowed() {
        let cli = Cli::try_parse_from([
            "hacktrack",
            "--since",
            "2024-10-01T00:00:00",
            "--until",
            "2024-10-01T00:00:00",
        ])
        .unwrap();
        assert!(cli.search_window().is_ok());
    }

    #[test]
    fn reversed_window_rejected() {
        let cli = Cli::try_parse_from([
            "hacktrack",
            "--since",
            "2024-11-08T00:00:00",
            "--until",
            "2024-10-01T00:00:00",
        ])
        .unwrap();
        let err = cli.search_window().unwrap_err();
        assert!(err.to_string().contains("later than"));
    }
}
