use color_eyre::eyre::{eyre, Result};
use std::process::{Command, Stdio};

/// Hands a pull request URL to the platform opener, detached from the TUI.
pub fn open_in_browser(url: &str) -> Result<()> {
    // Only web links; anything else could be a local file or custom protocol
    if !is_web_url(url) {
        return Err(eyre!("Refusing to open non-HTTP URL: {url}"));
    }

    if cfg!(target_os = "windows") {
        // Empty "" title keeps `start` from treating the URL as a window title
        return spawn_detached("cmd", &["/C", "start", "", url]);
    }

    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if std::env::var_os("WSL_DISTRO_NAME").is_some() {
        "wslview"
    } else {
        "xdg-open"
    };
    spawn_detached(opener, &[url])
}

pub fn is_web_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn spawn_detached(program: &str, args: &[&str]) -> Result<()> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
        .map_err(|e| eyre!("Failed to open browser with {program}: {e}"))
}
