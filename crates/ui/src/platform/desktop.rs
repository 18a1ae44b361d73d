use std::io;
use std::process::Command;

use tracing::warn;

use super::UiLinkOpener;

/// Hands URLs to the operating system's default browser.
pub struct DesktopLinkOpener;

impl DesktopLinkOpener {
    fn launch(url: &str) -> io::Result<()> {
        #[cfg(target_os = "macos")]
        let mut command = {
            let mut command = Command::new("open");
            command.arg(url);
            command
        };
        #[cfg(target_os = "windows")]
        let mut command = {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", "", url]);
            command
        };
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let mut command = {
            let mut command = Command::new("xdg-open");
            command.arg(url);
            command
        };
        command.spawn().map(drop)
    }
}

impl UiLinkOpener for DesktopLinkOpener {
    fn open_url(&self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }
        if let Err(err) = Self::launch(url) {
            warn!(%url, error = %err, "failed to open link");
        }
    }
}
