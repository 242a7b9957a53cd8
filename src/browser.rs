//! Opening article links in the platform's URL handler.

use std::process::{Command, Stdio};

/// Open `url` with the system handler.
///
/// Fire-and-forget: the handler is spawned on a background thread and a
/// failure to launch it is only logged.
pub fn open_url(url: &str) {
    let url = url.to_string();
    std::thread::spawn(move || {
        if let Err(e) = spawn_handler(&url) {
            tracing::warn!(url = %url, error = %e, "failed to open link");
        }
    });
}

fn quiet(mut cmd: Command) -> std::io::Result<()> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

#[cfg(target_os = "windows")]
fn spawn_handler(url: &str) -> std::io::Result<()> {
    let mut cmd = Command::new("cmd");
    cmd.args(["/c", "start", "", url]);
    quiet(cmd)
}

#[cfg(not(target_os = "windows"))]
fn spawn_handler(url: &str) -> std::io::Result<()> {
    // xdg-open on Linux, open on macOS.
    let mut xdg = Command::new("xdg-open");
    xdg.arg(url);
    quiet(xdg).or_else(|_| {
        let mut open = Command::new("open");
        open.arg(url);
        quiet(open)
    })
}
