
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// How often the spinner redraws while the solver runs
const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Shared spinner styling for long-running solver calls
pub fn get_spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("[{elapsed_precise}] {spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("|/-\\ ")
}

/// Starts a steadily ticking spinner with the given message.
/// Callers should `finish_and_clear()` it before printing a report.
pub fn start_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner()
        .with_style(get_spinner_style())
        .with_message(message.into());
    spinner.enable_steady_tick(TICK_INTERVAL);
    spinner
}
