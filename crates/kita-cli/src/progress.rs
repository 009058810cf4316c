//! Spinner shown while a request to the backend is pending.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TICK: Duration = Duration::from_millis(100);

/// Run `call` behind a spinner labelled `message`.
///
/// Nothing is drawn when stderr is not a terminal.
pub fn with_spinner<T>(message: &'static str, call: impl FnOnce() -> T) -> T {
    let spinner = if io::stderr().is_terminal() {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
    };
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(TICK);
    let result = call();
    spinner.finish_and_clear();
    result
}
