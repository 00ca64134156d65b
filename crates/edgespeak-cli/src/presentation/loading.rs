//! Live loading display on stderr.
//!
//! Mirrors the controller's [`LoadingView`] into an `indicatif` spinner. The
//! spinner is drawn only while the view is visible, so fast requests never
//! flash anything on screen.

use std::time::Duration;

use edgespeak_core::{LoadingDisplay, LoadingView};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;

/// Message shown next to the spinner, or `None` while hidden.
pub fn spinner_message(view: &LoadingView) -> Option<String> {
    match view.display {
        LoadingDisplay::Hidden => None,
        display => Some(display.label()),
    }
}

/// A background task drawing the loading display.
pub struct LoadingSpinner {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl LoadingSpinner {
    /// Start following `view` until `finish` is called.
    pub fn follow(mut view: watch::Receiver<LoadingView>) -> Self {
        let (stop, mut stopped) = oneshot::channel();
        let task = tokio::spawn(async move {
            let mut bar: Option<ProgressBar> = None;
            loop {
                let message = spinner_message(&view.borrow_and_update());
                match message {
                    Some(message) => bar.get_or_insert_with(new_spinner).set_message(message),
                    None => {
                        if let Some(pb) = bar.take() {
                            pb.finish_and_clear();
                        }
                    }
                }
                tokio::select! {
                    changed = view.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = &mut stopped => break,
                }
            }
            if let Some(pb) = bar {
                pb.finish_and_clear();
            }
        });
        Self { stop, task }
    }

    /// Stop drawing and clear the line.
    pub async fn finish(self) {
        // The task may already have exited on its own.
        let _ = self.stop.send(());
        if let Err(e) = self.task.await {
            tracing::debug!(error = %e, "Loading spinner task failed");
        }
    }
}

fn new_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_view_has_no_message() {
        assert_eq!(spinner_message(&LoadingView::default()), None);
    }

    #[test]
    fn test_visible_view_uses_label() {
        let view = LoadingView {
            display: LoadingDisplay::Remaining(7),
            ..LoadingView::default()
        };
        assert_eq!(spinner_message(&view).as_deref(), Some("~7s remaining"));
    }
}
