use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use notify_rust::{Notification, Timeout};
use tokio::runtime::Handle;

use crate::pomodoro::collaborators::Notifier;

pub const APP_NAME: &str = "pomo_clock";

type ShowFn = dyn Fn(Notification) -> Result<(), String> + Send + Sync;

/// Sends phase-change alerts through the desktop notification daemon.
///
/// Delivery talks to D-Bus synchronously, so it runs on the blocking pool and
/// `notify` returns without waiting for it.
#[derive(Clone)]
pub struct DesktopNotifier {
    timeout_secs: u32,
    show: Arc<ShowFn>,
}

impl fmt::Debug for DesktopNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DesktopNotifier")
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl DesktopNotifier {
    pub fn new(timeout_secs: u32) -> Self {
        Self {
            timeout_secs,
            show: Arc::new(|n: Notification| n.show().map(|_| ()).map_err(|e| e.to_string())),
        }
    }

    #[cfg(test)]
    fn with_show<F>(timeout_secs: u32, show: F) -> Self
    where
        F: Fn(Notification) -> Result<(), String> + Send + Sync + 'static,
    {
        Self { timeout_secs, show: Arc::new(show) }
    }

    fn timeout(&self) -> Timeout {
        match self.timeout_secs {
            0 => Timeout::Never, // Stay until dismissed
            secs => Timeout::Milliseconds(secs.saturating_mul(1000)),
        }
    }

    fn build(&self, title: &str, message: &str) -> Notification {
        let mut notification = Notification::new();
        notification
            .summary(title)
            .body(message)
            .appname(APP_NAME)
            .timeout(self.timeout());
        notification
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&mut self, title: &str, message: &str) {
        debug!("Sending notification: {} - {}", title, message);
        let notification = self.build(title, message);
        let show = Arc::clone(&self.show);

        match Handle::try_current() {
            Ok(handle) => {
                // Fire and forget; the tick never waits on the daemon.
                handle.spawn_blocking(move || {
                    if let Err(e) = show(notification) {
                        warn!("Failed to send notification: {}", e);
                    }
                });
            }
            Err(e) => warn!("Failed to send notification: no runtime ({})", e),
        }
    }
}
