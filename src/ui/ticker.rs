use std::time::Duration;
use tokio::time::{Instant, sleep_until};

use crate::pomodoro::collaborators::TickDriver;

// Dropping a `fired()` future early keeps the deadline.
#[derive(Debug, Default)]
pub struct DeadlineTicker {
    deadline: Option<Instant>,
}

impl DeadlineTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub async fn fired(&mut self) {
        match self.deadline {
            Some(deadline) => {
                sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl TickDriver for DeadlineTicker {
    fn after(&mut self, delay: Duration) {
        self.deadline = Some(Instant::now() + delay);
    }
}
