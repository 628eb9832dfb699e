use std::time::Duration;

use log::{error, info};

use crate::aimharder::ClassBooker;
use crate::error::Error;

/// Which time slot to book on each day of the range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotPolicy {
    pub weekday: String,
    pub last_day: String,
}

impl SlotPolicy {
    pub fn time_id_for(&self, index: usize, total: usize) -> &str {
        if index + 1 == total {
            &self.last_day
        } else {
            &self.weekday
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to book date: {date}, error: {source}")]
pub struct DateFailure {
    pub date: String,
    #[source]
    pub source: Error,
}

/// Every per-date failure of one run.
#[derive(Debug, thiserror::Error)]
#[error("{}", join_failures(.failures))]
pub struct RunError {
    pub failures: Vec<DateFailure>,
}

fn join_failures(failures: &[DateFailure]) -> String {
    failures
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct Driver<B> {
    booker: B,
    policy: SlotPolicy,
    pause: Duration,
}

impl<B: ClassBooker> Driver<B> {
    pub fn new(booker: B, policy: SlotPolicy, pause: Duration) -> Self {
        Self {
            booker,
            policy,
            pause,
        }
    }

    /// Tries every date in order. A failed date does not stop the run.
    pub async fn run(&self, dates: &[String]) -> Result<(), RunError> {
        let mut failures = Vec::new();

        for (i, date) in dates.iter().enumerate() {
            if i > 0 {
                info!("Sleeping for {:?}", self.pause);
                tokio::time::sleep(self.pause).await;
            }

            let time_id = self.policy.time_id_for(i, dates.len());
            info!("Booking {} for date: {}", time_id, date);

            if let Err(e) = self.booker.book_class(date, time_id).await {
                failures.push(DateFailure {
                    date: date.clone(),
                    source: e,
                });
            }
        }

        if failures.is_empty() {
            info!("Successfully booked all classes");
            return Ok(());
        }

        for failure in &failures {
            error!("{}", failure);
        }
        Err(RunError { failures })
    }
}
