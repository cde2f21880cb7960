//! Paced retry of the produce -> publish cycle.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::SchedulerError;

/// Type alias for the content production closure.
///
/// Produces the text to publish. Any error restarts the whole cycle after
/// the pause.
pub type Producer = Box<
    dyn Fn() -> Pin<Box<dyn Future<Output = Result<String, String>> + Send>> + Send + Sync,
>;

/// Type alias for the publish closure.
///
/// `Ok(true)` means accepted, `Ok(false)` an ordinary rejection, `Err` a
/// catastrophic failure. The executor treats the last two identically.
pub type Publisher = Box<
    dyn Fn(String) -> Pin<Box<dyn Future<Output = Result<bool, String>> + Send>> + Send + Sync,
>;

/// Pacing policy for a firing's retry cycle.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Pause between failed attempts.
    pub pause: Duration,
    /// Attempt cap; `None` retries until success.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    /// The stock policy: retry forever with 30 seconds between attempts.
    fn default() -> Self {
        Self {
            pause: Duration::from_secs(30),
            max_attempts: None,
        }
    }
}

/// Runs produce -> publish cycles until one cycle fully succeeds.
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor {
    policy: RetryPolicy,
}

impl RetryExecutor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Drive the two-stage cycle until both stages succeed in the same
    /// attempt.
    ///
    /// A publish rejection restarts the whole cycle, production included:
    /// the published text always comes from the attempt that succeeded.
    /// Under the default unbounded policy this never returns an error, so
    /// a permanently failing collaborator blocks the caller indefinitely.
    pub async fn execute(
        &self,
        label: &str,
        producer: &Producer,
        publisher: &Publisher,
    ) -> Result<(), SchedulerError> {
        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            match producer().await {
                Ok(text) => match publisher(text).await {
                    Ok(true) => {
                        debug!(label, attempts, "publish accepted");
                        return Ok(());
                    }
                    Ok(false) => {
                        warn!(label, attempts, "publish rejected, restarting cycle");
                    }
                    Err(error) => {
                        warn!(label, attempts, error = %error, "publish failed, restarting cycle");
                    }
                },
                Err(error) => {
                    warn!(label, attempts, error = %error, "content production failed");
                }
            }

            if let Some(max) = self.policy.max_attempts
                && attempts >= max
            {
                return Err(SchedulerError::AttemptsExhausted { attempts });
            }

            sleep(self.policy.pause).await;
        }
    }
}
