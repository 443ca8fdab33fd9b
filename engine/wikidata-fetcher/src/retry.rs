//! Scoped retry with exponential backoff

use crate::config::RetryConfig;
use std::fmt::Display;
use std::future::Future;
use tokio::time::sleep;
use tracing::warn;

/// Run `op` until it succeeds or `max_retries` attempts have been made.
///
/// Attempts are strictly sequential. After a failed attempt the task sleeps
/// for the current delay, which starts at `initial_delay` and is multiplied
/// by `backoff_multiplier` each time (5s, 10s, 20s with the defaults). The
/// last error is returned once attempts run out.
pub async fn run_with_retry<F, Fut, T, E>(
    label: &str,
    retry: &RetryConfig,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = retry.max_retries.max(1);
    let mut delay = retry.initial_delay();
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts => {
                warn!("{} failed (attempt {}/{}): {}; giving up", label, attempt, max_attempts, e);
                return Err(e);
            }
            Err(e) => {
                warn!(
                    "{} failed (attempt {}/{}): {}; retrying in {:?}",
                    label, attempt, max_attempts, e, delay
                );
                sleep(delay).await;
                delay = retry.next_delay(delay);
                attempt += 1;
            }
        }
    }
}
