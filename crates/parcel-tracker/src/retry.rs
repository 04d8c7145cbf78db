//! Bounded retry for challenge/response round-trips.
//!
//! [`retry_while`] re-runs an operation only while a caller-supplied predicate
//! classifies the error as retryable, and never more than `max_attempts`
//! times in total. Every other error is returned on the spot.

use std::future::Future;

use crate::error::TrackerError;

/// Returns `true` for failures that a fresh challenge may fix.
///
/// The SevenEleven CAPTCHA is re-rendered on every page load, so both a
/// rejected answer and an unreadable image are worth another attempt.
/// Transport and parse failures are not.
pub(crate) fn is_captcha_retryable(err: &TrackerError) -> bool {
    matches!(err, TrackerError::CaptchaRejected | TrackerError::Ocr(_))
}

/// Runs `operation` up to `max_attempts` times while `should_retry` accepts
/// the error it returns.
///
/// `max_attempts` counts the first try; a value of `0` is treated as `1`.
/// When the budget is spent, the last error is returned.
pub(crate) async fn retry_while<T, F, Fut, P>(
    max_attempts: u32,
    should_retry: P,
    mut operation: F,
) -> Result<T, TrackerError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, TrackerError>>,
    P: Fn(&TrackerError) -> bool,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !should_retry(&err) || attempt >= max_attempts {
                    return Err(err);
                }
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %err,
                    "challenge not accepted, retrying with a fresh one"
                );
            }
        }
        attempt += 1;
    }
}
