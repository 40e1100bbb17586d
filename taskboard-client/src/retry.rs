//! The failure policy of a single logical request.
//!
//! A response is classified into an [`Outcome`]; the client consumes
//! outcomes in a small state machine over [`RequestState`]. A 401 is
//! refreshed at most once per request and is checked before the retry
//! budget. The budget is shared by every send of the request, including
//! sends after a refresh.

use std::time::Duration;
use crate::errors::{ApiError, TransportError};
use crate::transport::ApiResponse;

const UNAUTHORIZED: u16 = 401;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetryContext {
    /// Retries made so far.
    pub attempt: u32,
    pub max_attempts: u32,
    /// Set once a refresh has been attempted, or for requests that must not
    /// trigger one.
    pub refreshed: bool,
}

impl RetryContext {
    pub fn new(max_attempts: u32) -> Self {
        RetryContext {
            attempt: 0,
            max_attempts,
            refreshed: false,
        }
    }

    pub fn without_refresh(max_attempts: u32) -> Self {
        RetryContext {
            refreshed: true,
            ..Self::new(max_attempts)
        }
    }

    pub fn can_retry(&self) -> bool {
        self.attempt < self.max_attempts
    }
}

#[derive(Debug)]
pub enum Outcome {
    Success(ApiResponse),
    Retry { delay: Duration },
    Refresh,
    Fatal(ApiError),
}

#[derive(Debug)]
pub enum RequestState {
    Sending,
    AwaitingRefresh,
    Retrying(Duration),
    Done(Result<ApiResponse, ApiError>),
}

/// `base * 2^attempt`, saturating.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
    base.saturating_mul(factor)
}

pub fn classify(
    result: Result<ApiResponse, TransportError>,
    context: &RetryContext,
    base_delay: Duration,
) -> Outcome {
    let retryable = match result {
        Ok(response) if response.is_success() => return Outcome::Success(response),
        Ok(ref response) if response.status == UNAUTHORIZED && !context.refreshed => {
            return Outcome::Refresh
        },
        Ok(ref response) => response.status >= 500,
        Err(TransportError::Timeout | TransportError::Network(_)) => true,
        Err(TransportError::Setup(_)) => false,
    };
    if retryable && context.can_retry() {
        return Outcome::Retry { delay: backoff_delay(base_delay, context.attempt) };
    }
    Outcome::Fatal(
        match result {
            Ok(ref response) => ApiError::from_response(response),
            Err(e) => e.into(),
        }
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use super::*;

    const BASE: Duration = Duration::from_secs(1);

    fn status(status: u16) -> Result<ApiResponse, TransportError> {
        Ok(ApiResponse { status, body: Some(json!({ "error": "nope" })) })
    }

    #[test]
    fn backoff_doubles() {
        let delays: Vec<_> = (0..4).map(|attempt| backoff_delay(BASE, attempt)).collect();
        assert_eq!(
            delays,
            [1, 2, 4, 8].map(Duration::from_secs).to_vec(),
        );
        assert_eq!(backoff_delay(BASE, 64), BASE * u32::MAX);
    }

    #[test]
    fn success_passes_through() {
        let outcome = classify(status(201), &RetryContext::new(3), BASE);
        assert!(matches!(outcome, Outcome::Success(ApiResponse { status: 201, .. })), "{outcome:?}");
    }

    #[test]
    fn unauthorized_refreshes_once() {
        let outcome = classify(status(401), &RetryContext::new(3), BASE);
        assert!(matches!(outcome, Outcome::Refresh), "{outcome:?}");

        let outcome = classify(status(401), &RetryContext::without_refresh(3), BASE);
        assert!(
            matches!(outcome, Outcome::Fatal(ApiError::Rejected { status: 401, .. })),
            "{outcome:?}",
        );
    }

    #[test]
    fn refresh_is_checked_before_the_retry_budget() {
        let context = RetryContext { attempt: 3, max_attempts: 3, refreshed: false };
        assert!(matches!(classify(status(401), &context, BASE), Outcome::Refresh));
    }

    #[test]
    fn transient_failures_are_retried() {
        let context = RetryContext { attempt: 2, max_attempts: 3, refreshed: false };
        for result in [status(500), status(503), Err(TransportError::Timeout), Err(TransportError::Network("reset".into()))] {
            let outcome = classify(result, &context, BASE);
            assert!(
                matches!(outcome, Outcome::Retry { delay } if delay == Duration::from_secs(4)),
                "{outcome:?}",
            );
        }
    }

    #[test]
    fn exhausted_budget_is_fatal() {
        let context = RetryContext { attempt: 3, max_attempts: 3, refreshed: false };
        let outcome = classify(Err(TransportError::Timeout), &context, BASE);
        assert!(matches!(outcome, Outcome::Fatal(ApiError::Timeout)), "{outcome:?}");
        let outcome = classify(status(502), &context, BASE);
        assert!(matches!(outcome, Outcome::Fatal(ApiError::Server { status: 502 })), "{outcome:?}");
    }

    #[test]
    fn client_errors_are_not_retried() {
        let outcome = classify(status(400), &RetryContext::new(3), BASE);
        assert!(
            matches!(outcome, Outcome::Fatal(ApiError::Rejected { status: 400, ref message }) if message == "nope"),
            "{outcome:?}",
        );
    }
}
