//! Retry and backoff policy for single-file fetches.
//!
//! The default policy never retries: a failed GET is recorded in the batch
//! report and enumeration moves on. Callers that want resilience configure
//! a `[retry]` section (see `config::RetryConfig`) and get capped exponential
//! backoff for timeouts, connection failures, throttling and 5xx responses.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
