//! Caller-side retry.
//!
//! The transport never retries on its own; services that want bounded
//! retries (connector writes) wrap their calls in a [`RetryExecutor`].

mod retry;

pub use retry::{
    DefaultRetryHook, RetryConfig, RetryContext, RetryDecision, RetryExecutor, RetryHook,
};
