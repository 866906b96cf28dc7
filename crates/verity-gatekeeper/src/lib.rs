//! Verity Gatekeeper
//!
//! Sliding-window admission control per requester identity.
//!
//! The gatekeeper is the only state shared across concurrent requests. It
//! is an explicitly owned object injected into the pipeline, never ambient
//! global state, and a single mutex over the identity map makes each
//! check-and-record an atomic unit.
//!
//! # Examples
//!
//! ```
//! use verity_gatekeeper::{RateLimiter, RateLimiterConfig};
//!
//! let limiter = RateLimiter::new(RateLimiterConfig::default());
//! assert!(limiter.admit("user:42"));
//! assert_eq!(limiter.remaining("user:42"), 14);
//! ```

#![warn(missing_docs)]

mod config;
mod limiter;

pub use config::RateLimiterConfig;
pub use limiter::RateLimiter;
