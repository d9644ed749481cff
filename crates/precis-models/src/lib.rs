//! # precis-models
//!
//! HTTP implementations of the capability traits from `precis-core`:
//!
//! - [`HttpSummarizationModel`]: `POST {base_url}/summarize`
//! - [`HttpEntityModel`]: `POST {base_url}/entities`
//!
//! Both apply a per-request timeout, send an optional bearer token, and
//! retry timeouts, transport failures, 429 and 5xx replies with capped
//! exponential backoff (see [`retry`]).

#![deny(unsafe_code)]

mod client;
pub mod entities;
pub mod retry;
pub mod summarization;

pub use client::HttpModelConfig;
pub use entities::HttpEntityModel;
pub use retry::{RetryPolicy, backoff_delay, with_retry};
pub use summarization::HttpSummarizationModel;
