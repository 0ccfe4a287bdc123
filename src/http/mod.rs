// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client layer
//!
//! A reqwest-backed client that serves as a real `fetch` host mechanism for
//! the [`FetchTracker`](crate::network::FetchTracker).

mod client;
mod request;
mod response;

pub use client::{HttpClient, HttpClientConfig};
pub use request::Request;
pub use response::Response;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("netcrumb/", env!("CARGO_PKG_VERSION"));
