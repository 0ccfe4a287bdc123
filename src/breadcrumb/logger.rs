// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Logger used for non-fatal instrumentation failures

/// Receives warnings about instrumentation that could not complete
pub trait Logger: Send + Sync {
    /// Report a non-fatal problem
    fn warn(&self, message: &str);
}

/// Logger that forwards to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "netcrumb", "{}", message);
    }
}
