// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Breadcrumb construction and hand-off to the sink

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::descriptor::Descriptor;
use crate::breadcrumb::{BreadcrumbMetadata, BreadcrumbSink, BreadcrumbType, Logger};
use crate::error::{Error, Result};

/// Statuses at or above this are failures
pub const FAILURE_STATUS_THRESHOLD: u16 = 400;

/// Which request mechanism produced the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Imperative, event-driven request object
    Xhr,
    /// Single async call
    Fetch,
}

impl RequestKind {
    fn label(&self) -> &'static str {
        match self {
            RequestKind::Xhr => "XMLHttpRequest",
            RequestKind::Fetch => "fetch()",
        }
    }
}

/// Terminal outcome of a tracked request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Completed with a non-error status (or none reported)
    Success { status: Option<u16> },
    /// Completed with an error status
    Failure { status: u16 },
    /// No response at all
    NetworkError,
}

impl Outcome {
    /// Classify a completed request by its status
    pub fn from_status(status: Option<u16>) -> Self {
        match status {
            Some(status) if status >= FAILURE_STATUS_THRESHOLD => Outcome::Failure { status },
            status => Outcome::Success { status },
        }
    }

    /// Status carried by this outcome
    pub fn status(&self) -> Option<u16> {
        match *self {
            Outcome::Success { status } => status,
            Outcome::Failure { status } => Some(status),
            Outcome::NetworkError => None,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Outcome::Success { .. } => "succeeded",
            Outcome::Failure { .. } => "failed",
            Outcome::NetworkError => "error",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// Breadcrumb message for a kind/outcome pair
pub fn message(kind: RequestKind, outcome: Outcome) -> String {
    format!("{} {}", kind.label(), outcome.verb())
}

/// Builds request breadcrumbs and hands them to the sink
#[derive(Clone)]
pub struct BreadcrumbEmitter {
    sink: Arc<dyn BreadcrumbSink>,
    logger: Arc<dyn Logger>,
}

impl BreadcrumbEmitter {
    pub fn new(sink: Arc<dyn BreadcrumbSink>, logger: Arc<dyn Logger>) -> Self {
        Self { sink, logger }
    }

    /// Logger shared with the trackers
    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }

    /// Build and send a breadcrumb, returning any sink failure
    pub fn emit(&self, kind: RequestKind, outcome: Outcome, descriptor: &Descriptor) -> Result<()> {
        let metadata =
            BreadcrumbMetadata::new(descriptor.request_line()).with_status(outcome.status());
        let message = message(kind, outcome);

        tracing::debug!(request = %descriptor, %outcome, "Leaving request breadcrumb");
        self.sink
            .leave_breadcrumb(&message, metadata, BreadcrumbType::Request)
    }

    /// Like [`emit`](Self::emit), but failures and panics in the sink are
    /// reported to the logger instead of the caller
    pub fn emit_guarded(&self, kind: RequestKind, outcome: Outcome, descriptor: &Descriptor) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.emit(kind, outcome, descriptor)))
            .unwrap_or_else(|_| Err(Error::sink("breadcrumb sink panicked")));

        if let Err(e) = result {
            self.logger
                .warn(&format!("Failed to leave a breadcrumb for {}: {}", descriptor, e));
        }
    }
}
