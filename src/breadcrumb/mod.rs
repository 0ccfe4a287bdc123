// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Breadcrumb types, sinks and logging
//!
//! A breadcrumb is a short audit record kept ahead of an error report so the
//! recent activity of the application can be reconstructed.

mod event;
mod logger;
mod sink;

pub use event::{Breadcrumb, BreadcrumbMetadata, BreadcrumbType};
pub use logger::{Logger, TracingLogger};
pub use sink::{BreadcrumbLog, BreadcrumbSink};
