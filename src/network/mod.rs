// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Network request interception and classification
//!
//! Two trackers share one pipeline: descriptor normalization, exemption
//! filtering and breadcrumb emission.

mod descriptor;
mod emitter;
mod fetch;
mod filter;
mod observer;
mod xhr;

pub use descriptor::{
    normalize, Descriptor, MethodOption, RequestInput, RequestObject, RequestOptions,
    DEFAULT_METHOD,
};
pub use emitter::{message, BreadcrumbEmitter, Outcome, RequestKind, FAILURE_STATUS_THRESHOLD};
pub use fetch::{fetch_fn, Fetch, FetchFn, FetchTracker, ResponseStatus, TrackedFetch};
pub use filter::ExemptionFilter;
pub use observer::NetworkBreadcrumbs;
pub use xhr::{
    ListenerAction, RequestId, RequestRegistry, TrackedXhr, TrackingPhase, XhrEvent, XhrListener,
    XhrTracker, XmlHttpRequest, LOST_STATE_WARNING,
};
