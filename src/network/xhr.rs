// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! XMLHttpRequest-style tracking
//!
//! [`XhrTracker`] wraps host request objects in a [`TrackedXhr`] decorator.
//! Every `open` records the request in a side-table keyed by [`RequestId`],
//! replacing any earlier method and URL. The first `open` also subscribes a
//! single listener to the object's terminal events. On the first load or
//! error event the listener checks the latest URL for exemption, emits at
//! most one breadcrumb and then unsubscribes.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;

use super::descriptor::Descriptor;
use super::emitter::{BreadcrumbEmitter, Outcome, RequestKind};
use super::filter::ExemptionFilter;

/// Warning logged when the side-table entry for a request has gone missing
pub const LOST_STATE_WARNING: &str =
    "The request URL is no longer present on this XMLHttpRequest. A breadcrumb cannot be left for this request.";

/// Terminal event fired by a request object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XhrEvent {
    /// Request completed; the host reports its status
    Load { status: Option<u16> },
    /// Network-level failure, no status
    Error,
}

/// What the host should do with a listener after invoking it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerAction {
    /// Keep receiving events
    Keep,
    /// Unsubscribe
    Remove,
}

/// Callback subscribed to a request object's terminal events
pub trait XhrListener: Send + Sync {
    fn handle_event(&self, event: XhrEvent) -> ListenerAction;
}

/// Imperative request object provided by the host
///
/// Hosts invoke every subscribed listener on each terminal event and drop
/// those returning [`ListenerAction::Remove`].
pub trait XmlHttpRequest: Send {
    /// Configure method and URL
    fn open(&mut self, method: &str, url: &str);

    /// Start the request
    fn send(&mut self, body: Option<Bytes>);

    /// Subscribe to terminal events
    fn add_event_listener(&mut self, listener: Arc<dyn XhrListener>);
}

/// Identity of a tracked request object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Side-table holding the descriptor of each opened, unfinished request
///
/// Clones share the same table. Hosts may detach entries out-of-band; the
/// tracker then logs [`LOST_STATE_WARNING`] instead of emitting.
#[derive(Debug, Clone, Default)]
pub struct RequestRegistry {
    entries: Arc<DashMap<RequestId, Descriptor>>,
}

impl RequestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a descriptor, returning the one it replaced
    fn attach(&self, id: RequestId, descriptor: Descriptor) -> Option<Descriptor> {
        self.entries.insert(id, descriptor)
    }

    /// Remove and return the descriptor for a request
    pub fn detach(&self, id: RequestId) -> Option<Descriptor> {
        self.entries.remove(&id).map(|(_, descriptor)| descriptor)
    }

    /// Descriptor of a pending request
    pub fn get(&self, id: RequestId) -> Option<Descriptor> {
        self.entries.get(&id).map(|entry| entry.value().clone())
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of pending requests
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tracking phase of a request object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingPhase {
    Unopened,
    Opened,
    Terminal,
}

/// Factory wrapping host request objects with breadcrumb tracking
#[derive(Clone)]
pub struct XhrTracker {
    registry: RequestRegistry,
    filter: Arc<ExemptionFilter>,
    emitter: BreadcrumbEmitter,
    next_id: Arc<AtomicU64>,
}

impl XhrTracker {
    pub fn new(filter: Arc<ExemptionFilter>, emitter: BreadcrumbEmitter) -> Self {
        Self {
            registry: RequestRegistry::new(),
            filter,
            emitter,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Wrap an existing request object
    pub fn wrap<R: XmlHttpRequest>(&self, inner: R) -> TrackedXhr<R> {
        let id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        TrackedXhr {
            inner,
            id,
            listener: None,
            tracker: self.clone(),
        }
    }

    /// Wrap a host constructor so every object it creates is tracked
    pub fn constructor<R, F>(&self, ctor: F) -> impl Fn() -> TrackedXhr<R>
    where
        R: XmlHttpRequest,
        F: Fn() -> R,
    {
        let tracker = self.clone();
        move || tracker.wrap(ctor())
    }

    /// The side-table of pending requests
    pub fn registry(&self) -> &RequestRegistry {
        &self.registry
    }
}

/// Listener subscribed on first `open`
struct TerminalListener {
    id: RequestId,
    registry: RequestRegistry,
    filter: Arc<ExemptionFilter>,
    emitter: BreadcrumbEmitter,
    finished: AtomicBool,
}

impl TerminalListener {
    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }
}

impl XhrListener for TerminalListener {
    fn handle_event(&self, event: XhrEvent) -> ListenerAction {
        if self.finished.swap(true, Ordering::AcqRel) {
            return ListenerAction::Remove;
        }

        let outcome = match event {
            XhrEvent::Load { status } => Outcome::from_status(status),
            XhrEvent::Error => Outcome::NetworkError,
        };

        match self.registry.detach(self.id) {
            Some(descriptor) if self.filter.is_exempt(&descriptor.url) => {
                tracing::debug!(request = %descriptor, "Exempt request, no breadcrumb");
            }
            Some(descriptor) => self.emitter.emit_guarded(RequestKind::Xhr, outcome, &descriptor),
            None => self.emitter.logger().warn(LOST_STATE_WARNING),
        }

        ListenerAction::Remove
    }
}

/// Request object decorated with breadcrumb tracking
pub struct TrackedXhr<R: XmlHttpRequest> {
    inner: R,
    id: RequestId,
    listener: Option<Arc<TerminalListener>>,
    tracker: XhrTracker,
}

impl<R: XmlHttpRequest> TrackedXhr<R> {
    /// Side-table key of this object
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Current tracking phase
    pub fn phase(&self) -> TrackingPhase {
        match &self.listener {
            None => TrackingPhase::Unopened,
            Some(listener) if listener.is_finished() => TrackingPhase::Terminal,
            Some(_) => TrackingPhase::Opened,
        }
    }

    /// The wrapped host object
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// The wrapped host object, mutably
    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    fn track(&mut self, method: &str, url: &str) {
        if self.phase() == TrackingPhase::Terminal {
            return;
        }

        let descriptor = Descriptor::new(method, url);
        tracing::trace!(request = %descriptor, id = ?self.id, "Tracking XMLHttpRequest");
        if let Some(previous) = self.tracker.registry.attach(self.id, descriptor) {
            tracing::trace!(previous = %previous, id = ?self.id, "Request re-opened");
        }

        if self.listener.is_none() {
            let listener = Arc::new(TerminalListener {
                id: self.id,
                registry: self.tracker.registry.clone(),
                filter: self.tracker.filter.clone(),
                emitter: self.tracker.emitter.clone(),
                finished: AtomicBool::new(false),
            });
            self.listener = Some(listener.clone());
            self.inner.add_event_listener(listener);
        }
    }
}

impl<R: XmlHttpRequest> XmlHttpRequest for TrackedXhr<R> {
    fn open(&mut self, method: &str, url: &str) {
        self.track(method, url);
        self.inner.open(method, url);
    }

    fn send(&mut self, body: Option<Bytes>) {
        self.inner.send(body);
    }

    fn add_event_listener(&mut self, listener: Arc<dyn XhrListener>) {
        self.inner.add_event_listener(listener);
    }
}

impl<R: XmlHttpRequest> Drop for TrackedXhr<R> {
    fn drop(&mut self) {
        // Abandoned requests never emit; their entry must not outlive them
        self.tracker.registry.detach(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breadcrumb::{BreadcrumbLog, BreadcrumbMetadata, BreadcrumbType};
    use crate::config::NetworkBreadcrumbsConfig;
    use crate::testing::{BrokenXhr, MockXhr, RecordingLogger};

    struct Harness {
        tracker: XhrTracker,
        log: BreadcrumbLog,
        logger: Arc<RecordingLogger>,
    }

    fn harness(config: NetworkBreadcrumbsConfig) -> Harness {
        let log = BreadcrumbLog::from_config(&config);
        let logger = Arc::new(RecordingLogger::default());
        let emitter = BreadcrumbEmitter::new(Arc::new(log.clone()), logger.clone());
        let filter = Arc::new(ExemptionFilter::from_config(&config));
        Harness {
            tracker: XhrTracker::new(filter, emitter),
            log,
            logger,
        }
    }

    #[test]
    fn test_successful_request() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let mut request = h.tracker.wrap(MockXhr::new());
        request.open("GET", "/");
        request.inner_mut().complete(Some(200));

        let crumbs = h.log.breadcrumbs();
        assert_eq!(crumbs.len(), 1);
        assert_eq!(crumbs[0].kind, BreadcrumbType::Request);
        assert_eq!(crumbs[0].message, "XMLHttpRequest succeeded");
        assert_eq!(
            crumbs[0].metadata,
            BreadcrumbMetadata::new("GET /").with_status(Some(200))
        );
        assert_eq!(request.phase(), TrackingPhase::Terminal);
    }

    #[test]
    fn test_send_delegates_to_host() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let mut request = h.tracker.wrap(MockXhr::responding(Some(201)));
        request.open("POST", "/items");
        request.send(Some(Bytes::from_static(b"{}")));

        assert_eq!(request.inner().opened_with(), Some(("POST".to_string(), "/items".to_string())));
        assert_eq!(h.log.breadcrumbs()[0].metadata.status, Some(201));
    }

    #[test]
    fn test_open_twice_leaves_one_breadcrumb() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let mut request = h.tracker.wrap(MockXhr::new());
        request.open("GET", "/");
        request.open("GET", "/");

        assert_eq!(request.inner().listener_count(), 1);
        request.inner_mut().complete(Some(200));
        assert_eq!(h.log.len(), 1);
    }

    #[test]
    fn test_reopen_reports_latest_method_and_url() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let mut request = h.tracker.wrap(MockXhr::new());
        request.open("GET", "/first");
        request.open("DELETE", "/second");

        assert_eq!(request.inner().listener_count(), 1);
        assert_eq!(h.tracker.registry().len(), 1);
        assert_eq!(
            h.tracker.registry().get(request.id()),
            Some(Descriptor::new("DELETE", "/second"))
        );

        request.inner_mut().complete(Some(200));
        let requests: Vec<_> = h
            .log
            .breadcrumbs()
            .into_iter()
            .map(|b| b.metadata.request)
            .collect();
        assert_eq!(requests, vec!["DELETE /second".to_string()]);
    }

    #[test]
    fn test_reopen_to_reserved_endpoint_leaves_no_breadcrumb() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let mut request = h.tracker.wrap(MockXhr::new());
        request.open("GET", "/a");
        request.open("POST", "https://notify.bugsnag.com");
        request.inner_mut().complete(Some(200));

        assert_eq!(
            request.inner().opened_with(),
            Some(("POST".to_string(), "https://notify.bugsnag.com".to_string()))
        );
        assert!(h.log.is_empty());
        assert!(h.logger.warnings().is_empty());
        assert!(h.tracker.registry().is_empty());
    }

    #[test]
    fn test_reopen_from_ignored_url_is_tracked() {
        let h = harness(NetworkBreadcrumbsConfig::new().ignore_url("/ignoreme"));
        let mut request = h.tracker.wrap(MockXhr::new());
        request.open("GET", "/ignoreme?token=1");
        request.open("GET", "/kept");
        request.inner_mut().fail();

        assert_eq!(h.log.len(), 1);
        assert_eq!(h.log.breadcrumbs()[0].metadata, BreadcrumbMetadata::new("GET /kept"));
    }

    #[test]
    fn test_open_after_terminal_event_is_ignored() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let mut request = h.tracker.wrap(MockXhr::new());
        request.open("GET", "/");
        request.inner_mut().complete(Some(200));
        request.open("GET", "/again");

        assert_eq!(request.phase(), TrackingPhase::Terminal);
        assert_eq!(request.inner().listener_count(), 0);
        assert!(h.tracker.registry().is_empty());
        assert_eq!(h.log.len(), 1);
    }

    #[test]
    fn test_exempt_request_reaches_terminal_phase() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let mut request = h.tracker.wrap(MockXhr::new());
        request.open("GET", "https://sessions.bugsnag.com");
        assert_eq!(request.phase(), TrackingPhase::Opened);

        request.inner_mut().complete(Some(202));
        assert_eq!(request.phase(), TrackingPhase::Terminal);
        assert!(h.log.is_empty());
    }

    #[test]
    fn test_failed_response() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let mut request = h.tracker.wrap(MockXhr::new());
        request.open("GET", "/this-does-not-exist");
        request.inner_mut().complete(Some(404));

        let crumbs = h.log.breadcrumbs();
        assert_eq!(crumbs.len(), 1);
        assert_eq!(crumbs[0].message, "XMLHttpRequest failed");
        assert_eq!(
            crumbs[0].metadata,
            BreadcrumbMetadata::new("GET /this-does-not-exist").with_status(Some(404))
        );
    }

    #[test]
    fn test_network_error() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let mut request = h.tracker.wrap(MockXhr::new());
        request.open("GET", "https://another-domain.xyz/");
        request.inner_mut().fail();

        let crumbs = h.log.breadcrumbs();
        assert_eq!(crumbs.len(), 1);
        assert_eq!(crumbs[0].message, "XMLHttpRequest error");
        assert_eq!(
            crumbs[0].metadata,
            BreadcrumbMetadata::new("GET https://another-domain.xyz/")
        );
    }

    #[test]
    fn test_listener_unsubscribes_after_first_terminal_event() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let mut request = h.tracker.wrap(MockXhr::new());
        request.open("GET", "/");
        request.inner_mut().complete(Some(200));
        request.inner_mut().fail();

        assert_eq!(request.inner().listener_count(), 0);
        assert_eq!(h.log.len(), 1);
        assert!(h.tracker.registry().is_empty());
    }

    #[test]
    fn test_reserved_endpoints_are_not_tracked() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let ctor = h.tracker.constructor(MockXhr::new);

        let mut notify = ctor();
        notify.open("GET", "https://notify.bugsnag.com");
        notify.inner_mut().complete(Some(200));

        let mut sessions = ctor();
        sessions.open("GET", "https://sessions.bugsnag.com");
        sessions.inner_mut().complete(Some(200));

        assert!(h.log.is_empty());
        assert_eq!(notify.inner().listener_count(), 0);
        assert!(h.logger.warnings().is_empty());
    }

    #[test]
    fn test_ignored_urls_strip_query_string() {
        let h = harness(NetworkBreadcrumbsConfig::new().ignore_url("/ignoreme"));
        let ctor = h.tracker.constructor(MockXhr::new);

        for url in ["/", "/ignoreme?123", "/ignoremeno"] {
            let mut request = ctor();
            request.open("GET", url);
            request.inner_mut().complete(Some(200));
        }

        let requests: Vec<_> = h
            .log
            .breadcrumbs()
            .into_iter()
            .map(|b| b.metadata.request)
            .collect();
        assert_eq!(requests, vec!["GET /".to_string(), "GET /ignoremeno".to_string()]);
    }

    #[test]
    fn test_lost_state_on_load() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let mut request = h.tracker.wrap(BrokenXhr::new(h.tracker.registry().clone()));
        request.open("GET", "/");
        request.inner_mut().complete(Some(200));

        assert!(h.log.is_empty());
        assert_eq!(h.logger.warnings(), vec![LOST_STATE_WARNING.to_string()]);
    }

    #[test]
    fn test_lost_state_on_error() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let mut request = h.tracker.wrap(BrokenXhr::new(h.tracker.registry().clone()));
        request.open("GET", "/");
        request.inner_mut().fail();

        assert!(h.log.is_empty());
        assert_eq!(h.logger.warnings(), vec![LOST_STATE_WARNING.to_string()]);
    }

    #[test]
    fn test_enabled_types_policy_applies() {
        let disabled = harness(NetworkBreadcrumbsConfig::new().enabled_breadcrumb_types(Some(vec![])));
        let mut request = disabled.tracker.wrap(MockXhr::new());
        request.open("GET", "/");
        request.inner_mut().complete(Some(200));
        assert!(disabled.log.is_empty());

        let enabled = harness(
            NetworkBreadcrumbsConfig::new().enabled_breadcrumb_types(Some(vec![BreadcrumbType::Request])),
        );
        let mut request = enabled.tracker.wrap(MockXhr::new());
        request.open("GET", "/");
        request.inner_mut().complete(Some(200));
        assert_eq!(enabled.log.len(), 1);

        let all = harness(NetworkBreadcrumbsConfig::new().enabled_breadcrumb_types(None));
        let mut request = all.tracker.wrap(MockXhr::new());
        request.open("GET", "/");
        request.inner_mut().complete(Some(200));
        assert_eq!(all.log.len(), 1);
    }

    #[test]
    fn test_abandoned_request_never_emits() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        {
            let mut request = h.tracker.wrap(MockXhr::new());
            request.open("GET", "/slow");
            assert_eq!(request.phase(), TrackingPhase::Opened);
            assert_eq!(h.tracker.registry().len(), 1);
        }

        assert!(h.tracker.registry().is_empty());
        assert!(h.log.is_empty());
    }

    #[test]
    fn test_phases() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let mut request = h.tracker.wrap(MockXhr::new());
        assert_eq!(request.phase(), TrackingPhase::Unopened);
        request.open("GET", "/");
        assert_eq!(request.phase(), TrackingPhase::Opened);
        assert_eq!(
            h.tracker.registry().get(request.id()),
            Some(Descriptor::new("GET", "/"))
        );
        request.inner_mut().fail();
        assert_eq!(request.phase(), TrackingPhase::Terminal);
    }

    #[test]
    fn test_distinct_ids() {
        let h = harness(NetworkBreadcrumbsConfig::default());
        let a = h.tracker.wrap(MockXhr::new());
        let b = h.tracker.wrap(MockXhr::new());
        assert_ne!(a.id(), b.id());
    }
}
