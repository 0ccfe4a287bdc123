// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Test doubles for host mechanisms, sinks and loggers

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;

use crate::breadcrumb::{BreadcrumbMetadata, BreadcrumbSink, BreadcrumbType, Logger};
use crate::error::{Error, Result};
use crate::network::{
    ListenerAction, RequestRegistry, ResponseStatus, XhrEvent, XhrListener, XmlHttpRequest,
};

/// Logger remembering every warning
#[derive(Default)]
pub struct RecordingLogger {
    warnings: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().clone()
    }
}

impl Logger for RecordingLogger {
    fn warn(&self, message: &str) {
        self.warnings.lock().push(message.to_string());
    }
}

/// Sink that always errors
pub struct FailingSink;

impl BreadcrumbSink for FailingSink {
    fn leave_breadcrumb(&self, _: &str, _: BreadcrumbMetadata, _: BreadcrumbType) -> Result<()> {
        Err(Error::sink("sink unavailable"))
    }
}

/// Sink that panics
pub struct PanickingSink;

impl BreadcrumbSink for PanickingSink {
    fn leave_breadcrumb(&self, _: &str, _: BreadcrumbMetadata, _: BreadcrumbType) -> Result<()> {
        panic!("sink exploded")
    }
}

/// Request object whose terminal events are fired by the test
#[derive(Default)]
pub struct MockXhr {
    listeners: Vec<Arc<dyn XhrListener>>,
    opened: Option<(String, String)>,
    respond_with: Option<Option<u16>>,
}

impl MockXhr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completes with `status` as soon as `send` is called
    pub fn responding(status: Option<u16>) -> Self {
        Self {
            respond_with: Some(status),
            ..Self::default()
        }
    }

    pub fn complete(&mut self, status: Option<u16>) {
        self.dispatch(XhrEvent::Load { status });
    }

    pub fn fail(&mut self) {
        self.dispatch(XhrEvent::Error);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn opened_with(&self) -> Option<(String, String)> {
        self.opened.clone()
    }

    fn dispatch(&mut self, event: XhrEvent) {
        self.listeners
            .retain(|listener| listener.handle_event(event) == ListenerAction::Keep);
    }
}

impl XmlHttpRequest for MockXhr {
    fn open(&mut self, method: &str, url: &str) {
        self.opened = Some((method.to_string(), url.to_string()));
    }

    fn send(&mut self, _body: Option<Bytes>) {
        if let Some(status) = self.respond_with {
            self.complete(status);
        }
    }

    fn add_event_listener(&mut self, listener: Arc<dyn XhrListener>) {
        self.listeners.push(listener);
    }
}

/// Host object that wipes tracking state when opened
pub struct BrokenXhr {
    inner: MockXhr,
    registry: RequestRegistry,
}

impl BrokenXhr {
    pub fn new(registry: RequestRegistry) -> Self {
        Self {
            inner: MockXhr::new(),
            registry,
        }
    }

    pub fn complete(&mut self, status: Option<u16>) {
        self.inner.complete(status);
    }

    pub fn fail(&mut self) {
        self.inner.fail();
    }
}

impl XmlHttpRequest for BrokenXhr {
    fn open(&mut self, method: &str, url: &str) {
        self.registry.clear();
        self.inner.open(method, url);
    }

    fn send(&mut self, body: Option<Bytes>) {
        self.inner.send(body);
    }

    fn add_event_listener(&mut self, listener: Arc<dyn XhrListener>) {
        self.inner.add_event_listener(listener);
    }
}

/// Resolved value of a mock fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    pub status: Option<u16>,
}

impl ResponseStatus for MockResponse {
    fn status(&self) -> Option<u16> {
        self.status
    }
}

/// Rejection of a mock fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockFetchError(pub &'static str);
