// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Breadcrumb sinks
//!
//! The sink owns the enabled-types policy. Trackers always hand their
//! breadcrumbs over and never filter by type themselves.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::RwLock;

use super::event::{Breadcrumb, BreadcrumbMetadata, BreadcrumbType};
use crate::config::NetworkBreadcrumbsConfig;
use crate::error::Result;

/// Destination for breadcrumbs
pub trait BreadcrumbSink: Send + Sync {
    /// Record a breadcrumb, subject to the sink's enabled-types policy
    fn leave_breadcrumb(
        &self,
        message: &str,
        metadata: BreadcrumbMetadata,
        kind: BreadcrumbType,
    ) -> Result<()>;
}

impl<T: BreadcrumbSink + ?Sized> BreadcrumbSink for Arc<T> {
    fn leave_breadcrumb(
        &self,
        message: &str,
        metadata: BreadcrumbMetadata,
        kind: BreadcrumbType,
    ) -> Result<()> {
        (**self).leave_breadcrumb(message, metadata, kind)
    }
}

/// In-memory breadcrumb log with a bounded history
///
/// Clones share the same history.
#[derive(Clone)]
pub struct BreadcrumbLog {
    /// Recorded breadcrumbs, oldest first
    entries: Arc<RwLock<VecDeque<Breadcrumb>>>,
    /// Enabled types (`None` = all)
    enabled_types: Option<Vec<BreadcrumbType>>,
    /// Maximum breadcrumbs to keep
    max_breadcrumbs: usize,
}

impl Default for BreadcrumbLog {
    fn default() -> Self {
        Self::new()
    }
}

impl BreadcrumbLog {
    /// Create a log accepting every type
    pub fn new() -> Self {
        Self::from_config(&NetworkBreadcrumbsConfig::default())
    }

    /// Create a log using the config's type policy and capacity
    pub fn from_config(config: &NetworkBreadcrumbsConfig) -> Self {
        Self {
            entries: Arc::new(RwLock::new(VecDeque::new())),
            enabled_types: config.enabled_breadcrumb_types.clone(),
            max_breadcrumbs: config.max_breadcrumbs,
        }
    }

    /// Set enabled types
    pub fn enabled_types(mut self, types: Option<Vec<BreadcrumbType>>) -> Self {
        self.enabled_types = types;
        self
    }

    /// Set capacity
    pub fn max_breadcrumbs(mut self, max: usize) -> Self {
        self.max_breadcrumbs = max;
        self
    }

    /// Check whether a type is recorded
    pub fn is_type_enabled(&self, kind: BreadcrumbType) -> bool {
        self.enabled_types
            .as_ref()
            .map_or(true, |types| types.contains(&kind))
    }

    /// Snapshot of recorded breadcrumbs, oldest first
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.entries.read().iter().cloned().collect()
    }

    /// Breadcrumbs of a given type
    pub fn breadcrumbs_by_type(&self, kind: BreadcrumbType) -> Vec<Breadcrumb> {
        self.entries
            .read()
            .iter()
            .filter(|b| b.kind == kind)
            .cloned()
            .collect()
    }

    /// Number of recorded breadcrumbs
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop all breadcrumbs
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Export breadcrumbs as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.breadcrumbs())?)
    }
}

impl BreadcrumbSink for BreadcrumbLog {
    fn leave_breadcrumb(
        &self,
        message: &str,
        metadata: BreadcrumbMetadata,
        kind: BreadcrumbType,
    ) -> Result<()> {
        if !self.is_type_enabled(kind) || self.max_breadcrumbs == 0 {
            tracing::trace!(%kind, crumb = message, "Breadcrumb type disabled, dropping");
            return Ok(());
        }

        let mut entries = self.entries.write();
        while entries.len() >= self.max_breadcrumbs {
            entries.pop_front();
        }
        entries.push_back(Breadcrumb::new(kind, message, metadata));
        Ok(())
    }
}
