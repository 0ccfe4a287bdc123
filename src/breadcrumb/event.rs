// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Breadcrumb event types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Breadcrumb category, used by the enabled-types policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreadcrumbType {
    /// Page or route change
    Navigation,
    /// Outbound network request
    Request,
    /// Process or lifecycle change
    Process,
    /// Console or log output
    Log,
    /// User interaction
    User,
    /// Application state change
    State,
    /// Error reported earlier
    Error,
    /// Left explicitly by application code
    Manual,
}

impl BreadcrumbType {
    /// All known breadcrumb types
    pub const ALL: [BreadcrumbType; 8] = [
        BreadcrumbType::Navigation,
        BreadcrumbType::Request,
        BreadcrumbType::Process,
        BreadcrumbType::Log,
        BreadcrumbType::User,
        BreadcrumbType::State,
        BreadcrumbType::Error,
        BreadcrumbType::Manual,
    ];

    /// Wire name of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            BreadcrumbType::Navigation => "navigation",
            BreadcrumbType::Request => "request",
            BreadcrumbType::Process => "process",
            BreadcrumbType::Log => "log",
            BreadcrumbType::User => "user",
            BreadcrumbType::State => "state",
            BreadcrumbType::Error => "error",
            BreadcrumbType::Manual => "manual",
        }
    }
}

impl fmt::Display for BreadcrumbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BreadcrumbType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BreadcrumbType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| Error::other(format!("Unknown breadcrumb type: {}", s)))
    }
}

/// Metadata attached to a request breadcrumb
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbMetadata {
    /// `"<METHOD> <URL>"`
    pub request: String,
    /// HTTP status, absent for network errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl BreadcrumbMetadata {
    /// Create metadata for a request
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            status: None,
        }
    }

    /// Attach a status code
    pub fn with_status(mut self, status: Option<u16>) -> Self {
        self.status = status;
        self
    }
}

/// A recorded breadcrumb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Breadcrumb type
    #[serde(rename = "type")]
    pub kind: BreadcrumbType,
    /// Human readable message
    pub message: String,
    /// Structured metadata
    pub metadata: BreadcrumbMetadata,
    /// When the breadcrumb was recorded
    pub timestamp: DateTime<Utc>,
}

impl Breadcrumb {
    /// Create a new breadcrumb stamped with the current time
    pub fn new(kind: BreadcrumbType, message: impl Into<String>, metadata: BreadcrumbMetadata) -> Self {
        Self {
            kind,
            message: message.into(),
            metadata,
            timestamp: Utc::now(),
        }
    }
}
