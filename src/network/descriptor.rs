// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request descriptors
//!
//! `fetch`-style calls accept a URL string, a missing value or a structured
//! request object, optionally followed by an options bag. [`normalize`]
//! reduces every shape to a canonical [`Descriptor`] without ever failing.

use std::fmt;

use bytes::Bytes;

use crate::http::Request;

/// Default method when nothing else supplies one
pub const DEFAULT_METHOD: &str = "GET";

/// Canonical `{method, url}` pair used for formatting and exemption matching
///
/// The url is opaque: it is never parsed or validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Descriptor {
    pub method: String,
    pub url: String,
}

impl Descriptor {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
        }
    }

    /// `"<METHOD> <URL>"`
    pub fn request_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Structured request object carrying its own url and method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestObject {
    pub url: String,
    pub method: String,
}

impl RequestObject {
    /// Request object with the default method
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: DEFAULT_METHOD.to_string(),
        }
    }

    /// Set the method
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }
}

impl From<&Request> for RequestObject {
    fn from(request: &Request) -> Self {
        Self {
            url: request.url.to_string(),
            method: request.method.to_string(),
        }
    }
}

/// First argument of a fetch-style call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestInput {
    /// Plain URL string, kept verbatim
    Url(String),
    /// Explicit null
    Null,
    /// Missing argument
    Undefined,
    /// Structured request object
    Request(RequestObject),
}

impl From<&str> for RequestInput {
    fn from(url: &str) -> Self {
        RequestInput::Url(url.to_string())
    }
}

impl From<String> for RequestInput {
    fn from(url: String) -> Self {
        RequestInput::Url(url)
    }
}

impl From<Option<String>> for RequestInput {
    fn from(url: Option<String>) -> Self {
        url.map_or(RequestInput::Null, RequestInput::Url)
    }
}

impl From<RequestObject> for RequestInput {
    fn from(request: RequestObject) -> Self {
        RequestInput::Request(request)
    }
}

impl From<&Request> for RequestInput {
    fn from(request: &Request) -> Self {
        RequestInput::Request(request.into())
    }
}

/// The `method` field of an options bag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MethodOption {
    /// Field not present
    #[default]
    Absent,
    /// Present but undefined
    Undefined,
    /// Present and explicitly null
    Null,
    /// Present with a value
    Value(String),
}

/// Options bag accompanying a fetch-style call
///
/// Only `method` takes part in normalization; headers and body are passed
/// through to the host untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    pub method: MethodOption,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit method
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = MethodOption::Value(method.into());
        self
    }

    /// Set the method field to null
    pub fn null_method(mut self) -> Self {
        self.method = MethodOption::Null;
        self
    }

    /// Set the method field to undefined
    pub fn undefined_method(mut self) -> Self {
        self.method = MethodOption::Undefined;
        self
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Reduce a fetch-style argument pair to its canonical descriptor
pub fn normalize(input: &RequestInput, options: Option<&RequestOptions>) -> Descriptor {
    let (mut method, url) = match input {
        RequestInput::Request(request) => (request.method.clone(), request.url.clone()),
        RequestInput::Url(url) => (DEFAULT_METHOD.to_string(), url.clone()),
        RequestInput::Null => (DEFAULT_METHOD.to_string(), "null".to_string()),
        RequestInput::Undefined => (DEFAULT_METHOD.to_string(), "undefined".to_string()),
    };

    if let Some(options) = options {
        match options.method {
            MethodOption::Value(ref value) => method = value.clone(),
            MethodOption::Null => method = "null".to_string(),
            MethodOption::Undefined | MethodOption::Absent => {}
        }
    }

    Descriptor { method, url }
}
