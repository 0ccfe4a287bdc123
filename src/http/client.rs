// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation

use std::time::{Duration, Instant};

use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use url::Url;

use super::request::Request;
use super::response::Response;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, Result};
use crate::network::{Descriptor, RequestOptions};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Default timeout
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
    /// Default headers
    pub default_headers: HeaderMap,
    /// Base URL that relative request URLs are resolved against
    pub base_url: Option<Url>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            default_headers: HeaderMap::new(),
            base_url: None,
        }
    }
}

impl HttpClientConfig {
    /// Set the base URL for relative requests
    pub fn base_url(mut self, base: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(base.as_ref())?);
        Ok(self)
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client acting as the host `fetch` mechanism
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(Policy::limited(config.max_redirects))
            .default_headers(config.default_headers.clone())
            .build()?;

        Ok(Self { client, config })
    }

    /// Resolve a possibly relative URL against the configured base
    pub fn resolve_url(&self, url: &str) -> Result<Url> {
        match Url::parse(url) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => match self.config.base_url {
                Some(ref base) => Ok(base.join(url)?),
                None => Err(Error::invalid_request(
                    "",
                    url,
                    "relative URL without a base URL",
                )),
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Build a request from a normalized descriptor and its options
    pub fn request_for(
        &self,
        descriptor: &Descriptor,
        options: Option<RequestOptions>,
    ) -> Result<Request> {
        let method = Method::from_bytes(descriptor.method.as_bytes()).map_err(|e| {
            Error::invalid_request(&descriptor.method, &descriptor.url, e.to_string())
        })?;
        let url = self.resolve_url(&descriptor.url).map_err(|e| match e {
            Error::InvalidRequest { url, reason, .. } => {
                Error::invalid_request(&descriptor.method, url, reason)
            }
            other => other,
        })?;

        let mut request = Request::with_url(method, url);
        if let Some(options) = options {
            for (name, value) in &options.headers {
                request = request.header(name, value);
            }
            if let Some(body) = options.body {
                request = request.body(body);
            }
        }
        Ok(request)
    }

    /// Execute a request
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let start = Instant::now();

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let response_time = start.elapsed().as_millis() as u64;

        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(Response::new(status, headers, body, final_url, response_time))
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}
