// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! fetch()-style tracking
//!
//! [`TrackedFetch`] decorates any [`Fetch`] implementation: it normalizes
//! the call arguments, delegates unchanged, classifies the result and hands
//! back exactly what the wrapped mechanism produced.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use super::descriptor::{normalize, RequestInput, RequestOptions};
use super::emitter::{BreadcrumbEmitter, Outcome, RequestKind};
use super::filter::ExemptionFilter;
use crate::error::Error;
use crate::http::{HttpClient, Response};

/// Response types exposing an HTTP status
pub trait ResponseStatus {
    fn status(&self) -> Option<u16>;
}

impl ResponseStatus for Response {
    fn status(&self) -> Option<u16> {
        Some(self.status_code())
    }
}

/// Deferred request mechanism provided by the host
#[async_trait]
pub trait Fetch: Send + Sync {
    type Response: ResponseStatus + Send;
    type Error: Send;

    async fn fetch(
        &self,
        input: RequestInput,
        options: Option<RequestOptions>,
    ) -> Result<Self::Response, Self::Error>;
}

/// [`Fetch`] implemented by an async function
#[derive(Clone)]
pub struct FetchFn<F>(F);

/// Turn an async function into a [`Fetch`] mechanism
pub fn fetch_fn<F, Fut, T, E>(f: F) -> FetchFn<F>
where
    F: Fn(RequestInput, Option<RequestOptions>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send,
    T: ResponseStatus + Send,
    E: Send,
{
    FetchFn(f)
}

#[async_trait]
impl<F, Fut, T, E> Fetch for FetchFn<F>
where
    F: Fn(RequestInput, Option<RequestOptions>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send,
    T: ResponseStatus + Send,
    E: Send,
{
    type Response = T;
    type Error = E;

    async fn fetch(
        &self,
        input: RequestInput,
        options: Option<RequestOptions>,
    ) -> Result<T, E> {
        (self.0)(input, options).await
    }
}

#[async_trait]
impl Fetch for HttpClient {
    type Response = Response;
    type Error = Error;

    async fn fetch(
        &self,
        input: RequestInput,
        options: Option<RequestOptions>,
    ) -> Result<Response, Error> {
        let descriptor = normalize(&input, options.as_ref());
        let request = self.request_for(&descriptor, options)?;
        self.execute(request).await
    }
}

/// Factory wrapping fetch mechanisms with breadcrumb tracking
#[derive(Clone)]
pub struct FetchTracker {
    filter: Arc<ExemptionFilter>,
    emitter: BreadcrumbEmitter,
}

impl FetchTracker {
    pub fn new(filter: Arc<ExemptionFilter>, emitter: BreadcrumbEmitter) -> Self {
        Self { filter, emitter }
    }

    /// Wrap a fetch mechanism
    pub fn wrap<F: Fetch>(&self, inner: F) -> TrackedFetch<F> {
        TrackedFetch {
            inner,
            filter: self.filter.clone(),
            emitter: self.emitter.clone(),
        }
    }
}

/// Fetch mechanism decorated with breadcrumb tracking
pub struct TrackedFetch<F> {
    inner: F,
    filter: Arc<ExemptionFilter>,
    emitter: BreadcrumbEmitter,
}

impl<F> TrackedFetch<F> {
    /// The wrapped mechanism
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Unwrap, dropping the instrumentation
    pub fn into_inner(self) -> F {
        self.inner
    }
}

#[async_trait]
impl<F: Fetch> Fetch for TrackedFetch<F> {
    type Response = F::Response;
    type Error = F::Error;

    async fn fetch(
        &self,
        input: RequestInput,
        options: Option<RequestOptions>,
    ) -> Result<F::Response, F::Error> {
        let descriptor = normalize(&input, options.as_ref());
        let exempt = self.filter.is_exempt(&descriptor.url);
        if exempt {
            tracing::debug!(request = %descriptor, "Exempt request, not tracking");
        }

        let result = self.inner.fetch(input, options).await;

        if !exempt {
            let outcome = match result {
                Ok(ref response) => Outcome::from_status(response.status()),
                Err(_) => Outcome::NetworkError,
            };
            self.emitter.emit_guarded(RequestKind::Fetch, outcome, &descriptor);
        }

        result
    }
}
