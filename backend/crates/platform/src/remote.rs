//! Resilient Remote Caller
//!
//! Every call to a peer service goes through [`RemoteCaller`], which applies a
//! bounded retry policy and folds every possible outcome into a
//! [`RemoteResult`]: the orchestration layer never sees a transport error.
//!
//! ## Classification
//! - 2xx with a body: `Success`
//! - 404: `NotFound`, returned at once
//! - 5xx or transport failure: retried, then `Unavailable`
//! - any other status: `Unavailable`, not retried
//!
//! A caller blocks for the whole retry budget before seeing `Unavailable`.
//! Policies are plain values; construct one per dependency and hand it to the
//! caller that owns that dependency.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

use crate::client::BearerToken;
use crate::transport::{Method, RemoteRequest, RemoteResponse, Transport};

/// Peer services the core depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
    User,
    Course,
    Enrollment,
}

impl Dependency {
    pub const fn name(&self) -> &'static str {
        match self {
            Dependency::User => "user",
            Dependency::Course => "course",
            Dependency::Enrollment => "enrollment",
        }
    }

    /// Fixed message returned to clients when this dependency is down
    pub const fn unavailable_message(&self) -> &'static str {
        match self {
            Dependency::User => "User service unavailable",
            Dependency::Course => "Course service unavailable",
            Dependency::Enrollment => "Enrollment service unavailable",
        }
    }

    pub const fn advisory(&self) -> &'static str {
        match self {
            Dependency::User => "All operations suspended until user service is restored",
            Dependency::Course => "All operations suspended until course service is restored",
            Dependency::Enrollment => {
                "All operations suspended until enrollment service is restored"
            }
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tri-state outcome of a peer call.
///
/// Branch on the variant. `NotFound` carries no entity; use
/// [`RemoteResult::or_sentinel`] only to render a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum RemoteResult<T> {
    Success(T),
    NotFound,
    Unavailable,
}

impl<T> RemoteResult<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteResult<U> {
        match self {
            RemoteResult::Success(value) => RemoteResult::Success(f(value)),
            RemoteResult::NotFound => RemoteResult::NotFound,
            RemoteResult::Unavailable => RemoteResult::Unavailable,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RemoteResult::Success(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteResult::NotFound)
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, RemoteResult::Unavailable)
    }

    pub fn success(self) -> Option<T> {
        match self {
            RemoteResult::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Value for display: the entity, its placeholder when not found, or
    /// `None` when the dependency was unavailable.
    pub fn or_sentinel(self) -> Option<T>
    where
        T: Sentinel,
    {
        match self {
            RemoteResult::Success(value) => Some(value),
            RemoteResult::NotFound => Some(T::sentinel()),
            RemoteResult::Unavailable => None,
        }
    }
}

/// Placeholder rendered for an entity a peer reported as missing (id 0).
pub trait Sentinel {
    fn sentinel() -> Self;
}

/// Bounded retry with capped exponential backoff
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub initial_backoff: Duration,
    /// Upper bound for any delay
    pub max_backoff: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(2),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// No delay between attempts (tests, local tooling)
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            multiplier: 1.0,
        }
    }

    /// Delay after the given failed attempt (1-indexed)
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16) as i32;
        let scaled = self.initial_backoff.as_secs_f64() * self.multiplier.powi(exponent);
        let capped = scaled.min(self.max_backoff.as_secs_f64());
        if capped.is_finite() && capped > 0.0 {
            Duration::from_secs_f64(capped)
        } else {
            Duration::ZERO
        }
    }

    /// Sum of all delays a fully failing call waits
    pub fn worst_case_wait(&self) -> Duration {
        (1..self.max_attempts.max(1)).map(|a| self.backoff_after(a)).sum()
    }
}

enum Attempt {
    Done(RemoteResult<Vec<u8>>),
    Retry,
}

/// Resilient caller bound to one dependency
#[derive(Clone)]
pub struct RemoteCaller<T> {
    dependency: Dependency,
    transport: T,
    policy: RetryPolicy,
}

impl<T> RemoteCaller<T>
where
    T: Transport + Sync,
{
    pub fn new(dependency: Dependency, transport: T, policy: RetryPolicy) -> Self {
        Self {
            dependency,
            transport,
            policy,
        }
    }

    pub fn dependency(&self) -> Dependency {
        self.dependency
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// GET a JSON body. An empty 2xx body counts as `Unavailable`.
    pub async fn get_json<R>(&self, path: &str, bearer: &BearerToken) -> RemoteResult<R>
    where
        R: DeserializeOwned + Send,
    {
        let request = RemoteRequest {
            method: Method::Get,
            path: path.to_string(),
            body: None,
            bearer: bearer.clone(),
        };

        match self.execute(request).await {
            RemoteResult::Success(body) if body.is_empty() => {
                tracing::warn!(dependency = %self.dependency, path, "Empty body from peer");
                RemoteResult::Unavailable
            }
            RemoteResult::Success(body) => self.decode(path, &body),
            RemoteResult::NotFound => RemoteResult::NotFound,
            RemoteResult::Unavailable => RemoteResult::Unavailable,
        }
    }

    /// POST a JSON body; any 2xx counts as success and the reply is ignored.
    pub async fn post_json<B>(&self, path: &str, body: &B, bearer: &BearerToken) -> RemoteResult<()>
    where
        B: Serialize + Sync + ?Sized,
    {
        let payload = match serde_json::to_vec(body) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(dependency = %self.dependency, path, error = %e, "Failed to encode request body");
                return RemoteResult::Unavailable;
            }
        };

        let request = RemoteRequest {
            method: Method::Post,
            path: path.to_string(),
            body: Some(payload),
            bearer: bearer.clone(),
        };

        self.execute(request).await.map(|_| ())
    }

    async fn execute(&self, request: RemoteRequest) -> RemoteResult<Vec<u8>> {
        let max_attempts = self.policy.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.attempt(&request, attempt).await {
                Attempt::Done(result) => return result,
                Attempt::Retry if attempt < max_attempts => {
                    let delay = self.policy.backoff_after(attempt);
                    tracing::debug!(
                        dependency = %self.dependency,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying peer call"
                    );
                    tokio::time::sleep(delay).await;
                }
                Attempt::Retry => {}
            }
        }

        tracing::error!(
            dependency = %self.dependency,
            path = %request.path,
            attempts = max_attempts,
            "Peer unavailable after retries"
        );
        RemoteResult::Unavailable
    }

    async fn attempt(&self, request: &RemoteRequest, attempt: u32) -> Attempt {
        match self.transport.send(request).await {
            Ok(response) => self.classify(&request.path, response),
            Err(e) => {
                tracing::warn!(dependency = %self.dependency, attempt, error = %e, "Peer call failed");
                Attempt::Retry
            }
        }
    }

    fn classify(&self, path: &str, response: RemoteResponse) -> Attempt {
        match response.status {
            _ if response.is_success() => Attempt::Done(RemoteResult::Success(response.body)),
            404 => {
                tracing::warn!(dependency = %self.dependency, path, "Peer reported not found");
                Attempt::Done(RemoteResult::NotFound)
            }
            status if status >= 500 => {
                tracing::warn!(dependency = %self.dependency, path, status, "Peer server error");
                Attempt::Retry
            }
            status => {
                tracing::warn!(dependency = %self.dependency, path, status, "Unexpected status from peer");
                Attempt::Done(RemoteResult::Unavailable)
            }
        }
    }

    fn decode<R: DeserializeOwned>(&self, path: &str, body: &[u8]) -> RemoteResult<R> {
        match serde_json::from_slice(body) {
            Ok(value) => RemoteResult::Success(value),
            Err(e) => {
                tracing::warn!(dependency = %self.dependency, path, error = %e, "Undecodable peer response");
                RemoteResult::Unavailable
            }
        }
    }
}
