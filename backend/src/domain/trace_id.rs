//! Per-request correlation id shared by log events and error bodies.
//!
//! The `Trace` middleware installs one id per request in task-local storage.
//! Work moved onto a spawned task loses it unless wrapped in
//! [`TraceId::scope`] again.

use std::fmt;
use std::future::Future;

use uuid::Uuid;

/// Header echoing the request's trace id back to the client.
pub const TRACE_ID_HEADER: &str = "trace-id";

tokio::task_local! {
    static CURRENT: TraceId;
}

/// Random UUID identifying one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint a fresh id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Id of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `id` as the current trace id.
    ///
    /// # Examples
    /// ```
    /// use complaints::domain::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let id = TraceId::generate();
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    pub async fn scope<F: Future>(id: Self, fut: F) -> F::Output {
        CURRENT.scope(id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scoped_futures_see_their_id() {
        let id = TraceId::generate();
        assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    }

    #[tokio::test]
    async fn nothing_is_current_outside_a_request() {
        assert_eq!(TraceId::current(), None);
    }

    #[test]
    fn renders_as_a_hyphenated_uuid() {
        let rendered = TraceId::generate().to_string();
        assert!(Uuid::parse_str(&rendered).is_ok());
        assert_eq!(rendered.len(), 36);
    }
}
