//! # Request Metrics
//!
//! Lightweight in-process counters using atomics, rendered as plain text
//! at `/metrics` in Prometheus exposition format.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Shared metrics state.
#[derive(Debug, Clone, Default)]
pub struct ApiMetrics {
    request_count: Arc<AtomicU64>,
    error_count: Arc<AtomicU64>,
    accepted_count: Arc<AtomicU64>,
    rejected_count: Arc<AtomicU64>,
}

impl ApiMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests seen by the metrics middleware.
    pub fn requests(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Responses with a 4xx or 5xx status.
    pub fn errors(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Submissions that passed every rule.
    pub fn accepted(&self) -> u64 {
        self.accepted_count.load(Ordering::Relaxed)
    }

    /// Submissions rejected with field errors.
    pub fn rejected(&self) -> u64 {
        self.rejected_count.load(Ordering::Relaxed)
    }

    pub fn record_accepted(&self) {
        self.accepted_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.rejected_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Prometheus text exposition of all counters.
    pub fn render(&self) -> String {
        format!(
            "# TYPE fpage_http_requests_total counter\n\
             fpage_http_requests_total {}\n\
             # TYPE fpage_http_errors_total counter\n\
             fpage_http_errors_total {}\n\
             # TYPE fpage_submissions_accepted_total counter\n\
             fpage_submissions_accepted_total {}\n\
             # TYPE fpage_submissions_rejected_total counter\n\
             fpage_submissions_rejected_total {}\n",
            self.requests(),
            self.errors(),
            self.accepted(),
            self.rejected(),
        )
    }
}

/// Middleware that increments request and error counters.
pub async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    let m = &state.metrics;
    m.request_count.fetch_add(1, Ordering::Relaxed);
    if response.status().is_server_error() || response.status().is_client_error() {
        m.error_count.fetch_add(1, Ordering::Relaxed);
    }

    response
}

/// GET /metrics
pub async fn render(State(state): State<AppState>) -> String {
    state.metrics.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let m = ApiMetrics::new();
        assert_eq!(m.requests(), 0);
        assert_eq!(m.errors(), 0);
        assert_eq!(m.accepted(), 0);
        assert_eq!(m.rejected(), 0);
    }

    #[test]
    fn clones_share_counters() {
        let m = ApiMetrics::new();
        let clone = m.clone();
        clone.record_accepted();
        clone.record_rejected();
        clone.record_rejected();
        assert_eq!(m.accepted(), 1);
        assert_eq!(m.rejected(), 2);
    }

    #[test]
    fn render_lists_every_counter() {
        let m = ApiMetrics::new();
        m.record_accepted();
        let text = m.render();
        assert!(text.contains("fpage_submissions_accepted_total 1\n"));
        assert!(text.contains("fpage_http_requests_total 0\n"));
        assert!(text.contains("fpage_submissions_rejected_total 0\n"));
    }
}
