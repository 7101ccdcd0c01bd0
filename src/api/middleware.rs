//! API Middleware (Rate Limiting, Logging)

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::types::ApiError;
use crate::models::config::ServiceConfig;
use crate::models::errors::ErrorCode;

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests per window
    pub requests_per_window: u32,
    /// Window duration
    pub window_duration: Duration,
}

impl From<&ServiceConfig> for RateLimitConfig {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            requests_per_window: config.rate_limit_per_window,
            window_duration: config.rate_limit_window,
        }
    }
}

/// In-memory fixed-window rate limiter keyed by client address
pub struct RateLimiter {
    requests: DashMap<String, (u32, Instant)>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            requests: DashMap::new(),
            config,
        }
    }

    /// Check if request is allowed, returns (allowed, remaining, reset_seconds)
    pub fn check(&self, key: &str) -> (bool, u32, u64) {
        let now = Instant::now();

        let mut entry = self.requests.entry(key.to_string()).or_insert((0, now));

        // Reset window if expired
        if now.duration_since(entry.1) > self.config.window_duration {
            entry.0 = 0;
            entry.1 = now;
        }

        let reset_secs = self
            .config
            .window_duration
            .saturating_sub(now.duration_since(entry.1))
            .as_secs();

        if entry.0 >= self.config.requests_per_window {
            return (false, 0, reset_secs);
        }

        entry.0 += 1;
        let remaining = self.config.requests_per_window - entry.0;
        (true, remaining, reset_secs)
    }

    /// Drop clients idle for two windows
    pub fn cleanup(&self) {
        let now = Instant::now();
        let horizon = self.config.window_duration * 2;
        self.requests
            .retain(|_, (_, started)| now.duration_since(*started) < horizon);
    }

    pub fn tracked_clients(&self) -> usize {
        self.requests.len()
    }

    pub fn window(&self) -> Duration {
        self.config.window_duration
    }
}

/// Periodically evict idle clients from the limiter
pub fn start_cleanup_task(limiter: Arc<RateLimiter>) -> JoinHandle<()> {
    let period = limiter.window().max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            limiter.cleanup();
            debug!(clients = limiter.tracked_clients(), "rate limiter cleanup");
        }
    })
}

fn is_health_path(path: &str) -> bool {
    path == "/health" || path == "/v1/health"
}

/// Client identity: first forwarded address, then real IP, else "unknown"
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| {
            headers
                .get("X-Real-IP")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Rate limiting middleware
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    // Skip rate limiting for health check
    if is_health_path(request.uri().path()) {
        return next.run(request).await;
    }

    let rate_key = client_key(&headers);
    let (allowed, remaining, reset) = limiter.check(&rate_key);

    if !allowed {
        warn!(key = %rate_key, "Rate limit exceeded");
        let mut response = ApiError::new(
            ErrorCode::ApiRateLimited,
            format!("Rate limit exceeded, retry in {}s", reset),
        )
        .into_response();
        response
            .headers_mut()
            .insert("Retry-After", HeaderValue::from(reset));
        return response;
    }

    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Remaining", HeaderValue::from(remaining));
    headers.insert("X-RateLimit-Reset", HeaderValue::from(reset));

    response
}

/// Request logging middleware; tags every response with a request id
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = Uuid::new_v4().to_string();

    let mut response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %status.as_u16(),
        latency_us = %latency.as_micros(),
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("X-Request-Id", value);
    }
    response
}
