//! Per-IP rate limiting
//!
//! Every route shares one fixed-window counter per client IP. A client may
//! make `max_requests` requests per `window`; the count resets when a new
//! window starts.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::RateLimitConfig;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

pub struct IpRateLimiter {
    max_requests: u32,
    window: Duration,
    clients: DashMap<IpAddr, Window>,
}

impl IpRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests.get(),
            window: config.window,
            clients: DashMap::new(),
        }
    }

    /// Record one request from `ip`; false when over quota
    pub fn check(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let mut entry = self.clients.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        if entry.count < self.max_requests {
            entry.count += 1;
            true
        } else {
            false
        }
    }

    /// Periodically drop clients whose window has expired
    pub fn spawn_housekeeping(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.prune();
                tracing::debug!(tracked_clients = self.clients.len(), "Rate limiter pruned");
            }
        })
    }

    fn prune(&self) {
        let now = Instant::now();
        self.clients
            .retain(|_, w| now.duration_since(w.started) < self.window);
        self.clients.shrink_to_fit();
    }
}

/// Client IP from the connection; requests without connection info
/// (in-process tests) share the unspecified address.
fn client_ip(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Rate limit middleware
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<IpRateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&request);

    if limiter.check(ip) {
        next.run(request).await
    } else {
        tracing::warn!(client_ip = %ip, path = %request.uri().path(), "Rate limit exceeded");
        ApiError::RateLimited.into_response()
    }
}
