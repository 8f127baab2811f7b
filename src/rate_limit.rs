//! Rate limiting
//!
//! Fixed window counters per route, keyed by the IP address of the client. A window starts with
//! the first request of a client and the counter resets once the window has passed.

use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;
use std::time::Duration;

use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use moka::future::Cache;

use crate::api::Error;
use crate::client_ip::ClientIp;

/// Maximum number of requests within a window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limit {
    /// Number of requests allowed per window
    pub ceiling: u32,

    /// Length of the window
    pub window: Duration,
}

impl Limit {
    /// Limit of `ceiling` requests per minute
    pub const fn per_minute(ceiling: u32) -> Self {
        Self {
            ceiling,
            window: Duration::from_secs(60),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.window.as_secs();

        if seconds > 0 && seconds % 60 == 0 {
            write!(f, "{} per {} minute", self.ceiling, seconds / 60)
        } else {
            write!(f, "{} per {} ms", self.ceiling, self.window.as_millis())
        }
    }
}

/// The limits of all rate limited routes
#[derive(Clone, Copy, Debug)]
pub struct RateLimits {
    /// `GET /destinations`
    pub list: Limit,

    /// `GET /destinations/{id}`
    pub single: Limit,

    /// `GET /destinations/search`
    pub search: Limit,

    /// `POST /destinations`
    pub create: Limit,

    /// `PUT /destinations/{id}`
    pub update: Limit,

    /// `DELETE /destinations/{id}`
    pub delete: Limit,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            list: Limit::per_minute(20),
            single: Limit::per_minute(15),
            search: Limit::per_minute(10),
            create: Limit::per_minute(5),
            update: Limit::per_minute(5),
            delete: Limit::per_minute(3),
        }
    }
}

/// Rate limiter for a single route
///
/// Every route has its own limiter, so routes never contend with each other
#[derive(Clone)]
pub struct RateLimiter {
    /// Name of the route, for logging
    route: &'static str,

    /// The limit of the route
    limit: Limit,

    /// Request counters of the active windows
    ///
    /// Entries expire a window after they are inserted, which ends the window. There is no
    /// capacity bound: a bounded cache may refuse or evict a running window, which would let
    /// that client through unlimited. Memory is bounded by the clients seen within one window.
    windows: Cache<IpAddr, Arc<AtomicU32>>,
}

impl RateLimiter {
    /// Create a rate limiter for a route
    pub fn new(route: &'static str, limit: Limit) -> Self {
        let windows = Cache::builder().time_to_live(limit.window).build();

        Self {
            route,
            limit,
            windows,
        }
    }

    /// Count a request of a client, `false` when the client is over its limit
    pub async fn admit(&self, client: IpAddr) -> bool {
        let counter = self
            .windows
            .get_with(client, async { Arc::new(AtomicU32::new(0)) })
            .await;

        // rejected requests are not counted
        counter
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                (count < self.limit.ceiling).then_some(count + 1)
            })
            .is_ok()
    }
}

/// Middleware to rate limit a route
///
/// Runs before anything else of the route, including authentication
pub async fn enforce(
    State(rate_limiter): State<RateLimiter>,
    client_ip: Option<ClientIp>,
    request: Request,
    next: Next,
) -> Result<Response, Error> {
    let client = ClientIp::or_unknown(client_ip.as_ref());

    if rate_limiter.admit(client).await {
        Ok(next.run(request).await)
    } else {
        tracing::debug!(
            "Rate limit of {} exceeded for {client} on {}",
            rate_limiter.limit,
            rate_limiter.route
        );

        Err(Error::too_many_requests(format!(
            "Rate limit exceeded: {}",
            rate_limiter.limit
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    const CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1));
    const OTHER_CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 2));

    #[tokio::test]
    async fn test_admit_until_ceiling() {
        let rate_limiter = RateLimiter::new("test", Limit::per_minute(3));

        assert!(rate_limiter.admit(CLIENT).await);
        assert!(rate_limiter.admit(CLIENT).await);
        assert!(rate_limiter.admit(CLIENT).await);
        assert!(!rate_limiter.admit(CLIENT).await);
        assert!(!rate_limiter.admit(CLIENT).await);

        // other clients have their own window
        assert!(rate_limiter.admit(OTHER_CLIENT).await);
    }

    #[tokio::test]
    async fn test_window_resets() {
        let limit = Limit {
            ceiling: 1,
            window: Duration::from_millis(100),
        };
        let rate_limiter = RateLimiter::new("test", limit);

        assert!(rate_limiter.admit(CLIENT).await);
        assert!(!rate_limiter.admit(CLIENT).await);

        tokio::time::sleep(Duration::from_millis(250)).await;

        assert!(rate_limiter.admit(CLIENT).await);
        assert!(!rate_limiter.admit(CLIENT).await);
    }

    #[tokio::test]
    async fn test_concurrent_requests_do_not_exceed_ceiling() {
        let rate_limiter = RateLimiter::new("test", Limit::per_minute(10));

        let mut handles = Vec::new();
        for _ in 0..50 {
            let rate_limiter = rate_limiter.clone();
            handles.push(tokio::spawn(
                async move { rate_limiter.admit(CLIENT).await },
            ));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }

        assert_eq!(10, admitted);
    }

    #[tokio::test]
    async fn test_many_clients_keep_their_windows() {
        let rate_limiter = RateLimiter::new("test", Limit::per_minute(1));

        let clients = (0..=u8::MAX)
            .flat_map(|a| (0..=u8::MAX).map(move |b| IpAddr::V4(Ipv4Addr::new(10, 0, a, b))))
            .take(20_000)
            .collect::<Vec<_>>();

        for client in &clients {
            assert!(rate_limiter.admit(*client).await);
        }

        rate_limiter.windows.run_pending_tasks().await;

        // nobody got a fresh window by being pushed out
        for client in &clients {
            assert!(!rate_limiter.admit(*client).await);
        }
    }

    #[test]
    fn test_limit_display() {
        assert_eq!("5 per 1 minute", Limit::per_minute(5).to_string());
    }
}
