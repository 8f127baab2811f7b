//! Optional client IP address extractor.
//!
//! The version of `axum_client_ip` no longer supports optional IP address extraction.

use std::convert::Infallible;
use std::net::IpAddr;
use std::net::Ipv4Addr;

use axum::extract::FromRequestParts as _;
use axum::extract::OptionalFromRequestParts;
use axum::http::request::Parts;

/// Address used for all clients without a known IP address
pub const UNKNOWN_CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Client IP address extractor.
#[derive(Debug, Clone)]
pub struct ClientIp {
    /// Internal IP address
    pub ip_address: axum_client_ip::ClientIp,
}

impl ClientIp {
    /// Get the IP address of a maybe known client
    ///
    /// Clients without an IP address all end up as [`UNKNOWN_CLIENT`]
    pub fn or_unknown(client_ip: Option<&Self>) -> IpAddr {
        client_ip.map_or(UNKNOWN_CLIENT, |client_ip| client_ip.ip_address.0)
    }
}

impl<S> OptionalFromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let ip_address = axum_client_ip::ClientIp::from_request_parts(parts, state).await;

        Ok(ip_address.ok().map(|ip_address| Self { ip_address }))
    }
}
