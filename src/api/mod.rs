//! All API endpoint setup

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::MethodRouter;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;

pub use current_admin::CurrentAdmin;
pub use request::Form;
pub use request::PathParameters;
pub use request::QueryParameters;
pub use request::non_empty_query;
pub use request::parse_link;
pub use request::parse_non_empty;
pub use response::Error;
pub use response::Message;
pub use response::Success;

use crate::rate_limit::Limit;
use crate::rate_limit::RateLimiter;
use crate::rate_limit::RateLimits;
use crate::rate_limit::enforce;

mod current_admin;
mod destinations;
mod request;
mod response;

/// Get the Axum router for all API routes
///
/// Every route has its own rate limit
pub fn router(rate_limits: &RateLimits) -> Router {
    let destinations = Router::new()
        .route(
            "/",
            rate_limited(get(destinations::list), "list", rate_limits.list),
        )
        .route(
            "/",
            rate_limited(post(destinations::create), "create", rate_limits.create),
        )
        .route(
            "/search",
            rate_limited(get(destinations::search), "search", rate_limits.search),
        )
        .route(
            "/{destination}",
            rate_limited(get(destinations::single), "single", rate_limits.single),
        )
        .route(
            "/{destination}",
            rate_limited(put(destinations::update), "update", rate_limits.update),
        )
        .route(
            "/{destination}",
            rate_limited(delete(destinations::delete), "delete", rate_limits.delete),
        );

    Router::new().nest("/destinations", destinations)
}

/// Put a route behind its own rate limiter
fn rate_limited(method_router: MethodRouter, route: &'static str, limit: Limit) -> MethodRouter {
    method_router.route_layer(from_fn_with_state(RateLimiter::new(route, limit), enforce))
}
