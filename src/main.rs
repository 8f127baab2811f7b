#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]
// #![doc = include_str!("../README.md")]

use std::net::SocketAddr;

use anyhow::Result;
use axum::Extension;
use axum::Router;
use axum::http::Method;
use axum::routing::get;
use axum_client_ip::ClientIpSource;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::prelude::*;

use crate::admin::AdminCredentials;
use crate::database::Database;
use crate::database::DatabaseConfig;
use crate::rate_limit::RateLimits;
use crate::utils::env_var;
use crate::utils::env_var_or_else;

mod admin;
mod api;
mod client_ip;
mod database;
mod destinations;
mod graceful_shutdown;
mod password;
mod rate_limit;
mod root;
#[cfg(test)]
mod tests;
mod utils;

const DEFAULT_RUST_LOG: &str = "destinations=debug,tower_http=debug";
const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";

#[tokio::main]
async fn main() -> Result<()> {
    setup_environment();
    setup_tracing();

    let app = setup_app(DatabaseConfig::DetectConfig, RateLimits::default()).await?;

    let address = setup_address()?;
    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(graceful_shutdown::handler())
    .await?;

    Ok(())
}

/// Create and setup the app with its dependencies
///
/// # Errors
///
/// Will return `Err` if any of its dependencies fail to load:
/// - Database connection
/// - Admin credentials
pub async fn setup_app(
    database_config: DatabaseConfig,
    rate_limits: RateLimits,
) -> Result<Router> {
    let database = Database::from_config(database_config).await?;

    let admin_credentials = AdminCredentials::from_env()?;

    Ok(create_router(database, admin_credentials, &rate_limits))
}

/// Create the router for the destinations API
fn create_router(
    database: Database,
    admin_credentials: AdminCredentials,
    rate_limits: &RateLimits,
) -> Router {
    // only reading is allowed from other origins, other responses never carry CORS headers
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|_origin, request| {
            is_cross_origin_method(&request.method)
        }))
        .allow_methods([Method::GET]);

    Router::new()
        .route("/", get(root::root))
        .merge(api::router(rate_limits))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(ClientIpSource::ConnectInfo.into_extension())
        .layer(Extension(database))
        .layer(Extension(admin_credentials))
}

/// Requests other origins may make, `OPTIONS` for the preflight of those
fn is_cross_origin_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer())
        .init();
}

fn setup_address() -> Result<SocketAddr> {
    let mut address =
        env_var_or_else("ADDRESS", || String::from(DEFAULT_ADDRESS)).parse::<SocketAddr>()?;

    // optional override of just the port
    if let Some(port) = env_var("PORT") {
        address.set_port(port.parse::<u16>()?);
    }

    Ok(address)
}
