//! Database storage types

use sqlx::migrate::Migrator;
use uuid::Uuid;

use crate::destinations::Destination;

/// Migrator to run migrations on startup
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// `SQLx` version of destination
#[derive(sqlx::FromRow)]
pub struct SqlxDestination {
    /// Destination ID
    pub id: Uuid,

    /// Name of the destination
    pub destination_name: String,

    /// Country
    pub country: String,

    /// Description
    pub description: String,

    /// Link
    pub link: String,
}

impl Destination {
    /// Create destination from `SQLx` version
    pub fn from_sqlx_destination(destination: SqlxDestination) -> Self {
        Self {
            id: destination.id,
            destination_name: destination.destination_name,
            country: destination.country,
            description: destination.description,
            link: destination.link,
        }
    }

    /// Maybe create destination from `SQLx` version
    pub fn from_sqlx_destination_optional(destination: Option<SqlxDestination>) -> Option<Self> {
        destination.map(Self::from_sqlx_destination)
    }

    /// Create multiple destinations from `SQLx` version
    pub fn from_sqlx_destination_multiple(destinations: Vec<SqlxDestination>) -> Vec<Self> {
        destinations
            .into_iter()
            .map(Self::from_sqlx_destination)
            .collect()
    }
}
