//! All things related to the storage of destinations

use core::fmt;

use sqlx::PgPool;
use uuid::Uuid;

pub use Config as DatabaseConfig;
pub use form_types::*;

use crate::destinations::Destination;
use crate::utils::env_var;
use memory::Memory;
use postgres::Postgres;

mod form_types;
mod memory;
mod postgres;
mod types;

/// Storage errors
#[derive(Debug)]
pub enum Error {
    /// A connection error with the storage
    Connection(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Connection(error) => write!(f, "Connection error: {error}"),
        }
    }
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Map any storage error to a connection error
fn connection_error<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::Connection(err.to_string())
}

/// Database configuration
pub enum Config {
    /// Detect configuration from environment
    ///
    /// Postgres when `DATABASE_URL` is set, in memory otherwise
    DetectConfig,

    /// Keep everything in memory, gone on shutdown
    Memory,

    /// Use existing Postgres connection
    #[cfg_attr(not(test), allow(dead_code))]
    ExistingConnection(PgPool),
}

/// The actual storage behind the database
#[derive(Clone)]
enum Backend {
    /// Postgres storage
    Postgres(Postgres),

    /// In-memory storage
    Memory(Memory),
}

/// Destination storage
#[derive(Clone)]
pub struct Database {
    /// Storage backend
    backend: Backend,
}

impl Database {
    /// Create a new storage
    ///
    /// # Errors
    ///
    /// Will return `Err` when Postgres can not be reached or migrations fail
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        let backend = match config {
            Config::DetectConfig => {
                if let Some(database_url) = env_var("DATABASE_URL") {
                    let database_name = env_var("DATABASE_NAME");

                    let postgres = Postgres::new(&database_url, database_name.as_deref()).await?;

                    Backend::Postgres(postgres)
                } else {
                    tracing::warn!("`DATABASE_URL` not set, destinations are kept in memory");

                    Backend::Memory(Memory::new())
                }
            }
            Config::Memory => Backend::Memory(Memory::new()),
            Config::ExistingConnection(pool) => {
                Backend::Postgres(Postgres::new_with_pool(pool).await?)
            }
        };

        Ok(Self { backend })
    }

    /// Find destinations matching the filter, in insertion order
    ///
    /// An empty filter matches all destinations
    pub async fn find_destinations(
        &self,
        filter: &DestinationFilter<'_>,
        limit: usize,
    ) -> Result<Vec<Destination>> {
        match &self.backend {
            Backend::Postgres(postgres) => postgres.find_destinations(filter, limit).await,
            Backend::Memory(memory) => Ok(memory.find_destinations(filter, limit).await),
        }
    }

    /// Find a single destination by ID
    pub async fn find_single_destination_by_id(&self, id: &Uuid) -> Result<Option<Destination>> {
        match &self.backend {
            Backend::Postgres(postgres) => postgres.find_single_destination_by_id(id).await,
            Backend::Memory(memory) => Ok(memory.find_single_destination_by_id(id).await),
        }
    }

    /// Create a destination, the ID is generated
    pub async fn create_destination(
        &self,
        values: &CreateDestinationValues<'_>,
    ) -> Result<Destination> {
        match &self.backend {
            Backend::Postgres(postgres) => postgres.create_destination(values).await,
            Backend::Memory(memory) => Ok(memory.create_destination(values).await),
        }
    }

    /// Update a single destination
    ///
    /// Only the provided values are changed, `None` when the destination does not exist
    pub async fn update_destination(
        &self,
        id: &Uuid,
        values: &UpdateDestinationValues<'_>,
    ) -> Result<Option<Destination>> {
        match &self.backend {
            Backend::Postgres(postgres) => postgres.update_destination(id, values).await,
            Backend::Memory(memory) => Ok(memory.update_destination(id, values).await),
        }
    }

    /// Permanently delete a destination
    ///
    /// Returns `false` when there was nothing to delete
    pub async fn delete_destination(&self, id: &Uuid) -> Result<bool> {
        match &self.backend {
            Backend::Postgres(postgres) => postgres.delete_destination(id).await,
            Backend::Memory(memory) => Ok(memory.delete_destination(id).await),
        }
    }
}
