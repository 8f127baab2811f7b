//! Postgres storage

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::destinations::Destination;

use super::CreateDestinationValues;
use super::DestinationFilter;
use super::Result;
use super::UpdateDestinationValues;
use super::connection_error;
use super::types::MIGRATOR;
use super::types::SqlxDestination;

/// Postgres storage
#[derive(Clone)]
pub struct Postgres {
    /// Pool of connections
    connection_pool: PgPool,
}

impl Postgres {
    /// Create Postgres storage
    ///
    /// The database name in the connection string is replaced when a database name is given
    ///
    /// Migrations will be run
    pub async fn new(database_url: &str, database_name: Option<&str>) -> anyhow::Result<Self> {
        let mut options =
            PgConnectOptions::from_str(database_url).context("Invalid `DATABASE_URL`")?;

        if let Some(database_name) = database_name {
            options = options.database(database_name);
        }

        let connection_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await
            .context("Could not connect to the database")?;

        Self::new_with_pool(connection_pool).await
    }

    /// Create Postgres storage with existing pool
    ///
    /// Migrations will be run
    pub async fn new_with_pool(connection_pool: PgPool) -> anyhow::Result<Self> {
        MIGRATOR
            .run(&connection_pool)
            .await
            .context("Migrations could not run")?;

        Ok(Self { connection_pool })
    }

    pub async fn find_destinations(
        &self,
        filter: &DestinationFilter<'_>,
        limit: usize,
    ) -> Result<Vec<Destination>> {
        // `strpos` instead of `ILIKE`, the input should never act as a pattern
        let destinations = sqlx::query_as::<_, SqlxDestination>(
            r"
            SELECT
                id,
                destination_name,
                country,
                description,
                link
            FROM destinations
            WHERE ($1::TEXT IS NULL OR strpos(lower(destination_name), lower($1)) > 0)
                AND ($2::TEXT IS NULL OR strpos(lower(country), lower($2)) > 0)
                AND ($3::TEXT IS NULL OR strpos(lower(description), lower($3)) > 0)
            ORDER BY insertion_order
            LIMIT $4
            ",
        )
        .bind(filter.destination_name)
        .bind(filter.country)
        .bind(filter.description)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.connection_pool)
        .await
        .map(Destination::from_sqlx_destination_multiple)
        .map_err(connection_error)?;

        Ok(destinations)
    }

    pub async fn find_single_destination_by_id(&self, id: &Uuid) -> Result<Option<Destination>> {
        let destination = sqlx::query_as::<_, SqlxDestination>(
            r"
            SELECT
                id,
                destination_name,
                country,
                description,
                link
            FROM destinations
            WHERE id = $1
            LIMIT 1
            ",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
        .map(Destination::from_sqlx_destination_optional)
        .map_err(connection_error)?;

        Ok(destination)
    }

    pub async fn create_destination(
        &self,
        values: &CreateDestinationValues<'_>,
    ) -> Result<Destination> {
        let destination = sqlx::query_as::<_, SqlxDestination>(
            r"
            INSERT INTO destinations (id, destination_name, country, description, link)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id,
                destination_name,
                country,
                description,
                link
            ",
        )
        .bind(Uuid::new_v4())
        .bind(values.destination_name)
        .bind(values.country)
        .bind(values.description)
        .bind(values.link)
        .fetch_one(&self.connection_pool)
        .await
        .map(Destination::from_sqlx_destination)
        .map_err(connection_error)?;

        Ok(destination)
    }

    pub async fn update_destination(
        &self,
        id: &Uuid,
        values: &UpdateDestinationValues<'_>,
    ) -> Result<Option<Destination>> {
        let destination = sqlx::query_as::<_, SqlxDestination>(
            r"
            UPDATE destinations
            SET
                destination_name = COALESCE($2, destination_name),
                country = COALESCE($3, country),
                description = COALESCE($4, description),
                link = COALESCE($5, link),
                updated_at = NOW()
            WHERE id = $1
            RETURNING
                id,
                destination_name,
                country,
                description,
                link
            ",
        )
        .bind(id)
        .bind(values.destination_name)
        .bind(values.country)
        .bind(values.description)
        .bind(values.link)
        .fetch_optional(&self.connection_pool)
        .await
        .map(Destination::from_sqlx_destination_optional)
        .map_err(connection_error)?;

        Ok(destination)
    }

    pub async fn delete_destination(&self, id: &Uuid) -> Result<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM destinations
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(result.rows_affected() > 0)
    }
}
