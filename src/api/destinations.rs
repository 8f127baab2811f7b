//! Destinations API endpoints
//!
//! Reading is public, managing destinations is reserved for the admin

use axum::Extension;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::database::CreateDestinationValues;
use crate::database::Database;
use crate::database::DestinationFilter;
use crate::database::UpdateDestinationValues;
use crate::destinations::Destination;

use super::CurrentAdmin;
use super::Error;
use super::Form;
use super::Message;
use super::PathParameters;
use super::QueryParameters;
use super::Success;
use super::non_empty_query;
use super::parse_link;
use super::parse_non_empty;

/// Maximum number of destinations in a list
const LIST_LIMIT: usize = 1000;

/// Maximum number of destinations in search results
const SEARCH_LIMIT: usize = 100;

/// Destination response going to the user
#[derive(Debug, Serialize)]
pub struct DestinationResponse {
    /// Destination ID, always as string
    #[serde(rename = "_id")]
    pub id: String,

    /// Name of the destination
    #[serde(rename = "Destination")]
    pub destination_name: String,

    /// Country of the destination
    #[serde(rename = "Country")]
    pub country: String,

    /// Description of the destination
    #[serde(rename = "Description")]
    pub description: String,

    /// Link with more information
    #[serde(rename = "Link")]
    pub link: String,
}

impl DestinationResponse {
    /// Create a response from a [`Destination`](Destination)
    fn from_destination(destination: Destination) -> Self {
        Self {
            id: destination.id.to_string(),
            destination_name: destination.destination_name,
            country: destination.country,
            description: destination.description,
            link: destination.link,
        }
    }

    /// Create a response from multiple [`Destination`](Destination)s
    fn from_destination_multiple(destinations: Vec<Destination>) -> Vec<Self> {
        destinations
            .into_iter()
            .map(Self::from_destination)
            .collect::<Vec<Self>>()
    }
}

/// Query parameters to filter the list of destinations
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Part of the destination name
    destination: Option<String>,

    /// Part of the country
    country: Option<String>,
}

/// List all destinations, optionally filtered
///
/// A filter without results is a `404 Not Found`, an empty unfiltered list is not
///
/// Request:
/// ```sh
/// curl -v http://localhost:8000/destinations?country=france
/// ```
///
/// Response:
/// ```json
/// [ { "_id": "<uuid>", "Destination": "Paris", "Country": "France" ... } ]
/// ```
pub async fn list(
    Extension(database): Extension<Database>,
    QueryParameters(query): QueryParameters<ListQuery>,
) -> Result<Success<Vec<DestinationResponse>>, Error> {
    let filter = DestinationFilter {
        destination_name: non_empty_query(query.destination.as_deref()),
        country: non_empty_query(query.country.as_deref()),
        description: None,
    };

    let destinations = database
        .find_destinations(&filter, LIST_LIMIT)
        .await
        .map_err(Error::internal_server_error)?;

    if destinations.is_empty() && !filter.is_empty() {
        tracing::debug!("No destinations found for {filter:?}");

        return Err(Error::not_found("No destinations found"));
    }

    Ok(Success::ok(DestinationResponse::from_destination_multiple(
        destinations,
    )))
}

/// Query parameters to search destinations
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Part of the destination name
    destination: Option<String>,

    /// Part of the country
    country: Option<String>,

    /// Part of the description
    description: Option<String>,
}

/// Search destinations
///
/// All given fields have to match, no results is always a `404 Not Found`
///
/// Request:
/// ```sh
/// curl -v 'http://localhost:8000/destinations/search?destination=par&description=light'
/// ```
///
/// Response:
/// ```json
/// [ { "_id": "<uuid>", "Destination": "Paris", "Country": "France" ... } ]
/// ```
pub async fn search(
    Extension(database): Extension<Database>,
    QueryParameters(query): QueryParameters<SearchQuery>,
) -> Result<Success<Vec<DestinationResponse>>, Error> {
    let filter = DestinationFilter {
        destination_name: non_empty_query(query.destination.as_deref()),
        country: non_empty_query(query.country.as_deref()),
        description: non_empty_query(query.description.as_deref()),
    };

    let destinations = database
        .find_destinations(&filter, SEARCH_LIMIT)
        .await
        .map_err(Error::internal_server_error)?;

    if destinations.is_empty() {
        tracing::debug!("No destinations found for {filter:?}");

        return Err(Error::not_found("No destinations found"));
    }

    Ok(Success::ok(DestinationResponse::from_destination_multiple(
        destinations,
    )))
}

/// Get a single destination
///
/// Request:
/// ```sh
/// curl -v http://localhost:8000/destinations/<uuid>
/// ```
///
/// Response:
/// ```json
/// { "_id": "<uuid>", "Destination": "Paris", "Country": "France" ... }
/// ```
pub async fn single(
    Extension(database): Extension<Database>,
    PathParameters(destination_id): PathParameters<Uuid>,
) -> Result<Success<DestinationResponse>, Error> {
    fetch_destination(&database, &destination_id)
        .await
        .map(|destination| Success::ok(DestinationResponse::from_destination(destination)))
}

/// Create destination form
///
/// All fields are required
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateDestinationForm {
    /// Name of the destination, can not be empty
    #[serde(rename = "Destination")]
    destination_name: String,

    /// Country of the destination, can not be empty
    country: String,

    /// Description of the destination
    description: String,

    /// Link with more information, has to be a valid URL
    link: String,
}

/// Create a destination based on the [`CreateDestinationForm`](CreateDestinationForm) form
///
/// Request:
/// ```sh
/// curl -v -u admin:verysecret -H 'Content-Type: application/json' \
///     -d '{ "Destination": "Paris", "Country": "France", "Description": "City of lights", "Link": "https://www.example.com/" }' \
///     http://localhost:8000/destinations
/// ```
///
/// Response
/// ```json
/// { "_id": "<uuid>", "Destination": "Paris", "Country": "France" ... }
/// ```
pub async fn create(
    current_admin: CurrentAdmin,
    Extension(database): Extension<Database>,
    Form(form): Form<CreateDestinationForm>,
) -> Result<Success<DestinationResponse>, Error> {
    let destination_name = parse_non_empty("Destination", &form.destination_name)?;
    let country = parse_non_empty("Country", &form.country)?;
    let link = parse_link(&form.link)?;

    let values = CreateDestinationValues {
        destination_name,
        country,
        description: &form.description,
        link,
    };

    let destination = database
        .create_destination(&values)
        .await
        .map_err(Error::internal_server_error)?;

    tracing::info!(
        admin = %current_admin.username,
        "Created destination {}",
        destination.id
    );

    Ok(Success::ok(DestinationResponse::from_destination(
        destination,
    )))
}

/// Update destination form
///
/// Fields to update a destination with, all fields are optional and are not touched when not
/// provided
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateDestinationForm {
    /// New name of the destination
    #[serde(rename = "Destination")]
    destination_name: Option<String>,

    /// New country of the destination
    country: Option<String>,

    /// New description of the destination
    description: Option<String>,

    /// New link of the destination
    link: Option<String>,
}

/// Update a destination based on the [`UpdateDestinationForm`](UpdateDestinationForm) form
///
/// Only provided values are processed, the other fields of the destination will not be touched
///
/// Request:
/// ```sh
/// curl -v -XPUT -u admin:verysecret -H 'Content-Type: application/json' \
///     -d '{ "Description": "City of love" }' \
///     http://localhost:8000/destinations/<uuid>
/// ```
///
/// Response
/// ```json
/// { "_id": "<uuid>", "Destination": "Paris", "Description": "City of love" ... }
/// ```
pub async fn update(
    current_admin: CurrentAdmin,
    Extension(database): Extension<Database>,
    PathParameters(destination_id): PathParameters<Uuid>,
    Form(form): Form<UpdateDestinationForm>,
) -> Result<Success<DestinationResponse>, Error> {
    let destination_name = form
        .destination_name
        .as_deref()
        .map(|destination_name| parse_non_empty("Destination", destination_name))
        .transpose()?;

    let country = form
        .country
        .as_deref()
        .map(|country| parse_non_empty("Country", country))
        .transpose()?;

    let link = form.link.as_deref().map(parse_link).transpose()?;

    let values = UpdateDestinationValues {
        destination_name,
        country,
        description: form.description.as_deref(),
        link,
    };

    let destination = database
        .update_destination(&destination_id, &values)
        .await
        .map_err(Error::internal_server_error)?
        .ok_or_else(|| Error::not_found("Destination not found"))?;

    tracing::info!(
        admin = %current_admin.username,
        "Updated destination {destination_id}"
    );

    Ok(Success::ok(DestinationResponse::from_destination(
        destination,
    )))
}

/// Delete a destination, there is no way back
///
/// Request:
/// ```sh
/// curl -v -XDELETE -u admin:verysecret http://localhost:8000/destinations/<uuid>
/// ```
///
/// Response
/// ```json
/// { "message": "Destination deleted" }
/// ```
pub async fn delete(
    current_admin: CurrentAdmin,
    Extension(database): Extension<Database>,
    PathParameters(destination_id): PathParameters<Uuid>,
) -> Result<Success<Message>, Error> {
    let is_deleted = database
        .delete_destination(&destination_id)
        .await
        .map_err(Error::internal_server_error)?;

    if !is_deleted {
        return Err(Error::not_found("Destination not found"));
    }

    tracing::info!(
        admin = %current_admin.username,
        "Deleted destination {destination_id}"
    );

    Ok(Success::ok(Message::new("Destination deleted")))
}

/// Fetch destination from database
async fn fetch_destination(
    database: &Database,
    destination_id: &Uuid,
) -> Result<Destination, Error> {
    database
        .find_single_destination_by_id(destination_id)
        .await
        .map_err(Error::internal_server_error)?
        .ok_or_else(|| Error::not_found("Destination not found"))
}
