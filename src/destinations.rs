//! Destinations

use uuid::Uuid;

/// A travel destination
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    /// Destination ID, assigned by the database
    pub id: Uuid,

    /// Name of the destination
    pub destination_name: String,

    /// Country the destination is in
    pub country: String,

    /// Free text description
    pub description: String,

    /// Link with more information
    pub link: String,
}
