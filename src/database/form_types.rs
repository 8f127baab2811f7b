//! Form types

use crate::destinations::Destination;

/// Values to create a Destination
pub struct CreateDestinationValues<'a> {
    /// Name of the destination
    pub destination_name: &'a str,

    /// Country the destination is in
    pub country: &'a str,

    /// Description of the destination
    pub description: &'a str,

    /// Link with more information
    pub link: &'a str,
}

/// Values to update a Destination
///
/// Fields that are `None` are left untouched
pub struct UpdateDestinationValues<'a> {
    /// New name of the destination
    pub destination_name: Option<&'a str>,

    /// New country of the destination
    pub country: Option<&'a str>,

    /// New description of the destination
    pub description: Option<&'a str>,

    /// New link of the destination
    pub link: Option<&'a str>,
}

/// Case-insensitive "contains" filter on destinations
///
/// All provided fields have to match
#[derive(Debug, Default)]
pub struct DestinationFilter<'a> {
    /// Part of the destination name
    pub destination_name: Option<&'a str>,

    /// Part of the country
    pub country: Option<&'a str>,

    /// Part of the description
    pub description: Option<&'a str>,
}

impl DestinationFilter<'_> {
    /// Is there anything to filter on?
    pub fn is_empty(&self) -> bool {
        self.destination_name.is_none() && self.country.is_none() && self.description.is_none()
    }

    /// Does the destination match all provided fields?
    pub fn matches(&self, destination: &Destination) -> bool {
        contains(&destination.destination_name, self.destination_name)
            && contains(&destination.country, self.country)
            && contains(&destination.description, self.description)
    }
}

/// Case-insensitive substring check, a missing needle always matches
fn contains(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
}
