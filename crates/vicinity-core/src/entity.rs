//! Domain types for providers, services, and their locations.
//!
//! Wire format is the backend's camelCase JSON. Coordinates are optional on
//! every record; `distance_km` is populated by the backend only when the
//! query that produced the record carried device coordinates.

use serde::{Deserialize, Serialize};

/// A device fix: latitude/longitude in decimal degrees.
///
/// Ephemeral by design — deliberately not serializable, so a fix can never
/// end up in persistent storage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// A service/provider category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// How a service's price is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceType {
    Fixed,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Negotiable,
    StartingAt,
    ContactForQuote,
}

/// A service provider (business) record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub rating_average: f64,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Kilometres from the query coordinates. Present only on records
    /// produced by a location-aware query.
    #[serde(
        default,
        rename = "distance",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance_km: Option<f64>,
}

/// A service listing offered by a provider.
///
/// `price` is a string on the wire (the backend stores it as entered, and
/// some price types carry no numeric price at all).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_type: Option<PriceType>,
    pub provider_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(
        default,
        rename = "distance",
        skip_serializing_if = "Option::is_none"
    )]
    pub distance_km: Option<f64>,
}

/// Either kind of discoverable record, unified for result lists and the
/// favorites working set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocatedEntity {
    Provider(Provider),
    Service(Service),
}

impl LocatedEntity {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            LocatedEntity::Provider(p) => &p.id,
            LocatedEntity::Service(s) => &s.id,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            LocatedEntity::Provider(p) => &p.name,
            LocatedEntity::Service(s) => &s.title,
        }
    }

    /// Coordinates, when the record carries them. Used by map consumers to
    /// decide which entities get a marker.
    #[must_use]
    pub fn coordinates(&self) -> Option<GeoLocation> {
        let (lat, lng) = match self {
            LocatedEntity::Provider(p) => (p.latitude, p.longitude),
            LocatedEntity::Service(s) => (s.latitude, s.longitude),
        };
        Some(GeoLocation {
            latitude: lat?,
            longitude: lng?,
        })
    }

    #[must_use]
    pub fn distance_km(&self) -> Option<f64> {
        match self {
            LocatedEntity::Provider(p) => p.distance_km,
            LocatedEntity::Service(s) => s.distance_km,
        }
    }
}
