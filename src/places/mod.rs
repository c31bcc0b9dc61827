//! Places search: Geoapify `/v2/places` client and competitor mapping.
//!
//! DESIGN
//! ======
//! Consumed once at startup. The response is parsed into explicit wire
//! types where every upstream property is optional, then mapped into
//! `Competitor` values with the defaulting rules applied in
//! [`map_feature`]. Any failure is returned whole; no partial results.

use std::time::Duration;

use rand::Rng;
use serde::Deserialize;

use crate::dashboard::{Competitor, PriceRange};

pub const DEFAULT_PLACES_BASE_URL: &str = "https://api.geoapify.com/v2/places";
pub const SEARCH_RADIUS_METERS: u32 = 5000;
pub const SEARCH_LIMIT: u32 = 50;
pub const SEARCH_CATEGORIES: &str = "catering.restaurant,catering.cafe,catering.fast_food,catering.bar";

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

const UNKNOWN_NAME: &str = "Unknown Restaurant";
const UNKNOWN_CUISINE: &str = "Restaurant";
const UNKNOWN_ADDRESS: &str = "Address not available";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("missing API key: env var GEOAPIFY_API_KEY not set")]
    MissingApiKey,

    #[error("places request failed: {0}")]
    Request(String),

    #[error("Geoapify API request failed with status {status}")]
    Response { status: u16 },

    #[error("places response parse failed: {0}")]
    Parse(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacesConfig {
    /// `None` when `GEOAPIFY_API_KEY` is unset; fetching then fails.
    pub api_key: Option<String>,
    pub base_url: String,
}

impl PlacesConfig {
    /// Read `GEOAPIFY_API_KEY` and `GEOAPIFY_BASE_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEOAPIFY_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let base_url = std::env::var("GEOAPIFY_BASE_URL").unwrap_or_else(|_| DEFAULT_PLACES_BASE_URL.to_string());
        Self { api_key, base_url }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct PlacesClient {
    http: reqwest::Client,
    config: PlacesConfig,
}

impl PlacesClient {
    /// # Errors
    ///
    /// Returns [`PlacesError::HttpClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(config: PlacesConfig) -> Result<Self, PlacesError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| PlacesError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Fetch up to 50 venues within 5 km of (`lat`, `lon`).
    ///
    /// # Errors
    ///
    /// Fails on a missing key, a network error, a non-2xx status, or an
    /// unparseable body.
    pub async fn fetch_competitors(&self, lat: f64, lon: f64) -> Result<Vec<Competitor>, PlacesError> {
        let api_key = self.config.api_key.as_deref().ok_or(PlacesError::MissingApiKey)?;

        let response = self
            .http
            .get(&self.config.base_url)
            .query(&search_query(lat, lon, api_key))
            .send()
            .await
            .map_err(|e| PlacesError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(PlacesError::Response { status });
        }
        let text = response
            .text()
            .await
            .map_err(|e| PlacesError::Request(e.to_string()))?;

        parse_competitors(&text, &mut rand::rng())
    }
}

fn search_query(lat: f64, lon: f64, api_key: &str) -> [(&'static str, String); 5] {
    [
        ("categories", SEARCH_CATEGORIES.to_string()),
        ("filter", format!("circle:{lon},{lat},{SEARCH_RADIUS_METERS}")),
        ("bias", format!("proximity:{lon},{lat}")),
        ("limit", SEARCH_LIMIT.to_string()),
        ("apiKey", api_key.to_string()),
    ]
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Option<Vec<Feature>>,
}

#[derive(Deserialize)]
pub(crate) struct Feature {
    #[serde(default)]
    properties: PlaceProperties,
}

#[derive(Deserialize, Default)]
pub(crate) struct PlaceProperties {
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    categories: Option<Vec<String>>,
    #[serde(default)]
    catering: Option<CateringDetails>,
    #[serde(default)]
    address_line2: Option<String>,
}

#[derive(Deserialize, Default)]
struct CateringDetails {
    #[serde(default)]
    rating: Option<f64>,
}

// =============================================================================
// MAPPING
// =============================================================================

pub(crate) fn parse_competitors(json: &str, rng: &mut impl Rng) -> Result<Vec<Competitor>, PlacesError> {
    let collection: FeatureCollection = serde_json::from_str(json).map_err(|e| PlacesError::Parse(e.to_string()))?;
    let features = collection.features.unwrap_or_default();
    Ok(features
        .into_iter()
        .enumerate()
        .filter_map(|(index, feature)| map_feature(index, feature, rng))
        .collect())
}

/// Map one venue to a `Competitor`. Venues without coordinates cannot be
/// placed on the map and are skipped.
pub(crate) fn map_feature(index: usize, feature: Feature, rng: &mut impl Rng) -> Option<Competitor> {
    let props = feature.properties;
    let (Some(latitude), Some(longitude)) = (props.lat, props.lon) else {
        tracing::debug!(index, "places: skipping venue without coordinates");
        return None;
    };

    let categories = props.categories.unwrap_or_default();
    let price_range = price_range_for(&categories);
    let rating = props
        .catering
        .and_then(|c| c.rating)
        .filter(|r| *r > 0.0)
        .unwrap_or_else(|| mock_rating(rng));

    Some(Competitor {
        id: props.place_id.unwrap_or_else(|| format!("place_{index}")),
        latitude,
        longitude,
        marker: price_range.marker_type(),
        name: non_empty(props.name).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        cuisine: cuisine_for(&categories).unwrap_or_else(|| UNKNOWN_CUISINE.to_string()),
        rating,
        price_range,
        address: non_empty(props.address_line2).unwrap_or_else(|| UNKNOWN_ADDRESS.to_string()),
        categories,
    })
}

/// Fast food and food courts are cheap, fine dining is expensive, the rest
/// is mid-priced.
#[must_use]
pub fn price_range_for(categories: &[String]) -> PriceRange {
    let has = |tag: &str| categories.iter().any(|c| c == tag);
    if has("catering.fast_food") || has("catering.food_court") {
        PriceRange::Budget
    } else if has("catering.fine_dining") {
        PriceRange::Premium
    } else {
        PriceRange::Moderate
    }
}

/// Second segment of the first `catering.*` tag, underscores to spaces.
#[must_use]
pub fn cuisine_for(categories: &[String]) -> Option<String> {
    categories
        .iter()
        .find(|c| c.starts_with("catering."))
        .and_then(|c| c.split('.').nth(1))
        .filter(|s| !s.is_empty())
        .map(|s| s.replace('_', " "))
}

/// Uniform in [3, 5], rounded to the nearest half star.
pub fn mock_rating(rng: &mut impl Rng) -> f64 {
    let raw: f64 = rng.random_range(3.0..=5.0);
    (raw * 2.0).round() / 2.0
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
