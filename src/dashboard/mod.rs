//! Dashboard model: competitors, analytics records, and the snapshot.
//!
//! DESIGN
//! ======
//! `Dashboard` is the single mutable application state for the map and the
//! three analytics panels. Everything downstream (context formatter, AI
//! service, HTTP handlers) reads a `DashboardState` built by
//! [`build_snapshot`]. The selected competitor is stored only as an id and
//! resolved against the live competitor list on every snapshot, so a
//! snapshot can never carry a stale copy.

pub mod action;
pub mod context;
pub mod seed;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// COMPETITOR
// =============================================================================

/// Map marker bucket. Derived from the price tier for fetched competitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerType {
    /// The owner's own restaurant.
    #[serde(rename = "self")]
    SelfRestaurant,
    Cheap,
    Mid,
    Expensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceRange {
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Premium,
}

impl PriceRange {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "$",
            Self::Moderate => "$$",
            Self::Premium => "$$$",
        }
    }

    /// Competitor marker classification for this tier.
    #[must_use]
    pub fn marker_type(self) -> MarkerType {
        match self {
            Self::Budget => MarkerType::Cheap,
            Self::Moderate => MarkerType::Mid,
            Self::Premium => MarkerType::Expensive,
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A restaurant on the map. Immutable once built; the whole list is
/// replaced on the next fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub marker: MarkerType,
    pub name: String,
    pub cuisine: String,
    /// 0-5.
    pub rating: f64,
    pub price_range: PriceRange,
    pub address: String,
    pub categories: Vec<String>,
}

// =============================================================================
// MODULES AND LAYERS
// =============================================================================

/// Dashboard panel. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Place,
    Product,
    Price,
    Promotion,
}

impl Module {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Place => "place",
            Self::Product => "product",
            Self::Price => "price",
            Self::Promotion => "promotion",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapLayer {
    Competitors,
}

impl MapLayer {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Competitors => "competitors",
        }
    }
}

impl fmt::Display for MapLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ANALYTICS RECORDS
// =============================================================================

/// Menu-engineering quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    Stars,
    Plowhorses,
    Puzzles,
    Dogs,
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Stars => "Stars",
            Self::Plowhorses => "Plowhorses",
            Self::Puzzles => "Puzzles",
            Self::Dogs => "Dogs",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    /// 0-100.
    pub popularity: u8,
    /// 0-100.
    pub profitability: u8,
    pub category: ProductCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBenchmark {
    pub item: String,
    #[serde(rename = "self")]
    pub own_price: f64,
    pub competitor_avg: f64,
    /// Competitor name -> price for this item.
    pub competitors: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "Social Media")]
    SocialMedia,
    Email,
    Offline,
    #[serde(rename = "PPC")]
    Ppc,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SocialMedia => "Social Media",
            Self::Email => "Email",
            Self::Offline => "Offline",
            Self::Ppc => "PPC",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub channel: Channel,
    /// Percent.
    pub roi: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfmSegment {
    pub id: u32,
    pub name: String,
    pub recency: u8,
    pub frequency: u8,
    pub monetary: u8,
    pub customer_count: u32,
}

// =============================================================================
// DASHBOARD (controller-owned state)
// =============================================================================

/// Map camera position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

/// Outcome of the one-shot competitor fetch at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    /// Persistent until restart; replaces the place module content.
    Failed(String),
}

/// Mutable dashboard state. Owned by `AppState` behind a lock; read only
/// through [`build_snapshot`].
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub active_module: Module,
    pub view: MapView,
    pub competitors: Vec<Competitor>,
    pub selected_competitor_id: Option<String>,
    /// Ordered set: a layer appears at most once.
    pub visible_layers: Vec<MapLayer>,
    pub products: Vec<Product>,
    pub price_benchmarks: Vec<PriceBenchmark>,
    pub campaigns: Vec<Campaign>,
    pub rfm_segments: Vec<RfmSegment>,
    pub load: LoadStatus,
}

impl Dashboard {
    /// Fresh dashboard centered on `view`: place module active, competitor
    /// layer visible, no competitors yet, seeded analytics.
    #[must_use]
    pub fn new(view: MapView) -> Self {
        Self {
            active_module: Module::Place,
            view,
            competitors: Vec::new(),
            selected_competitor_id: None,
            visible_layers: vec![MapLayer::Competitors],
            products: seed::products(),
            price_benchmarks: seed::price_benchmarks(),
            campaigns: seed::campaigns(),
            rfm_segments: seed::rfm_segments(),
            load: LoadStatus::Loading,
        }
    }

    /// Replace the competitor list wholesale and mark the load as done.
    /// A selection pointing at a competitor that no longer exists is
    /// cleared.
    pub fn set_competitors(&mut self, competitors: Vec<Competitor>) {
        self.competitors = competitors;
        if let Some(id) = &self.selected_competitor_id {
            if !self.competitors.iter().any(|c| &c.id == id) {
                self.selected_competitor_id = None;
            }
        }
        self.load = LoadStatus::Ready;
    }

    pub fn set_load_error(&mut self, message: impl Into<String>) {
        self.load = LoadStatus::Failed(message.into());
    }

    #[must_use]
    pub fn find_competitor(&self, id: &str) -> Option<&Competitor> {
        self.competitors.iter().find(|c| c.id == id)
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Immutable point-in-time projection of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub active_module: Module,
    pub zoom: f64,
    pub competitors: Vec<Competitor>,
    pub selected_competitor: Option<Competitor>,
    pub visible_layers: Vec<MapLayer>,
    pub products: Vec<Product>,
    pub price_benchmarks: Vec<PriceBenchmark>,
    pub campaigns: Vec<Campaign>,
    pub rfm_segments: Vec<RfmSegment>,
}

/// Reduce the dashboard into a snapshot. Pure: no I/O, same input gives a
/// field-for-field equal output.
#[must_use]
pub fn build_snapshot(dashboard: &Dashboard) -> DashboardState {
    let selected_competitor = dashboard
        .selected_competitor_id
        .as_deref()
        .and_then(|id| dashboard.find_competitor(id))
        .cloned();

    DashboardState {
        active_module: dashboard.active_module,
        zoom: dashboard.view.zoom,
        competitors: dashboard.competitors.clone(),
        selected_competitor,
        visible_layers: dashboard.visible_layers.clone(),
        products: dashboard.products.clone(),
        price_benchmarks: dashboard.price_benchmarks.clone(),
        campaigns: dashboard.campaigns.clone(),
        rfm_segments: dashboard.rfm_segments.clone(),
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
