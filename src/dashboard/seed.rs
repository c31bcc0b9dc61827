//! Static seed data for the analytics panels, the owner's restaurant, and
//! the initial chat.
//!
//! The analytics collections are never mutated at runtime.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{
    Campaign, Channel, Competitor, MapView, MarkerType, PriceBenchmark, PriceRange, Product, ProductCategory,
    RfmSegment,
};

pub const SELF_RESTAURANT_ID: &str = "self_restaurant";

/// Rich-text messages the chat log starts with.
pub const WELCOME_MESSAGES: [&str; 2] = [
    "<strong>Welcome to BiteBase!</strong><br/>I'm your AI Copilot. I've just loaded live restaurant data for \
     downtown San Francisco using the Geoapify API. Explore the map and ask me anything!",
    "I am now connected to Google Search. Try asking a question that requires real-time information, like \
     \"What's the weather like at The Ferry Building?\"",
];

/// A canned prompt offered under the chat input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickPrompt {
    pub text: &'static str,
    pub emoji: &'static str,
}

pub static QUICK_PROMPTS: [QuickPrompt; 4] = [
    QuickPrompt { text: "Analyze competitors near me.", emoji: "📊" },
    QuickPrompt { text: "Find market gaps.", emoji: "🗺️" },
    QuickPrompt { text: "Low competition for Italian food?", emoji: "🍝" },
    QuickPrompt { text: "Show price distribution.", emoji: "💰" },
];

/// The owner's restaurant, placed at the map center. Prepended to every
/// fetched competitor list.
#[must_use]
pub fn self_restaurant(view: MapView) -> Competitor {
    Competitor {
        id: SELF_RESTAURANT_ID.into(),
        latitude: view.latitude,
        longitude: view.longitude,
        marker: MarkerType::SelfRestaurant,
        name: "Our Restaurant".into(),
        cuisine: "Italian".into(),
        rating: 4.8,
        price_range: PriceRange::Premium,
        address: "Market St, San Francisco".into(),
        categories: vec!["restaurant".into(), "italian".into()],
    }
}

#[must_use]
pub fn products() -> Vec<Product> {
    let rows: [(u32, &str, u8, u8, ProductCategory); 6] = [
        (1, "Truffle Pasta", 85, 90, ProductCategory::Stars),
        (2, "Margherita Pizza", 95, 40, ProductCategory::Plowhorses),
        (3, "Filet Mignon", 30, 85, ProductCategory::Puzzles),
        (4, "House Salad", 25, 30, ProductCategory::Dogs),
        (5, "Garlic Bread", 98, 55, ProductCategory::Plowhorses),
        (6, "Lobster Risotto", 45, 75, ProductCategory::Puzzles),
    ];
    rows.into_iter()
        .map(|(id, name, popularity, profitability, category)| Product {
            id,
            name: name.into(),
            popularity,
            profitability,
            category,
        })
        .collect()
}

#[must_use]
pub fn price_benchmarks() -> Vec<PriceBenchmark> {
    fn benchmark(item: &str, own_price: f64, competitor_avg: f64, competitors: &[(&str, f64)]) -> PriceBenchmark {
        PriceBenchmark {
            item: item.into(),
            own_price,
            competitor_avg,
            competitors: competitors
                .iter()
                .map(|(name, price)| ((*name).to_string(), *price))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    vec![
        benchmark("Pizza", 18.0, 16.5, &[("Pizza Palace", 17.0), ("Burger Barn", 14.0), ("Noodle House", 18.5)]),
        benchmark("Burger", 16.0, 13.0, &[("Burger Barn", 12.0), ("The Steakhouse", 22.0), ("Pizza Palace", 15.0)]),
        benchmark("Steak", 45.0, 48.0, &[("The Steakhouse", 48.0), ("Noodle House", 35.0)]),
        benchmark("Noodles", 22.0, 20.0, &[("Noodle House", 20.0), ("Pizza Palace", 25.0)]),
    ]
}

#[must_use]
pub fn campaigns() -> Vec<Campaign> {
    let rows: [(&str, &str, Channel, i32); 4] = [
        ("c1", "Summer Special", Channel::SocialMedia, 250),
        ("c2", "Email Blast Q2", Channel::Email, 420),
        ("c3", "Local Flyer Drop", Channel::Offline, 80),
        ("c4", "Google Ads", Channel::Ppc, 310),
    ];
    rows.into_iter()
        .map(|(id, name, channel, roi)| Campaign { id: id.into(), name: name.into(), channel, roi })
        .collect()
}

#[must_use]
pub fn rfm_segments() -> Vec<RfmSegment> {
    let rows: [(u32, &str, u8, u8, u8, u32); 5] = [
        (1, "Champions", 90, 95, 98, 150),
        (2, "Loyal Customers", 70, 80, 85, 400),
        (3, "At-Risk", 20, 30, 40, 250),
        (4, "New Customers", 95, 15, 20, 120),
        (5, "Hibernating", 10, 10, 15, 600),
    ];
    rows.into_iter()
        .map(|(id, name, recency, frequency, monetary, customer_count)| RfmSegment {
            id,
            name: name.into(),
            recency,
            frequency,
            monetary,
            customer_count,
        })
        .collect()
}
