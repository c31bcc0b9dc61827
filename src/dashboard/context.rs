//! Context formatter: renders the active module's data as prompt text.
//!
//! Each module branch reads only its own collections from the snapshot.

use std::fmt::Write;

use super::{Campaign, Competitor, DashboardState, MarkerType, Module, PriceBenchmark, Product, RfmSegment};

/// Render the detail block for `snapshot.active_module`.
#[must_use]
pub fn format_module_context(snapshot: &DashboardState) -> String {
    match snapshot.active_module {
        Module::Place => format_place(snapshot),
        Module::Product => {
            let mut out = String::from(
                "## Detailed View: Product Module\nThe user is viewing the menu engineering analysis.\n",
            );
            out.push_str(&format_products(&snapshot.products));
            out
        }
        Module::Price => {
            let mut out =
                String::from("## Detailed View: Price Module\nThe user is viewing the competitive pricing analysis.\n");
            out.push_str(&format_prices(&snapshot.price_benchmarks));
            out
        }
        Module::Promotion => {
            let mut out = String::from(
                "## Detailed View: Promotion Module\nThe user is viewing marketing and customer segmentation data.\n",
            );
            out.push_str(&format_campaigns(&snapshot.campaigns));
            out.push_str(&format_rfm(&snapshot.rfm_segments));
            out
        }
    }
}

fn format_place(snapshot: &DashboardState) -> String {
    let layers = if snapshot.visible_layers.is_empty() {
        "None".to_string()
    } else {
        snapshot
            .visible_layers
            .iter()
            .map(|l| l.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let selected = match &snapshot.selected_competitor {
        Some(c) => format!("The user has selected \"{}\".", c.name),
        None => "No competitor is selected.".to_string(),
    };

    let mut out = String::from(
        "## Detailed View: Place Module\nThe user is viewing the map of nearby restaurants.\n",
    );
    let _ = writeln!(out, "- Visible Layers: {layers}");
    let _ = writeln!(out, "- {selected}");
    out.push_str("- Visible Competitors:\n");
    out.push_str(&format_competitors(
        snapshot
            .competitors
            .iter()
            .filter(|c| c.marker != MarkerType::SelfRestaurant),
    ));
    out
}

fn format_competitors<'a>(competitors: impl Iterator<Item = &'a Competitor>) -> String {
    let mut out = String::new();
    for c in competitors {
        let _ = writeln!(
            out,
            "- {} ({}, {}, Rating: {}/5, Address: {})",
            c.name, c.cuisine, c.price_range, c.rating, c.address
        );
    }
    out
}

fn format_products(products: &[Product]) -> String {
    let mut out = String::new();
    for p in products {
        let _ = writeln!(
            out,
            "- {} (Popularity: {}, Profitability: {}, Category: {})",
            p.name, p.popularity, p.profitability, p.category
        );
    }
    out
}

fn format_prices(benchmarks: &[PriceBenchmark]) -> String {
    let mut out = String::new();
    for b in benchmarks {
        let _ = writeln!(
            out,
            "- {}: Your Price: ${}, Competitor Avg: ${:.2}",
            b.item, b.own_price, b.competitor_avg
        );
    }
    out
}

fn format_campaigns(campaigns: &[Campaign]) -> String {
    let mut out = String::new();
    for c in campaigns {
        let _ = writeln!(out, "- {} ({}): {}% ROI", c.name, c.channel, c.roi);
    }
    out
}

fn format_rfm(segments: &[RfmSegment]) -> String {
    let mut out = String::new();
    for s in segments {
        let _ = writeln!(out, "- {}: {} customers", s.name, s.customer_count);
    }
    out
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
