//! Ranked digest - the top-N price-sorted hotel summary sent to the user.

use serde::{Deserialize, Serialize};

use super::JobStatus;

/// How many hotels the digest shows.
const TOP_ENTRIES: usize = 5;
/// Descriptions at or above this length are dropped to bound message size.
const MAX_DESCRIPTION_CHARS: usize = 100;
/// Missing or unparseable prices sort after everything else.
const PRICE_SENTINEL: u64 = u64::MAX;
/// Separator line between digest entries.
pub const ENTRY_SEPARATOR: &str = "──────────────────────────────";

/// One hotel record returned by the inventory provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelOffer {
    pub name: String,
    pub stars: u8,
    /// Tour price in whole currency units; `None` when missing or garbled.
    pub price: Option<u64>,
    pub country: String,
    pub region: String,
    pub rating: f64,
    pub description: Option<String>,
}

/// Final results of a converged search job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub status: JobStatus,
    pub hotels: Vec<HotelOffer>,
}

/// Renders the ranked digest for a finished search.
///
/// Hotels are sorted ascending by price with missing prices last; only the
/// cheapest [`TOP_ENTRIES`] are rendered. Zero hotels produce a single
/// "nothing found" message rather than an empty list.
pub fn format_digest(results: &SearchResults) -> String {
    if results.hotels.is_empty() {
        return "🔍 По вашему запросу туров не найдено.".to_string();
    }

    let mut hotels: Vec<&HotelOffer> = results.hotels.iter().collect();
    hotels.sort_by_key(|h| h.price.unwrap_or(PRICE_SENTINEL));

    let status = &results.status;
    let mut message = format!(
        "🎯 Найдено {} отелей и {} туров!\n",
        status.hotels_found.max(results.hotels.len() as u32),
        status.tours_found
    );
    if let Some(min_price) = status.min_price {
        message.push_str(&format!("💰 Цены от {} ₽\n", group_thousands(min_price)));
    }
    message.push('\n');

    for (i, hotel) in hotels.iter().take(TOP_ENTRIES).enumerate() {
        message.push_str(&format!(
            "{}. {} {}\n",
            i + 1,
            hotel.name,
            "⭐".repeat(hotel.stars as usize)
        ));
        if hotel.rating > 0.0 {
            message.push_str(&format!("📊 Рейтинг: {:.1}/5\n", hotel.rating));
        }
        message.push_str(&format!("📍 {}, {}\n", hotel.country, hotel.region));
        match hotel.price {
            Some(price) => {
                message.push_str(&format!("💰 От {} ₽\n", group_thousands(price)));
            }
            None => message.push_str("💰 Цена по запросу\n"),
        }
        if let Some(desc) = &hotel.description {
            if desc.chars().count() < MAX_DESCRIPTION_CHARS {
                message.push_str(&format!("ℹ️ {}\n", desc));
            }
        }
        message.push_str(&format!("\n{}\n\n", ENTRY_SEPARATOR));
    }

    message
}

/// Groups digits in threes: 125000 -> "125 000".
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}
