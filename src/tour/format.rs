//! Display helpers for the listing screens (Turkish locale).

use crate::models::{PoiCategory, PropertySubtype, RoomType};

pub const DEFAULT_CURRENCY: &str = "TRY";

/// Format a price the way `tr-TR` currency formatting does, without
/// fraction digits: `₺5.195.000`, `€1.250`, `CHF 300`
pub fn format_price(price: f64, currency: Option<&str>) -> String {
    let code = currency
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .unwrap_or(DEFAULT_CURRENCY)
        .to_ascii_uppercase();

    let rounded = price.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = group_thousands(rounded.abs() as u64);

    match currency_symbol(&code) {
        Some(symbol) => format!("{sign}{symbol}{digits}"),
        None => format!("{sign}{code} {digits}"),
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "TRY" => Some("₺"),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    }
}

fn group_thousands(value: u64) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

pub fn room_type_label(room_type: RoomType) -> &'static str {
    match room_type {
        RoomType::LivingRoom => "Salon",
        RoomType::Bedroom => "Yatak Odası",
        RoomType::Kitchen => "Mutfak",
        RoomType::Bathroom => "Banyo",
        RoomType::Balcony => "Balkon",
        RoomType::Hallway => "Koridor",
        RoomType::Entrance => "Giriş",
        RoomType::Storage => "Depo",
        RoomType::Other => "Diğer",
    }
}

pub fn property_subtype_label(subtype: PropertySubtype) -> &'static str {
    match subtype {
        PropertySubtype::Single => "Normal",
        PropertySubtype::Duplex => "Dubleks",
        PropertySubtype::Triplex => "Tripleks",
    }
}

/// Icon name (lucide) for a point of interest
pub fn poi_icon(category: PoiCategory) -> &'static str {
    match category {
        PoiCategory::School => "school",
        PoiCategory::Market => "shopping-cart",
        PoiCategory::Transport => "bus",
        PoiCategory::Hospital => "hospital",
        PoiCategory::Park => "tree-pine",
        PoiCategory::Other => "circle-dot",
    }
}

/// `floor/total_floors`, either side may be unknown
pub fn floor_label(floor: Option<i32>, total_floors: Option<i32>) -> String {
    let show = |value: Option<i32>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
    format!("{}/{}", show(floor), show(total_floors))
}
