//! The fixed record schema: required keys, enumerations and patterns.

use std::sync::OnceLock;

use regex::Regex;

/// Keys every record must carry, in reporting order.
pub const REQUIRED_FIELDS: [&str; 14] = [
    "name",
    "town",
    "address",
    "phone",
    "website",
    "cuisine",
    "price",
    "ordering",
    "dietary",
    "hours",
    "highlight_items",
    "notes",
    "last_verified",
    "sources",
];

pub const PRICE_VALUES: [&str; 3] = ["$", "$$", "$$$"];

/// Sorted, as listed in messages.
pub const ORDERING_VALUES: [&str; 3] = ["delivery", "dine-in", "takeout"];

pub const DIETARY_KEYS: [&str; 3] = [
    "vegetarian_friendly",
    "vegan_options",
    "gluten_free_friendly",
];

pub const DAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

/// `closed` or `H:MM-H:MM` / `HH:MM-HH:MM`, whole string.
pub fn hour_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:closed|[0-9]{1,2}:[0-9]{2}-[0-9]{1,2}:[0-9]{2})$").expect("static pattern")
    })
}

/// `YYYY-MM-DD`, whole string. Calendar validity is checked separately.
pub fn date_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("static pattern"))
}
