/// Application name
pub const APP_NAME: &str = "Barkeep";

/// File name of the bundled catalog asset
pub const CATALOG_ASSET_NAME: &str = "iba_cocktails_complete.json";

/// Debounce applied to search input before a query is issued
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// How often the Discover screen rotates its "cocktail of the day"
pub const COCKTAIL_OF_DAY_ROTATION_SECS: u64 = 3600;

/// Lower clamp for the derived preparation-time estimate, in minutes
pub const PREP_TIME_MIN_MINUTES: u32 = 2;

/// Upper clamp for the derived preparation-time estimate, in minutes
pub const PREP_TIME_MAX_MINUTES: u32 = 20;
