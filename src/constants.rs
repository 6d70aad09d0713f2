/// Date-range length used when the request omits or mangles `dateRange`
pub const DEFAULT_DATE_RANGE_DAYS: u32 = 30;

/// Largest accepted `dateRange`
pub const MAX_DATE_RANGE_DAYS: u32 = 365;

/// Window length used when an explicit to-date fails to parse and no range is set
pub const FALLBACK_WINDOW_DAYS: u32 = 30;

/// Number of entries returned in the top-users ranking
pub const TOP_USERS_LIMIT: usize = 10;

/// Calendar-day format used for query dates and trend points
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Series key used when a company display name yields an empty camelCase key
pub const DEFAULT_SERIES_KEY: &str = "all";

/// Separator between the action text and the company name in event content
pub const COMPANY_NAME_SEPARATOR: &str = " - ";

/// Upper bound on free-text query parameters (`search`, `companyId`)
pub const MAX_QUERY_TEXT_LEN: usize = 256;

/// Minimum number of columns a CSV row needs to become an event
pub const MIN_CSV_COLUMNS: usize = 9;

/// Default cap on the number of events loaded at startup
pub const DEFAULT_MAX_EVENTS: usize = 1_000_000;

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "usage-analytics-dashboard";
