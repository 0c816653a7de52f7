/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const APP_ROUTE_COMPONENT: &str = "app";
pub const APP_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", APP_ROUTE_COMPONENT);

pub const RANGES_ROUTE_COMPONENT: &str = "ranges";
pub const RANGES_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", RANGES_ROUTE_COMPONENT);

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "DAYBOOK";
