mod app_specific;
pub mod ranges;

use salvo::Router;

// Re-export route constants from core
pub use daybook_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, APP_ROUTE_COMPONENT, APP_ROUTE_PREFIX,
    RANGES_ROUTE_COMPONENT, RANGES_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the main API router.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(ranges::routes())
}
