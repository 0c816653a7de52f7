//! JSON endpoints over the range set algebra.

use salvo::Router;

use crate::app::api::RANGES_ROUTE_COMPONENT;

pub mod method;
pub mod types;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(RANGES_ROUTE_COMPONENT)
        .push(Router::with_path("sub").post(method::sub))
        .push(Router::with_path("impose").post(method::impose))
        .push(Router::with_path("filter-empty").post(method::filter_empty))
        .push(Router::with_path("shift-end").post(method::shift_end))
}
