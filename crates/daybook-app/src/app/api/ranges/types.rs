//! Request and response payloads for the range endpoints.

use daybook_calendar::{Range, RangeSet};
use serde::{Deserialize, Serialize};

/// ## Summary
/// Body of `sub` and `impose`: the set to operate on and the ranges to
/// exclude or include.
#[derive(Debug, Serialize, Deserialize)]
pub struct AlgebraRequest {
    pub ranges: RangeSet,
    #[serde(default)]
    pub others: Vec<Range>,
}

/// Body of `filter-empty`.
#[derive(Debug, Serialize, Deserialize)]
pub struct FilterRequest {
    pub ranges: RangeSet,
}

/// Body of `shift-end`; `days` may be negative.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShiftRequest {
    pub ranges: RangeSet,
    pub days: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RangesResponse {
    pub ranges: RangeSet,
}

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
