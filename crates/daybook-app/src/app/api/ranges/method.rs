//! Handlers for the range endpoints.
//!
//! Every handler answers `{"ranges": [...]}` on success and
//! `{"error": "..."}` with the status of the `AppError` otherwise.

use daybook_calendar::date::TEXT_YEARS;
use daybook_calendar::{Range, RangeSet};
use salvo::writing::Json;
use salvo::{Depot, Request, Response, handler};

use super::types::{AlgebraRequest, ErrorResponse, FilterRequest, RangesResponse, ShiftRequest};
use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult};

/// ## Summary
/// POST /api/ranges/sub - Subtracts `others` from `ranges`.
///
/// ## Errors
/// Returns HTTP 400 if the body is not valid JSON or holds a malformed date
/// Returns HTTP 422 if the combined day span exceeds `ranges.max_span_days`
#[handler]
pub async fn sub(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = run_algebra(req, depot, |set, others| set.sub(others)).await;
    respond(res, result);
}

/// ## Summary
/// POST /api/ranges/impose - Unions `others` into `ranges`, merging
/// overlapping and adjacent ranges.
///
/// ## Errors
/// Returns HTTP 400 if the body is not valid JSON or holds a malformed date
/// Returns HTTP 422 if the combined day span exceeds `ranges.max_span_days`
#[handler]
pub async fn impose(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let result = run_algebra(req, depot, |set, others| set.impose(others)).await;
    respond(res, result);
}

/// ## Summary
/// POST /api/ranges/filter-empty - Drops single-day ranges, keeping order.
#[handler]
pub async fn filter_empty(req: &mut Request, res: &mut Response) {
    let result = req
        .parse_json::<FilterRequest>()
        .await
        .map(|body| body.ranges.filter_empty())
        .map_err(AppError::from);
    respond(res, result);
}

/// ## Summary
/// POST /api/ranges/shift-end - Moves every end date by `days`.
///
/// Ranges are neither re-sorted nor merged.
///
/// ## Errors
/// Returns HTTP 422 if a shifted end leaves the years `0000..=9999`
#[handler]
pub async fn shift_end(req: &mut Request, res: &mut Response) {
    let result = req
        .parse_json::<ShiftRequest>()
        .await
        .map(|mut body| {
            body.ranges.shift_end(body.days);
            body.ranges
        })
        .map_err(AppError::from);
    respond(res, result);
}

async fn run_algebra(
    req: &mut Request,
    depot: &Depot,
    op: impl FnOnce(&RangeSet, &[Range]) -> RangeSet,
) -> AppResult<RangeSet> {
    let body: AlgebraRequest = req.parse_json().await?;
    check_span(depot, &body.ranges, &body.others)?;

    Ok(op(&body.ranges, &body.others))
}

/// Rejects requests whose day expansion would exceed the configured limit.
fn check_span(depot: &Depot, ranges: &RangeSet, others: &[Range]) -> AppResult<()> {
    let limit = get_config_from_depot(depot)?.ranges.max_span_days;
    let requested = others
        .iter()
        .map(Range::day_count)
        .fold(ranges.day_count(), u64::saturating_add);

    if requested > limit {
        return Err(AppError::SpanLimitExceeded { requested, limit });
    }

    Ok(())
}

/// Rejects results holding a date the JSON text form cannot carry.
fn check_representable(ranges: RangeSet) -> AppResult<RangeSet> {
    let outside = |range: &&Range| {
        !TEXT_YEARS.contains(&range.start.year) || !TEXT_YEARS.contains(&range.end.year)
    };
    if let Some(range) = ranges.iter().find(outside) {
        return Err(AppError::UnrepresentableResult(*range));
    }

    Ok(ranges)
}

fn respond(res: &mut Response, result: AppResult<RangeSet>) {
    match result.and_then(check_representable) {
        Ok(ranges) => {
            tracing::debug!(ranges = ranges.len(), "Range request handled");
            res.render(Json(RangesResponse { ranges }));
        }
        Err(e) => {
            let status = e.status_code();
            if status.is_server_error() {
                tracing::error!(error = %e, "Range request failed");
            } else {
                tracing::warn!(error = %e, "Rejected range request");
            }
            res.status_code(status);
            res.render(Json(ErrorResponse {
                error: e.to_string(),
            }));
        }
    }
}
