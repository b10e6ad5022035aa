use crate::query::{QueryValue, ReservedParams};
use crate::value::{MAX_SAFE_INTEGER, parse_number};

/// Page size when `_limit` is not given.
pub const DEFAULT_LIMIT: i64 = 10;

/// Resolved `skip` / `take` pair.
///
/// A side is `None` when its arithmetic did not produce a whole number, for
/// example `_page=abc` or `_limit=2.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: Option<i64>,
    pub take: Option<i64>,
}

/// Whole, finite counts only.
fn to_count(n: f64) -> Option<i64> {
    if !n.is_finite() || n.fract() != 0.0 || n.abs() > MAX_SAFE_INTEGER {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let count = n as i64;
    Some(count)
}

/// Page-based window: `skip = (page - 1) * limit`, `take = limit`.
#[must_use]
pub fn process_pagination(page: f64, limit: f64) -> Window {
    Window {
        skip: to_count((page - 1.0) * limit),
        take: to_count(limit),
    }
}

/// Index-based window: `skip = start`, `take = end - start`.
#[must_use]
pub fn process_slicing(start: f64, end: f64) -> Window {
    Window {
        skip: to_count(start),
        take: to_count(end - start),
    }
}

fn parse_count(value: Option<&QueryValue>) -> Option<f64> {
    value?.last().map(parse_number)
}

/// Pick page mode (`_page`) or slice mode (`_start`), page mode first.
///
/// The mode follows which parameter is present, not whether it parses.
/// Returns `None` when neither is present.
#[must_use]
pub fn resolve_window(params: &ReservedParams) -> Option<Window> {
    #[allow(clippy::cast_precision_loss)]
    let default_limit = DEFAULT_LIMIT as f64;
    let limit = parse_count(params.limit.as_ref()).unwrap_or(default_limit);

    if let Some(page) = parse_count(params.page.as_ref()) {
        return Some(process_pagination(page, limit));
    }
    let start = parse_count(params.start.as_ref())?;
    let end = parse_count(params.end.as_ref()).unwrap_or(start + limit);
    Some(process_slicing(start, end))
}
