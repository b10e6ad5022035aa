use crate::models::{SortDirection, SortDirective};
use crate::query::QueryValue;

/// Pair `_sort` fields with `_order` directions by position.
///
/// Both parameters accept comma separated lists and repeated keys. Fields
/// without a matching direction sort ascending; surplus directions are
/// ignored. Returns `None` without a `_sort`.
///
/// # Example
/// ```rust
/// use querycrate::filtering::process_sorting;
/// use querycrate::models::{SortDirection, SortDirective};
///
/// let order_by = process_sorting(Some(&"duration,id".into()), Some(&"desc".into())).unwrap();
/// assert_eq!(order_by, vec![
///     SortDirective::new("duration", SortDirection::Desc),
///     SortDirective::new("id", SortDirection::Asc),
/// ]);
/// ```
#[must_use]
pub fn process_sorting(sort: Option<&QueryValue>, order: Option<&QueryValue>) -> Option<Vec<SortDirective>> {
    let fields = sort?.comma_separated();
    let directions = order.map(QueryValue::comma_separated).unwrap_or_default();

    let order_by = fields
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let direction = directions
                .get(i)
                .map_or(SortDirection::Asc, |order| SortDirection::parse(order));
            SortDirective::new(field, direction)
        })
        .collect();
    Some(order_by)
}
