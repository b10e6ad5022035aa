use sea_orm::{
    ColumnTrait, Condition, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select,
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
};
use std::str::FromStr;

use crate::models::{QueryOptions, SortDirection};
use crate::value::{MAX_SAFE_INTEGER, Tree, Value};

/// Escape character for LIKE patterns built from user text.
const LIKE_ESCAPE: char = '\\';

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Asc,
            SortDirection::Desc => Self::Desc,
        }
    }
}

/// Convert a scalar to a bindable value; NaN, null and containers have none.
fn to_sea_value(value: &Value) -> Option<sea_orm::Value> {
    match value {
        Value::Bool(b) => Some((*b).into()),
        Value::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
            #[allow(clippy::cast_possible_truncation)]
            let integral = *n as i64;
            Some(integral.into())
        }
        Value::Number(n) if n.is_finite() => Some((*n).into()),
        Value::String(s) => Some(s.clone().into()),
        _ => None,
    }
}

/// Escape LIKE wildcards so the operand matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Build a LIKE expression, upper-casing both sides for insensitive mode.
///
/// `prefix` and `suffix` are wildcards; `text` is escaped.
fn like_expr<C: ColumnTrait>(
    column: C,
    text: &str,
    (prefix, suffix): (&str, &str),
    insensitive: bool,
) -> SimpleExpr {
    let pattern = format!("{prefix}{}{suffix}", escape_like(text));
    if insensitive {
        let pattern = LikeExpr::new(pattern.to_uppercase()).escape(LIKE_ESCAPE);
        Expr::expr(Func::upper(Expr::col(column.as_column_ref()))).like(pattern)
    } else {
        column.like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
    }
}

/// Expressions for one operator object such as `{gte: 1, lt: 5}`.
fn operator_exprs<C: ColumnTrait + Copy>(field: &str, column: C, ops: &Tree) -> Vec<SimpleExpr> {
    let insensitive = ops.get("mode").and_then(Value::as_str) == Some("insensitive");
    let mut exprs = Vec::new();

    for (op, operand) in ops {
        let expr = match (op.as_str(), operand) {
            ("mode", _) => continue,
            ("not", Value::Null) => Some(column.is_not_null()),
            ("in", Value::Array(items)) => {
                Some(column.is_in(items.iter().filter_map(to_sea_value)))
            }
            ("contains", Value::String(s)) => Some(like_expr(column, s, ("%", "%"), insensitive)),
            ("startsWith", Value::String(s)) => Some(like_expr(column, s, ("", "%"), insensitive)),
            ("endsWith", Value::String(s)) => Some(like_expr(column, s, ("%", ""), insensitive)),
            (op, operand) => to_sea_value(operand).and_then(|v| match op {
                "gt" => Some(column.gt(v)),
                "gte" => Some(column.gte(v)),
                "lt" => Some(column.lt(v)),
                "lte" => Some(column.lte(v)),
                "not" => Some(column.ne(v)),
                _ => None,
            }),
        };
        match expr {
            Some(expr) => exprs.push(expr),
            None => tracing::debug!(field = %field, operator = %op, "Skipping unsupported condition"),
        }
    }
    exprs
}

fn filter_exprs<E: EntityTrait>(filter: &Tree) -> Vec<SimpleExpr> {
    let mut exprs = Vec::new();
    for (field, value) in filter {
        let Ok(column) = E::Column::from_str(field) else {
            tracing::debug!(field = %field, "No column for filter, leaving it to the caller");
            continue;
        };
        match value {
            Value::Null => exprs.push(column.is_null()),
            Value::Object(ops) => exprs.extend(operator_exprs(field, column, ops)),
            scalar => match to_sea_value(scalar) {
                Some(v) => exprs.push(column.eq(v)),
                None => tracing::debug!(field = %field, "Skipping value without SQL equivalent"),
            },
        }
    }
    exprs
}

/// Translate the column-level part of a `where` tree into a `Condition`.
///
/// Keys that do not name a column of `E`, such as relation filters left on
/// the parent, are skipped.
#[must_use]
pub fn build_condition<E: EntityTrait>(filter: &Tree) -> Condition {
    filter_exprs::<E>(filter)
        .into_iter()
        .fold(Condition::all(), Condition::add)
}

/// Apply filters, ordering and the pagination window to a select.
///
/// Nothing is executed; relation includes are left to the caller.
///
/// # Example
/// ```rust,ignore
/// let options = find_all_query(&query, modifiers.get("events"))?;
/// let events = apply_query_options(event::Entity::find(), &options)
///     .all(&db)
///     .await?;
/// ```
#[must_use]
pub fn apply_query_options<E: EntityTrait>(select: Select<E>, options: &QueryOptions) -> Select<E> {
    let mut select = select;

    if let Some(filter) = &options.filter {
        let exprs = filter_exprs::<E>(filter);
        if !exprs.is_empty() {
            select = select.filter(exprs.into_iter().fold(Condition::all(), Condition::add));
        }
    }

    for directive in options.order_by.iter().flatten() {
        match E::Column::from_str(&directive.field) {
            Ok(column) => select = select.order_by(column, directive.direction.into()),
            Err(_) => tracing::debug!(field = %directive.field, "No column to sort by"),
        }
    }

    if let Some(skip) = options.skip.and_then(|skip| u64::try_from(skip).ok()) {
        select = select.offset(skip);
    }
    if let Some(take) = options.take.and_then(|take| u64::try_from(take).ok()) {
        select = select.limit(take);
    }
    select
}
