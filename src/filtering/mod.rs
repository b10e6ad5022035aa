//! # Query Parameter Translation
//!
//! This module turns json-server style query parameters into the pieces of a
//! structured query description. Each step is a pure function; the
//! [`operations`](crate::operations) module wires them together.
//!
//! ## Query Parameter Examples
//!
//! ### Filtering
//! ```rust,ignore
//! // Equality, with type hints from the endpoint's modifier
//! GET /guests?eventId=1
//!
//! // Repeated keys become an IN list
//! GET /events?id=6&id=7
//!
//! // Comparison suffixes
//! GET /guests?fans_gt=21000&fans_lte=50000
//! GET /guests?eventSignupId_ne=null
//!
//! // Case-insensitive text matching: contains, ^prefix, suffix$
//! GET /guests?name_like=John
//! GET /guests?name_like=^Jo
//!
//! // Nested fields and inline type tags
//! GET /events?eventSchedule.type=festive
//! GET /events?_expand=guests&guests.fans_gt=num(21000)&guests.vip=bool(true)
//! ```
//!
//! ### Relationships, Sorting, Pagination
//! ```rust,ignore
//! GET /eventCategories?_expand=events.hosts&_expand=events.eventMetadata
//! GET /events?_sort=duration,id&_order=desc
//! GET /guests?_page=2&_limit=5
//! GET /guests?_start=0&_end=10
//! ```
//!
//! ## Filter Placement
//!
//! A filter on an included relation is moved into that relation's `where`
//! when it is written after `_expand` / `_embed`, and left on the parent when
//! written before. See [`propagate()`].

pub mod conditions;
pub mod nested;
pub mod pagination;
pub mod propagate;
pub mod relations;
pub mod sort;
pub mod values;

pub use conditions::{FilterOperator, process_filtering};
pub use nested::{nest_dotted_key, transform_dot_keys};
pub use pagination::{DEFAULT_LIMIT, Window, process_pagination, process_slicing, resolve_window};
pub use propagate::propagate;
pub use relations::{process_expand_string, process_relationships};
pub use sort::process_sorting;
pub use values::{parse_special_value, parse_value};
