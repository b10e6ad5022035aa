//! # querycrate
//!
//! Translate json-server style query strings into a structured query
//! description (`where`, `include`, `orderBy`, `skip`, `take`) that a
//! data-access layer can execute.
//!
//! ```rust
//! use querycrate::{QueryMap, QueryModifier, find_all_query};
//! use serde_json::json;
//!
//! let modifier = QueryModifier::new().numeric(["id", "fans", "eventId"]).boolean(["vip"]);
//! let query = QueryMap::parse("eventId=1&fans_gt=21000&_sort=fans&_order=desc");
//! let options = find_all_query(&query, Some(&modifier)).unwrap();
//!
//! assert_eq!(serde_json::to_value(&options).unwrap(), json!({
//!     "where": {"eventId": 1, "fans": {"gt": 21000}},
//!     "orderBy": [{"fans": "desc"}]
//! }));
//! ```

pub mod database;
pub mod errors;
pub mod extract;
pub mod filtering;
pub mod merge;
pub mod models;
pub mod modifier;
pub mod operations;
pub mod query;
pub mod value;

pub use database::{apply_query_options, build_condition};
pub use errors::QueryError;
pub use extract::FindQuery;
pub use models::{FindOneOptions, QueryOptions, SortDirection, SortDirective};
pub use modifier::{QueryModifier, QueryModifiers};
pub use operations::{find_all_query, find_one_query};
pub use query::{QueryMap, QueryValue, ReservedParams, split_reserved};
pub use value::{Tree, Value};
