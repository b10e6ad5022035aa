// Sea-ORM adapter: applies a translated query description to a select
// without executing it.

pub mod select;

pub use select::{apply_query_options, build_condition};
