//! Per-endpoint type hints for value coercion.
//!
//! Query strings carry only text, so each endpoint declares which of its
//! fields should be read as numbers or booleans. Nested fields that are not
//! covered can still be tagged inline with `num(..)` / `bool(..)`.
//!
//! Modifiers can be declared in code or loaded from JSON:
//!
//! ```rust
//! use querycrate::modifier::{QueryModifier, QueryModifiers};
//!
//! let modifiers = QueryModifiers::from_json(r#"{
//!     "events": { "numericValues": ["id", "duration"] },
//!     "guests": { "numericValues": ["id", "fans"], "booleanValues": ["vip"] }
//! }"#).unwrap();
//!
//! assert!(modifiers.get("guests").unwrap().is_boolean("vip"));
//! assert_eq!(
//!     modifiers.get("events"),
//!     Some(&QueryModifier::new().numeric(["id", "duration"]))
//! );
//! ```

use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use crate::errors::QueryError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryModifier {
    /// Fields parsed with numeric coercion
    pub numeric_values: HashSet<String>,
    /// Fields parsed as `true` / `false`
    pub boolean_values: HashSet<String>,
}

impl QueryModifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn numeric<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric_values.extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn boolean<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.boolean_values.extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn is_numeric(&self, field: &str) -> bool {
        self.numeric_values.contains(field)
    }

    #[must_use]
    pub fn is_boolean(&self, field: &str) -> bool {
        self.boolean_values.contains(field)
    }
}

/// Modifiers keyed by endpoint name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct QueryModifiers {
    endpoints: HashMap<String, QueryModifier>,
}

impl QueryModifiers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, endpoint: impl Into<String>, modifier: QueryModifier) -> Self {
        self.endpoints.insert(endpoint.into(), modifier);
        self
    }

    /// Load modifiers from a JSON object of `endpoint -> modifier`.
    ///
    /// # Errors
    /// Returns [`QueryError::InvalidModifiers`] when the document does not parse.
    pub fn from_json(json: &str) -> Result<Self, QueryError> {
        let modifiers: Self = serde_json::from_str(json)?;
        tracing::debug!(endpoints = modifiers.endpoints.len(), "Loaded query modifiers");
        Ok(modifiers)
    }

    #[must_use]
    pub fn get(&self, endpoint: &str) -> Option<&QueryModifier> {
        self.endpoints.get(endpoint)
    }
}
