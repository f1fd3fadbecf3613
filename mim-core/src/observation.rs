//! Grouped-count response rows and their extraction from feature sets.

use crate::months::atomic_month_label;
use crate::query::COUNT_FIELD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Errors raised while extracting grouped-count rows from a query response.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ObservationError {
    MissingAttribute(String),
    NonCountValue(String),
}

impl fmt::Display for ObservationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservationError::MissingAttribute(field) => {
                write!(f, "response feature is missing attribute '{field}'")
            }
            ObservationError::NonCountValue(field) => {
                write!(f, "attribute '{field}' is not a non-negative count")
            }
        }
    }
}

impl std::error::Error for ObservationError {}

/// A single feature returned by a query: a bag of named attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub attributes: Map<String, Value>,
}

impl Feature {
    /// A grouped-count result feature, as a source produces for one group.
    pub fn grouped_count(group_field: &str, label: &str, value: u64) -> Self {
        let mut attributes = Map::new();
        attributes.insert(group_field.to_string(), Value::from(label));
        attributes.insert(COUNT_FIELD.to_string(), Value::from(value));
        Self { attributes }
    }
}

/// Response shape of a feature query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub features: Vec<Feature>,
}

/// One grouped-count result row: a month label and how many features fell
/// into it. Transient; discarded once the chart matrix is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub month: String,
    pub value: u64,
}

impl Observation {
    /// Extract grouped-count observations from a query response.
    ///
    /// The group label is read from `group_field` and reduced to its atomic
    /// month name (composites like `"January-1"` lose their suffix here,
    /// before matrix building); the count is read from [`COUNT_FIELD`].
    pub fn from_feature_set(
        set: &FeatureSet,
        group_field: &str,
    ) -> Result<Vec<Observation>, ObservationError> {
        set.features
            .iter()
            .map(|feature| {
                let raw = feature
                    .attributes
                    .get(group_field)
                    .and_then(Value::as_str)
                    .ok_or_else(|| ObservationError::MissingAttribute(group_field.to_string()))?;
                let value = feature
                    .attributes
                    .get(COUNT_FIELD)
                    .and_then(Value::as_u64)
                    .ok_or_else(|| ObservationError::NonCountValue(COUNT_FIELD.to_string()))?;
                Ok(Observation {
                    month: atomic_month_label(raw).to_string(),
                    value,
                })
            })
            .collect()
    }
}
