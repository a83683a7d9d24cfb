//! Find filters
//!
//! The API accepts either a single `field == value` predicate or a chain of
//! sub-filters joined by a connective.

use serde::{Deserialize, Serialize};

/// Field name used to look up zones by their config ID
pub const ZONE_CONFIG_ID: &str = "ZoneConfigId";

/// Field name used to look up records by ID
pub const RECORD_ID: &str = "RecordId";

/// Connective joining the members of a filter chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Connective {
    /// All sub-filters must match
    And,
    /// Any sub-filter may match
    Or,
}

/// A find predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    /// Equality on a single field
    Field {
        /// Field name, e.g. `ZoneConfigId`
        field: String,
        /// Expected value
        value: String,
    },

    /// Sub-filters joined by a connective
    Chain {
        /// How the sub-filters combine
        #[serde(rename = "subFilterConnective")]
        connective: Connective,
        /// The sub-filters
        #[serde(rename = "subFilter")]
        filters: Vec<Filter>,
    },
}

impl Filter {
    /// Equality predicate on `field`
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Field {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Conjunction of `filters`
    pub fn and(filters: Vec<Filter>) -> Self {
        Self::Chain {
            connective: Connective::And,
            filters,
        }
    }

    /// Disjunction of `filters`
    pub fn or(filters: Vec<Filter>) -> Self {
        Self::Chain {
            connective: Connective::Or,
            filters,
        }
    }

    /// Match a zone by its config ID
    pub fn zone_config_id(zone_id: impl Into<String>) -> Self {
        Self::eq(ZONE_CONFIG_ID, zone_id)
    }

    /// Match a record by its ID in any zone
    pub fn record_id(record_id: impl Into<String>) -> Self {
        Self::eq(RECORD_ID, record_id)
    }

    /// Match a record by zone and record ID together
    pub fn record_in_zone(zone_id: impl Into<String>, record_id: impl Into<String>) -> Self {
        Self::and(vec![
            Self::eq(ZONE_CONFIG_ID, zone_id),
            Self::eq(RECORD_ID, record_id),
        ])
    }
}
