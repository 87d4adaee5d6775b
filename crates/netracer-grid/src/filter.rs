//! Column filter predicates.
//!
//! A column's [`FilterVariant`] selects one predicate from this module. Every
//! predicate has the same shape, [`Predicate`]: it receives the row's value
//! for the column and the column's current filter value, and answers whether
//! the row stays in the view.
//!
//! Two kinds of "missing" are kept apart:
//!
//! - a missing **filter** value (`None`, or an empty one) means the column is
//!   unfiltered, so every predicate returns `true`;
//! - a missing **row** value ([`Value::None`]) never satisfies an active filter.
//!
//! | Variant | Row value | Matches when |
//! |---------|-----------|--------------|
//! | `text` | any scalar | filter text is a substring of the value text |
//! | `select` | any scalar | value text equals the option (`""`/`ALL` match all) |
//! | `range` | comma list or number | any numeric token is in `[min, max]` |
//! | `datetime` | epoch seconds | value is strictly after the filter instant |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Lower bound used when a range filter has no minimum.
pub const RANGE_DOMAIN_MIN: f64 = 0.0;

/// Upper bound used when a range filter has no maximum.
pub const RANGE_DOMAIN_MAX: f64 = 65535.0;

/// Select option that disables the filter.
pub const SELECT_ALL: &str = "ALL";

/// Signature shared by all filter predicates.
pub type Predicate = fn(&Value<'_>, Option<&FilterValue>) -> bool;

/// The predicate family bound to a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterVariant {
    /// Substring search.
    #[default]
    Text,
    /// Numeric range over comma-separated tokens.
    Range,
    /// One of a fixed set of categorical options.
    Select,
    /// Strictly-after comparison on epoch seconds.
    DateTime,
    /// Column cannot be filtered.
    None,
}

impl FilterVariant {
    /// Returns the default predicate for this variant.
    ///
    /// `case_insensitive` only affects [`FilterVariant::Text`]. Columns that
    /// cannot be filtered have no predicate.
    pub fn predicate(self, case_insensitive: bool) -> Option<Predicate> {
        match self {
            FilterVariant::Text if case_insensitive => Some(text_contains_ignore_case),
            FilterVariant::Text => Some(text_contains),
            FilterVariant::Range => Some(range_any_token),
            FilterVariant::Select => Some(select_equals),
            FilterVariant::DateTime => Some(after_datetime),
            FilterVariant::None => None,
        }
    }

    /// Returns `true` if a filter value of this shape belongs to the variant.
    pub fn accepts(self, value: &FilterValue) -> bool {
        matches!(
            (self, value),
            (FilterVariant::Text, FilterValue::Text(_))
                | (FilterVariant::Range, FilterValue::Range { .. })
                | (FilterVariant::Select, FilterValue::Select(_))
                | (FilterVariant::DateTime, FilterValue::DateTime(_))
        )
    }

    /// Returns the configuration name of this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterVariant::Text => "text",
            FilterVariant::Range => "range",
            FilterVariant::Select => "select",
            FilterVariant::DateTime => "datetime",
            FilterVariant::None => "none",
        }
    }
}

impl std::fmt::Display for FilterVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The current filter of one column.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Search text for a text column.
    Text(String),
    /// Inclusive numeric bounds; a missing bound falls back to the domain.
    Range { min: Option<f64>, max: Option<f64> },
    /// Selected option for a select column.
    Select(String),
    /// Rows must be strictly after this instant.
    DateTime(DateTime<Utc>),
}

impl FilterValue {
    /// Creates a text filter.
    pub fn text(s: impl Into<String>) -> Self {
        FilterValue::Text(s.into())
    }

    /// Creates a select filter.
    pub fn select(option: impl Into<String>) -> Self {
        FilterValue::Select(option.into())
    }

    /// Creates a range filter.
    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        FilterValue::Range { min, max }
    }

    /// Creates a datetime filter from seconds since the Unix epoch.
    ///
    /// Out-of-range seconds clamp to the epoch.
    pub fn after_secs(secs: i64) -> Self {
        FilterValue::DateTime(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }

    /// Returns `true` if this value filters nothing.
    ///
    /// Empty search text, an empty or `ALL` selection and a range without
    /// either bound are all equivalent to clearing the filter.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) => s.is_empty(),
            FilterValue::Select(s) => s.is_empty() || s == SELECT_ALL,
            FilterValue::Range { min, max } => min.is_none() && max.is_none(),
            FilterValue::DateTime(_) => false,
        }
    }

    /// Returns the range bounds, if this is a range filter.
    pub fn bounds(&self) -> Option<(Option<f64>, Option<f64>)> {
        match self {
            FilterValue::Range { min, max } => Some((*min, *max)),
            _ => None,
        }
    }

    /// Returns the shape name of this value.
    pub fn kind(&self) -> &'static str {
        match self {
            FilterValue::Text(_) => "text",
            FilterValue::Range { .. } => "range",
            FilterValue::Select(_) => "select",
            FilterValue::DateTime(_) => "datetime",
        }
    }
}

/// Applies an edit of the minimum box to a range filter.
///
/// With no previous maximum the range collapses to `[min, min]`, so typing a
/// single port searches for exactly that port.
pub fn with_range_min(previous: Option<&FilterValue>, min: Option<f64>) -> FilterValue {
    let old_max = previous.and_then(FilterValue::bounds).and_then(|(_, max)| max);
    match old_max {
        Some(max) => FilterValue::range(min, Some(max)),
        None => FilterValue::range(min, min),
    }
}

/// Applies an edit of the maximum box to a range filter, keeping the minimum.
pub fn with_range_max(previous: Option<&FilterValue>, max: Option<f64>) -> FilterValue {
    let old_min = previous.and_then(FilterValue::bounds).and_then(|(min, _)| min);
    FilterValue::range(old_min, max)
}

// ============================================================================
// Predicates
// ============================================================================

/// Case-sensitive substring match.
pub fn text_contains(row: &Value<'_>, filter: Option<&FilterValue>) -> bool {
    let needle = match filter {
        Some(FilterValue::Text(s)) if !s.is_empty() => s,
        _ => return true,
    };
    row.text().is_some_and(|text| text.contains(needle.as_str()))
}

/// Case-insensitive substring match.
pub fn text_contains_ignore_case(row: &Value<'_>, filter: Option<&FilterValue>) -> bool {
    let needle = match filter {
        Some(FilterValue::Text(s)) if !s.is_empty() => s.to_lowercase(),
        _ => return true,
    };
    row.text()
        .is_some_and(|text| text.to_lowercase().contains(&needle))
}

/// Exact equality against the selected option.
pub fn select_equals(row: &Value<'_>, filter: Option<&FilterValue>) -> bool {
    let option = match filter {
        Some(FilterValue::Select(s)) if !s.is_empty() && s != SELECT_ALL => s,
        _ => return true,
    };
    row.text().is_some_and(|text| text == option.as_str())
}

/// Any numeric token of the row within the inclusive bounds.
pub fn range_any_token(row: &Value<'_>, filter: Option<&FilterValue>) -> bool {
    let (min, max) = match filter {
        Some(FilterValue::Range { min, max }) => (
            min.unwrap_or(RANGE_DOMAIN_MIN),
            max.unwrap_or(RANGE_DOMAIN_MAX),
        ),
        _ => return true,
    };
    row.numeric_tokens()
        .into_iter()
        .any(|token| token >= min && token <= max)
}

/// Row epoch seconds strictly greater than the filter instant.
pub fn after_datetime(row: &Value<'_>, filter: Option<&FilterValue>) -> bool {
    let threshold = match filter {
        Some(FilterValue::DateTime(at)) => at.timestamp_millis() as f64 / 1000.0,
        _ => return true,
    };
    row.epoch_seconds().is_some_and(|secs| secs > threshold)
}
