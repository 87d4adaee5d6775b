//! Runtime value types for column access.
//!
//! The [`Value`] enum represents the value of a single field extracted from a
//! record. Column accessors produce it, filter predicates consume it, and the
//! sort comparator orders by it.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// Runtime value of a record field, borrowed from the record.
///
/// # Example
///
/// ```
/// use netracer_grid::{Number, Value};
///
/// struct Hop {
///     host: String,
///     port: u16,
/// }
///
/// fn field<'a>(hop: &'a Hop, path: &str) -> Value<'a> {
///     match path {
///         "host" => Value::String(&hop.host),
///         "port" => Value::Number(Number::from(hop.port)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    String(&'a str),
    Number(Number),
    /// Milliseconds since the Unix epoch.
    Timestamp(Timestamp),
    Bool(bool),
    /// Missing, null, or a nested object or array.
    None,
}

impl<'a> Value<'a> {
    /// Returns the display text of this value.
    ///
    /// Strings are borrowed as-is; numbers, timestamps and booleans are
    /// formatted. A missing value has no text.
    pub fn text(&self) -> Option<Cow<'a, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::Number(n) => Some(Cow::Owned(n.to_string())),
            Value::Timestamp(t) => Some(Cow::Owned(t.0.to_string())),
            Value::Bool(b) => Some(Cow::Owned(b.to_string())),
            Value::None => None,
        }
    }

    /// Returns every numeric token held by this value.
    ///
    /// A string is split on commas; each token is trimmed and parsed, and
    /// tokens that are not numbers are skipped. A number is a single token.
    pub fn numeric_tokens(&self) -> Vec<f64> {
        match self {
            Value::String(s) => s
                .split(',')
                .filter_map(|token| token.trim().parse::<f64>().ok())
                .filter(|n| !n.is_nan())
                .collect(),
            Value::Number(n) => {
                let n = n.to_f64();
                if n.is_nan() {
                    Vec::new()
                } else {
                    vec![n]
                }
            }
            _ => Vec::new(),
        }
    }

    /// Interprets this value as seconds since the Unix epoch.
    ///
    /// Numbers are taken as seconds, timestamps are converted from
    /// milliseconds and strings must parse as a number.
    pub fn epoch_seconds(&self) -> Option<f64> {
        let secs = match self {
            Value::Number(n) => Some(n.to_f64()),
            Value::Timestamp(t) => Some(t.secs_f64()),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        secs.filter(|secs| !secs.is_nan())
    }
}

/// A number read from a record.
///
/// Integers keep their own variant so large ports and epoch values compare
/// exactly; mixed pairs fall back to `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    /// Widens to `f64`.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Orders two numbers; `None` only when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::I64(a), Number::U64(b)) => Some(i128::from(a).cmp(&i128::from(b))),
            (Number::U64(a), Number::I64(b)) => Some(i128::from(a).cmp(&i128::from(b))),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => fmt::Display::fmt(n, f),
            Number::U64(n) => fmt::Display::fmt(n, f),
            Number::F64(n) => fmt::Display::fmt(n, f),
        }
    }
}

macro_rules! number_from {
    ($variant:ident: $wide:ty => $($t:ty),+) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::$variant(n as $wide)
                }
            }
        )+
    };
}

number_from!(I64: i64 => i32, i64);
number_from!(U64: u64 => u16, u32, u64, usize);
number_from!(F64: f64 => f32, f64);

/// Instant as milliseconds since the Unix epoch.
///
/// ```
/// use netracer_grid::Timestamp;
///
/// assert_eq!(Timestamp::from_secs(2), Timestamp(2000));
/// assert_eq!(Timestamp(1500).secs_f64(), 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Builds a timestamp from whole seconds.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    /// Fractional seconds since the epoch.
    pub fn secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_text() {
        assert_eq!(Value::String("tcp").text().as_deref(), Some("tcp"));
        assert_eq!(Value::Number(Number::U64(443)).text().as_deref(), Some("443"));
        assert_eq!(Value::Bool(false).text().as_deref(), Some("false"));
        assert_eq!(Value::None.text(), None);
    }

    #[test]
    fn numeric_tokens_skip_garbage() {
        let value = Value::String("80, 443 ,http, 8080");
        assert_eq!(value.numeric_tokens(), vec![80.0, 443.0, 8080.0]);
        assert_eq!(Value::Number(Number::U64(22)).numeric_tokens(), vec![22.0]);
        assert!(Value::String("").numeric_tokens().is_empty());
        assert!(Value::None.numeric_tokens().is_empty());
    }

    #[test]
    fn epoch_seconds_sources() {
        assert_eq!(
            Value::Number(Number::U64(1_700_000_000)).epoch_seconds(),
            Some(1_700_000_000.0)
        );
        assert_eq!(
            Value::Timestamp(Timestamp::from_secs(10)).epoch_seconds(),
            Some(10.0)
        );
        assert_eq!(Value::String(" 42 ").epoch_seconds(), Some(42.0));
        assert_eq!(Value::String("yesterday").epoch_seconds(), None);
        assert_eq!(Value::Bool(true).epoch_seconds(), None);
    }

    #[test]
    fn number_comparisons_mixed_types() {
        assert_eq!(
            Number::I64(5).compare(Number::U64(10)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Number::I64(5).compare(Number::F64(5.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            Number::I64(-1).compare(Number::U64(u64::MAX)),
            Some(Ordering::Less)
        );
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn number_display() {
        assert_eq!(Number::I64(-3).to_string(), "-3");
        assert_eq!(Number::U64(65535).to_string(), "65535");
        assert_eq!(Number::F64(1.5).to_string(), "1.5");
    }
}
