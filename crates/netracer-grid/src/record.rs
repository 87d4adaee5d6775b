//! Record access.
//!
//! A [`Record`] is one row of table input. Columns never see the concrete
//! row type; they ask the record for a field by dotted path and get back a
//! borrowed [`Value`].

use crate::value::{Number, Value};

/// Trait for row types the table engine can display, filter and sort.
///
/// Paths are dotted, so nested structs are addressed the way they are
/// serialized (`"addr.src"`). Unknown paths return [`Value::None`].
///
/// # Example
///
/// ```
/// use netracer_grid::{Number, Record, Value};
///
/// struct Flow {
///     proto: String,
///     port: u16,
/// }
///
/// impl Record for Flow {
///     fn field(&self, path: &str) -> Value<'_> {
///         match path {
///             "proto" => Value::String(&self.proto),
///             "port" => Value::Number(Number::from(self.port)),
///             _ => Value::None,
///         }
///     }
/// }
///
/// let flow = Flow { proto: "UDP".into(), port: 53 };
/// assert_eq!(flow.field("proto"), Value::String("UDP"));
/// ```
pub trait Record {
    /// Returns the value at `path`, or [`Value::None`] when absent.
    fn field(&self, path: &str) -> Value<'_>;
}

/// JSON rows are addressed by walking object keys along the dotted path.
impl Record for serde_json::Value {
    fn field(&self, path: &str) -> Value<'_> {
        let mut current = self;
        for key in path.split('.') {
            match current.get(key) {
                Some(next) => current = next,
                None => return Value::None,
            }
        }
        json_value(current)
    }
}

fn json_value(value: &serde_json::Value) -> Value<'_> {
    match value {
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Value::Number(Number::U64(u))
            } else if let Some(i) = n.as_i64() {
                Value::Number(Number::I64(i))
            } else {
                n.as_f64()
                    .map(|f| Value::Number(Number::F64(f)))
                    .unwrap_or(Value::None)
            }
        }
        _ => Value::None,
    }
}
