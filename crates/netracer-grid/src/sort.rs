//! Sort state and row comparison.
//!
//! The table keeps at most one active [`SortKey`]. Toggling a column walks
//! it through `unsorted → ascending → descending → unsorted`.

use std::cmp::Ordering;

use crate::value::Value;

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Asc,
    Desc,
}

impl Dir {
    /// Flips `ordering` for descending sorts.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sorted column and its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column_id: String,
    pub dir: Dir,
}

impl SortKey {
    /// Creates a sort key.
    pub fn new(column_id: impl Into<String>, dir: Dir) -> Self {
        SortKey {
            column_id: column_id.into(),
            dir,
        }
    }

    /// Compares two values according to this key's direction.
    ///
    /// Missing values always sort last, whatever the direction.
    pub fn compare(&self, a: &Value<'_>, b: &Value<'_>) -> Ordering {
        match (a, b) {
            (Value::None, Value::None) => Ordering::Equal,
            (Value::None, _) => Ordering::Greater,
            (_, Value::None) => Ordering::Less,
            _ => self.dir.apply(compare_values(a, b)),
        }
    }
}

/// Sort state holding at most one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    keys: Vec<SortKey>,
}

impl SortState {
    /// Creates an unsorted state.
    pub fn new() -> Self {
        SortState::default()
    }

    /// Advances `column_id` one step through its cycle.
    ///
    /// A column other than the sorted one starts at ascending and replaces
    /// the previous sort.
    pub fn toggle(&mut self, column_id: &str) {
        let next = match self.direction(column_id) {
            None => Some(Dir::Asc),
            Some(Dir::Asc) => Some(Dir::Desc),
            Some(Dir::Desc) => None,
        };
        self.keys.clear();
        if let Some(dir) = next {
            self.keys.push(SortKey::new(column_id, dir));
        }
    }

    /// Returns the direction `column_id` is sorted in, if it is sorted.
    pub fn direction(&self, column_id: &str) -> Option<Dir> {
        self.keys
            .iter()
            .find(|key| key.column_id == column_id)
            .map(|key| key.dir)
    }

    /// Returns the active sort keys (zero or one).
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Returns `true` if nothing is sorted.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Orders two row values.
///
/// This is a total order, so any column can be sorted. Values of the same
/// kind compare naturally; mixed kinds rank as
/// number < timestamp < string < bool < missing.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => natural_cmp(a, b),
        (Value::Number(a), Value::Number(b)) => a
            .compare(*b)
            .unwrap_or_else(|| a.to_f64().total_cmp(&b.to_f64())),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::Timestamp(_) => 1,
        Value::String(_) => 2,
        Value::Bool(_) => 3,
        Value::None => 4,
    }
}

/// Alphanumeric string order: runs of ASCII digits compare by numeric value,
/// so `"10.0.0.9" < "10.0.0.10"` and `"443" < "1000"`.
///
/// Digit runs sort before text runs. Strings that tie chunk for chunk (such
/// as `"07"` and `"7"`) fall back to byte order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);
    loop {
        let ordering = match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => compare_chunks(x, y),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

fn compare_chunks(x: &str, y: &str) -> Ordering {
    match (is_digits(x), is_digits(y)) {
        (true, true) => {
            // Compare by magnitude without parsing, so long runs cannot overflow.
            let x = x.trim_start_matches('0');
            let y = y.trim_start_matches('0');
            x.len().cmp(&y.len()).then_with(|| x.cmp(y))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.cmp(y),
    }
}

fn is_digits(chunk: &str) -> bool {
    chunk.starts_with(|c: char| c.is_ascii_digit())
}

/// Splits a string into alternating runs of ASCII digits and other text.
fn chunks(s: &str) -> impl Iterator<Item = &str> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let digit = rest.chars().next()?.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digit)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}
