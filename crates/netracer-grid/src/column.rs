//! Declarative column definitions.
//!
//! A [`Column`] is built once when the table is constructed and never
//! mutated afterwards. It knows where its value lives in a record, how to
//! render it, how it may be filtered and whether it can be sorted.
//!
//! ```rust
//! use netracer_grid::{CellDisplay, Column, FilterVariant};
//!
//! let sources = Column::new("src")
//!     .path("addr.src")
//!     .header("Sources")
//!     .filter(FilterVariant::Text)
//!     .display(CellDisplay::List)
//!     .expandable(true);
//!
//! assert_eq!(sources.id(), "src");
//! assert!(sources.can_filter());
//! ```

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::filter::{FilterValue, FilterVariant, Predicate};
use crate::record::Record;
use crate::value::Value;

/// Date format used by datetime cells when none is configured.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How a column turns its value into cell content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellDisplay {
    /// The value's text.
    #[default]
    Plain,
    /// A space-delimited multi-value string, one item per token.
    List,
    /// Epoch seconds formatted as a UTC date.
    DateTime,
}

/// Rendered content of one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellContent {
    /// Nothing to show (missing value).
    Empty,
    /// A single line of text.
    Text(String),
    /// Separate list items.
    List(Vec<String>),
}

impl CellContent {
    /// Joins the content into a single string, list items separated by `sep`.
    pub fn join(&self, sep: &str) -> String {
        match self {
            CellContent::Empty => String::new(),
            CellContent::Text(s) => s.clone(),
            CellContent::List(items) => items.join(sep),
        }
    }

    /// Returns `true` if there is nothing to show.
    pub fn is_empty(&self) -> bool {
        matches!(self, CellContent::Empty)
    }
}

/// Immutable definition of one table column.
#[derive(Clone, Debug)]
pub struct Column {
    id: String,
    path: String,
    header: String,
    filter: FilterVariant,
    options: Vec<String>,
    sortable: bool,
    expandable: bool,
    case_insensitive: bool,
    display: CellDisplay,
    date_format: Option<String>,
    predicate: Option<Predicate>,
}

impl Column {
    /// Creates a sortable text column whose path and header equal its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Column {
            path: id.clone(),
            header: id.clone(),
            id,
            filter: FilterVariant::Text,
            options: Vec::new(),
            sortable: true,
            expandable: false,
            case_insensitive: false,
            display: CellDisplay::Plain,
            date_format: None,
            predicate: None,
        }
    }

    /// Sets the dotted record path the column reads.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the header label.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Sets the filter variant.
    pub fn filter(mut self, variant: FilterVariant) -> Self {
        self.filter = variant;
        self
    }

    /// Sets the options offered by a select filter.
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets whether the column can be sorted.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets whether cells are wrapped in an expandable container.
    pub fn expandable(mut self, expandable: bool) -> Self {
        self.expandable = expandable;
        self
    }

    /// Makes text filtering ignore case.
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Sets how values are rendered.
    pub fn display(mut self, display: CellDisplay) -> Self {
        self.display = display;
        self
    }

    /// Sets the chrono format string used by datetime cells.
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    /// Replaces the variant's predicate with a custom one.
    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the column id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the dotted record path.
    pub fn field_path(&self) -> &str {
        &self.path
    }

    /// Returns the header label.
    pub fn header_label(&self) -> &str {
        &self.header
    }

    /// Returns the filter variant.
    pub fn filter_variant(&self) -> FilterVariant {
        self.filter
    }

    /// Returns the select options.
    pub fn select_options(&self) -> &[String] {
        &self.options
    }

    /// Returns `true` if the column can be sorted.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Returns `true` if cells should be expandable.
    pub fn is_expandable(&self) -> bool {
        self.expandable
    }

    /// Returns the display kind.
    pub fn cell_display(&self) -> CellDisplay {
        self.display
    }

    /// Returns `true` if the column has a filter control.
    pub fn can_filter(&self) -> bool {
        self.resolved_predicate().is_some()
    }

    /// Returns the predicate used for filtering: the override if set,
    /// otherwise the variant's default.
    pub fn resolved_predicate(&self) -> Option<Predicate> {
        self.predicate
            .or_else(|| self.filter.predicate(self.case_insensitive))
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Reads this column's value from a record.
    pub fn value<'a, R: Record>(&self, record: &'a R) -> Value<'a> {
        record.field(&self.path)
    }

    /// Tests a record against this column's filter.
    pub fn matches<R: Record>(&self, record: &R, filter: Option<&FilterValue>) -> bool {
        match self.resolved_predicate() {
            Some(predicate) => predicate(&self.value(record), filter),
            None => true,
        }
    }

    /// Renders a value for display.
    ///
    /// Missing values render as [`CellContent::Empty`].
    pub fn render(&self, value: &Value<'_>) -> CellContent {
        let Some(text) = value.text() else {
            return CellContent::Empty;
        };
        match self.display {
            CellDisplay::Plain => CellContent::Text(text.into_owned()),
            CellDisplay::List => {
                let items: Vec<String> = text.split_whitespace().map(str::to_string).collect();
                if items.is_empty() {
                    CellContent::Empty
                } else {
                    CellContent::List(items)
                }
            }
            CellDisplay::DateTime => {
                let format = self.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
                match value
                    .epoch_seconds()
                    .and_then(|secs| DateTime::from_timestamp(secs.trunc() as i64, 0))
                {
                    Some(at) => CellContent::Text(at.format(format).to_string()),
                    None => CellContent::Text(text.into_owned()),
                }
            }
        }
    }

    /// Reads and renders this column for a record.
    pub fn render_record<R: Record>(&self, record: &R) -> CellContent {
        self.render(&self.value(record))
    }
}
