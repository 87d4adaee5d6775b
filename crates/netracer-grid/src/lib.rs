//! Grid - tabular data-view engine for the netracer connection table.
//!
//! The crate turns a fetched record set into the rows a table shows:
//!
//! - Declarative, immutable [`Column`] definitions with dotted record paths
//! - Per-column filter predicates: text, numeric range, select, datetime
//! - Single-column sorting that cycles ascending, descending, unsorted
//! - Pagination that is applied last and clamped, never rejected
//! - Faceted min/max bounds for range filter controls
//!
//! # Quick Start
//!
//! ```rust
//! use netracer_grid::{connection_columns, parse_connections, FilterValue, Table};
//!
//! let body = r#"[
//!   {"addr": {"src": "10.0.0.1", "dst": "10.0.0.9", "protocol": "TCP", "port": "22, 80"}, "time": 1700000000},
//!   {"addr": {"src": "10.0.0.2", "dst": "8.8.8.8", "protocol": "UDP", "port": "53"}, "time": 1700000100}
//! ]"#;
//!
//! let mut table = Table::new(connection_columns(), parse_connections(body)?);
//!
//! table.set_filter_value("addr_protocol", Some(FilterValue::select("TCP")));
//! table.toggle_sort("time");
//!
//! let rows = table.derived_rows();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].addr.src, "10.0.0.1");
//! # Ok::<(), netracer_grid::GridError>(())
//! ```
//!
//! # Filter Semantics
//!
//! Active column filters combine with AND. A column without a filter value
//! does not constrain rows; a row without a value for a filtered column is
//! excluded. See [`filter`] for each variant.
//!
//! | Variant | Filter value | Default predicate |
//! |---------|--------------|-------------------|
//! | `text` | [`FilterValue::Text`] | [`filter::text_contains`] |
//! | `range` | [`FilterValue::Range`] | [`filter::range_any_token`] |
//! | `select` | [`FilterValue::Select`] | [`filter::select_equals`] |
//! | `datetime` | [`FilterValue::DateTime`] | [`filter::after_datetime`] |

mod column;
mod config;
mod connection;
mod error;
pub mod export;
pub mod filter;
mod record;
mod sort;
mod table;
mod value;

// Re-export public API
pub use column::{CellContent, CellDisplay, Column, DEFAULT_DATE_FORMAT};
pub use config::{ColumnConfig, TableConfig, DEFAULT_PAGE_SIZE};
pub use connection::{
    connection_columns, parse_connections, Address, Connection, LAST_SEEN_FORMAT, PROTOCOLS,
};
pub use error::{GridError, Result};
pub use filter::{FilterValue, FilterVariant, Predicate};
pub use record::Record;
pub use sort::{compare_values, natural_cmp, Dir, SortKey, SortState};
pub use table::{DerivedView, Pagination, Table};
pub use value::{Number, Timestamp, Value};
