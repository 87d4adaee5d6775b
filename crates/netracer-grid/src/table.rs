//! Table state engine.
//!
//! [`Table`] owns the record set together with the filter, sort and
//! pagination state, and derives the visible rows from them with a pure
//! three-stage pipeline:
//!
//! ```text
//! records ──filter (AND over active columns)──▶ filtered
//!         ──stable sort by the active key─────▶ sorted
//!         ──slice [index*size, (index+1)*size)▶ page
//! ```
//!
//! Filtering and sorting always see the whole record set; pagination is
//! applied last. Nothing is cached, so the view is recomputed from scratch
//! on every read and two reads without a mutation in between are identical.
//!
//! # Example
//!
//! ```
//! use netracer_grid::{Column, FilterValue, FilterVariant, Pagination, Table};
//! use serde_json::json;
//!
//! let rows = vec![
//!     json!({ "port": "22" }),
//!     json!({ "port": "80, 443" }),
//!     json!({ "port": "8080" }),
//! ];
//! let mut table = Table::new(vec![Column::new("port").filter(FilterVariant::Range)], rows);
//!
//! table.set_filter_value("port", Some(FilterValue::range(Some(1.0), Some(1023.0))));
//! assert_eq!(table.derived_rows().len(), 2);
//!
//! table.set_pagination(Pagination { page_index: 7, page_size: 1 });
//! assert_eq!(table.pagination().page_index, 1);
//! ```

use std::collections::HashMap;

use crate::column::Column;
use crate::config::{TableConfig, DEFAULT_PAGE_SIZE};
use crate::error::Result;
use crate::filter::{FilterValue, FilterVariant};
use crate::record::Record;
use crate::sort::{Dir, SortState};

/// Page position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page, at least one.
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// The rows of the current page plus the totals a pager needs.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView<'a, R> {
    /// Records on the current page, in display order.
    pub rows: Vec<&'a R>,
    /// Number of records that pass the filters.
    pub filtered_count: usize,
    /// Number of pages over the filtered records (at least one).
    pub page_count: usize,
    /// Pagination the page was cut with.
    pub pagination: Pagination,
}

/// Filterable, sortable, paginated view over a record set.
#[derive(Debug, Clone)]
pub struct Table<R> {
    columns: Vec<Column>,
    records: Vec<R>,
    filters: HashMap<String, FilterValue>,
    sort: SortState,
    pagination: Pagination,
}

impl<R: Record> Table<R> {
    /// Creates a table over `records` with default pagination.
    pub fn new(columns: Vec<Column>, records: Vec<R>) -> Self {
        Table {
            columns,
            records,
            filters: HashMap::new(),
            sort: SortState::new(),
            pagination: Pagination::default(),
        }
    }

    /// Creates an empty table from a configuration.
    pub fn from_config(config: &TableConfig) -> Result<Self> {
        let mut table = Table::new(config.build_columns()?, Vec::new());
        table.pagination.page_size = config.page_size.max(1);
        Ok(table)
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Returns the column definitions.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by id.
    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.id() == column_id)
    }

    /// Returns the full, unfiltered record set.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Returns the current pagination.
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Returns the filter value of a column, if one is active.
    pub fn filter_value(&self, column_id: &str) -> Option<&FilterValue> {
        self.filters.get(column_id)
    }

    /// Returns the number of active filters.
    pub fn active_filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Returns the sort state.
    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Returns the direction `column_id` is sorted in, if any.
    pub fn sort_direction(&self, column_id: &str) -> Option<Dir> {
        self.sort.direction(column_id)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Replaces the whole record set, as when a fetch completes.
    pub fn set_records(&mut self, records: Vec<R>) {
        log::debug!("record set replaced: {} records", records.len());
        self.records = records;
        self.clamp_page_index();
    }

    /// Sets or clears the filter of a column and returns to the first page.
    ///
    /// `None` and empty values remove the filter. Unknown columns, columns
    /// without a predicate, values of the wrong shape and selections outside
    /// the column's options are ignored.
    pub fn set_filter_value(&mut self, column_id: &str, value: Option<FilterValue>) {
        let Some(column) = self.column(column_id) else {
            log::warn!("ignoring filter for unknown column '{}'", column_id);
            return;
        };
        if !column.can_filter() {
            log::warn!("ignoring filter for unfilterable column '{}'", column_id);
            return;
        }

        match value {
            Some(value) if !value.is_empty() => {
                let variant = column.filter_variant();
                if variant != FilterVariant::None && !variant.accepts(&value) {
                    log::warn!(
                        "ignoring {} filter for {} column '{}'",
                        value.kind(),
                        variant,
                        column_id
                    );
                    return;
                }
                if let FilterValue::Select(option) = &value {
                    let options = column.select_options();
                    if !options.is_empty() && !options.iter().any(|o| o == option) {
                        log::warn!(
                            "ignoring unknown option '{}' for column '{}'",
                            option,
                            column_id
                        );
                        return;
                    }
                }
                log::debug!("filter set on '{}': {:?}", column_id, value);
                self.filters.insert(column_id.to_string(), value);
            }
            _ => {
                log::debug!("filter cleared on '{}'", column_id);
                self.filters.remove(column_id);
            }
        }
        self.pagination.page_index = 0;
    }

    /// Removes every filter and returns to the first page.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.pagination.page_index = 0;
    }

    /// Advances the sort cycle of a column.
    ///
    /// Non-sortable and unknown columns are left alone.
    pub fn toggle_sort(&mut self, column_id: &str) {
        match self.column(column_id).map(Column::is_sortable) {
            Some(true) => {
                self.sort.toggle(column_id);
                log::debug!(
                    "sort on '{}' is now {}",
                    column_id,
                    self.sort
                        .direction(column_id)
                        .map(Dir::as_str)
                        .unwrap_or("none")
                );
            }
            Some(false) => log::warn!("ignoring sort for unsortable column '{}'", column_id),
            None => log::warn!("ignoring sort for unknown column '{}'", column_id),
        }
    }

    /// Replaces the pagination, then clamps it into range.
    pub fn set_pagination(&mut self, pagination: Pagination) {
        self.pagination = Pagination {
            page_index: pagination.page_index,
            page_size: pagination.page_size.max(1),
        };
        self.clamp_page_index();
    }

    /// Moves to the next page if there is one.
    pub fn next_page(&mut self) {
        if self.pagination.page_index + 1 < self.page_count() {
            self.pagination.page_index += 1;
        }
    }

    /// Moves to the previous page if there is one.
    pub fn previous_page(&mut self) {
        self.pagination.page_index = self.pagination.page_index.saturating_sub(1);
    }

    // ========================================================================
    // Derivation
    // ========================================================================

    /// Returns `true` if the record passes every active filter.
    pub fn matches(&self, record: &R) -> bool {
        self.filters.iter().all(|(column_id, value)| {
            self.column(column_id)
                .map(|column| column.matches(record, Some(value)))
                .unwrap_or(true)
        })
    }

    /// Returns the filtered and sorted records, without pagination.
    pub fn sorted_rows(&self) -> Vec<&R> {
        let mut rows: Vec<&R> = self.records.iter().filter(|r| self.matches(r)).collect();

        for key in self.sort.keys() {
            let Some(column) = self.column(&key.column_id) else {
                continue;
            };
            // slice::sort_by is stable, so equal keys keep record order.
            rows.sort_by(|a, b| key.compare(&column.value(*a), &column.value(*b)));
        }
        rows
    }

    /// Returns the number of records that pass the filters.
    pub fn filtered_row_count(&self) -> usize {
        self.records.iter().filter(|r| self.matches(r)).count()
    }

    /// Returns the number of pages; an empty result still has one page.
    pub fn page_count(&self) -> usize {
        page_count(self.filtered_row_count(), self.pagination.page_size)
    }

    /// Returns the rows of the current page.
    pub fn derived_rows(&self) -> Vec<&R> {
        self.derived_view().rows
    }

    /// Returns the current page together with its totals.
    pub fn derived_view(&self) -> DerivedView<'_, R> {
        let sorted = self.sorted_rows();
        let filtered_count = sorted.len();
        let Pagination {
            page_index,
            page_size,
        } = self.pagination;
        let rows = sorted
            .into_iter()
            .skip(page_index.saturating_mul(page_size))
            .take(page_size)
            .collect();
        DerivedView {
            rows,
            filtered_count,
            page_count: page_count(filtered_count, page_size),
            pagination: self.pagination,
        }
    }

    /// Returns the smallest and largest numeric values of a column over the
    /// unfiltered record set.
    ///
    /// Comma lists contribute every numeric token. `None` when the column is
    /// unknown or holds no numbers.
    pub fn faceted_min_max(&self, column_id: &str) -> Option<(f64, f64)> {
        let column = self.column(column_id)?;
        self.records
            .iter()
            .flat_map(|record| column.value(record).numeric_tokens())
            .fold(None, |acc, n| match acc {
                None => Some((n, n)),
                Some((lo, hi)) => Some((f64::min(lo, n), f64::max(hi, n))),
            })
    }

    fn clamp_page_index(&mut self) {
        let last = self.page_count() - 1;
        if self.pagination.page_index > last {
            log::debug!(
                "page index {} out of range, clamped to {}",
                self.pagination.page_index,
                last
            );
            self.pagination.page_index = last;
        }
    }
}

fn page_count(rows: usize, page_size: usize) -> usize {
    rows.div_ceil(page_size.max(1)).max(1)
}
