//! Property-based tests for the table engine using proptest.

use netracer_grid::filter::{after_datetime, range_any_token};
use netracer_grid::{Column, FilterValue, FilterVariant, Number, Pagination, Table, Value};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Test helpers
// ============================================================================

fn port_list(ports: &[u16]) -> String {
    ports
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn rows(items: &[(u16, String)]) -> Vec<serde_json::Value> {
    items
        .iter()
        .map(|(n, name)| json!({ "n": n, "name": name }))
        .collect()
}

fn table(items: &[(u16, String)]) -> Table<serde_json::Value> {
    Table::new(
        vec![
            Column::new("n").filter(FilterVariant::Range),
            Column::new("name"),
        ],
        rows(items),
    )
}

fn item_strategy() -> impl Strategy<Value = (u16, String)> {
    (any::<u16>(), "[a-d]{1,4}")
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// A port list passes a range exactly when one of its ports is inside it.
    #[test]
    fn range_matches_iff_any_token_in_bounds(
        ports in prop::collection::vec(any::<u16>(), 1..6),
        a in any::<u16>(),
        b in any::<u16>(),
    ) {
        let (lo, hi) = (f64::from(a.min(b)), f64::from(a.max(b)));
        let list = port_list(&ports);
        let expected = ports.iter().any(|p| (lo..=hi).contains(&f64::from(*p)));

        let filter = FilterValue::range(Some(lo), Some(hi));
        prop_assert_eq!(range_any_token(&Value::String(&list), Some(&filter)), expected);
    }

    /// A datetime filter keeps only strictly later rows.
    #[test]
    fn datetime_is_strictly_after(
        row_secs in 0u32..4_000_000_000,
        filter_secs in 0u32..4_000_000_000,
    ) {
        let filter = FilterValue::after_secs(i64::from(filter_secs));
        let row = Value::Number(Number::from(row_secs));
        prop_assert_eq!(after_datetime(&row, Some(&filter)), row_secs > filter_secs);
    }

    /// Filtering never adds records.
    #[test]
    fn filter_never_grows_collection(
        items in prop::collection::vec(item_strategy(), 0..60),
        needle in "[a-d]{0,2}",
        lo in any::<u16>(),
    ) {
        let mut t = table(&items);
        t.set_filter_value("name", Some(FilterValue::text(needle)));
        let by_name = t.filtered_row_count();
        prop_assert!(by_name <= items.len());

        t.set_filter_value("n", Some(FilterValue::range(Some(f64::from(lo)), None)));
        prop_assert!(t.filtered_row_count() <= by_name);
    }

    /// The current page is always in range and never larger than the page size.
    #[test]
    fn page_stays_in_bounds(
        items in prop::collection::vec(item_strategy(), 0..60),
        page_index in 0usize..50,
        page_size in 0usize..20,
        needle in "[a-d]{0,2}",
    ) {
        let mut t = table(&items);
        t.set_pagination(Pagination { page_index, page_size });
        t.set_filter_value("name", Some(FilterValue::text(needle)));

        let view = t.derived_view();
        prop_assert!(view.pagination.page_index < view.page_count);
        prop_assert!(view.pagination.page_size >= 1);
        prop_assert!(view.rows.len() <= view.pagination.page_size);
        prop_assert_eq!(view.filtered_count, t.filtered_row_count());
    }

    /// Every page together holds each filtered record exactly once.
    #[test]
    fn pages_partition_filtered_rows(
        items in prop::collection::vec(item_strategy(), 0..40),
        page_size in 1usize..8,
    ) {
        let mut t = table(&items);
        t.toggle_sort("n");
        t.set_pagination(Pagination { page_index: 0, page_size });

        let mut collected = Vec::new();
        for page_index in 0..t.page_count() {
            t.set_pagination(Pagination { page_index, page_size });
            collected.extend(t.derived_rows().into_iter().cloned());
        }
        let all: Vec<serde_json::Value> = t.sorted_rows().into_iter().cloned().collect();
        prop_assert_eq!(collected, all);
    }

    /// Sorting ascending yields non-decreasing values.
    #[test]
    fn ascending_sort_is_ordered(items in prop::collection::vec(item_strategy(), 0..60)) {
        let mut t = table(&items);
        t.set_pagination(Pagination { page_index: 0, page_size: 100 });
        t.toggle_sort("n");
        let ns: Vec<u64> = t
            .derived_rows()
            .iter()
            .map(|r| r["n"].as_u64().unwrap_or_default())
            .collect();
        prop_assert!(ns.windows(2).all(|w| w[0] <= w[1]));
    }

    /// Reading the view twice without a mutation gives the same rows.
    #[test]
    fn derived_rows_are_idempotent(
        items in prop::collection::vec(item_strategy(), 0..40),
        toggles in 0usize..3,
        needle in "[a-d]{0,2}",
    ) {
        let mut t = table(&items);
        for _ in 0..toggles {
            t.toggle_sort("name");
        }
        t.set_filter_value("name", Some(FilterValue::text(needle)));
        prop_assert_eq!(t.derived_rows(), t.derived_rows());
    }
}
