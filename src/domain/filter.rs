// Filter engine - pure row selection over the sales table
use crate::domain::sales::{SalesRecord, SalesTable};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// Region value that bypasses the region predicate under
/// [`RegionFilterMode::AllSentinel`].
pub const ALL_REGIONS: &str = "all";

/// How the region predicate treats the `"all"` value.
///
/// The multi-select dashboard uses `Strict` (an empty selection shows
/// nothing, there is no magic value). The single-region radio dashboard
/// uses `AllSentinel`, where picking `"all"` disables the region predicate
/// entirely. Both behaviors are kept; which one applies is configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionFilterMode {
    #[default]
    Strict,
    AllSentinel,
}

/// The active selection state, rebuilt on every interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub products: BTreeSet<String>,
    pub regions: BTreeSet<String>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterSpecError {
    #[error("date_from {from} is after date_to {to}")]
    InvertedDateRange { from: NaiveDate, to: NaiveDate },
    #[error("unknown product '{0}'")]
    UnknownProduct(String),
    #[error("unknown region '{0}'")]
    UnknownRegion(String),
}

impl FilterSpec {
    /// A spec selecting the whole table: every product, every region, full
    /// date range. Matches the initial control values of the dashboards.
    pub fn select_all(table: &SalesTable) -> Self {
        let (date_from, date_to) = table
            .date_range()
            .unwrap_or_else(|| (NaiveDate::MIN, NaiveDate::MAX));
        Self {
            products: table.products(),
            regions: table.regions(),
            date_from,
            date_to,
        }
    }

    /// Reject specs that cannot describe a meaningful selection: an
    /// inverted date range, or a product/region the table has never seen.
    /// Under `AllSentinel` the literal `"all"` region is exempt.
    pub fn validate(&self, table: &SalesTable, mode: RegionFilterMode) -> Result<(), FilterSpecError> {
        if self.date_from > self.date_to {
            return Err(FilterSpecError::InvertedDateRange {
                from: self.date_from,
                to: self.date_to,
            });
        }
        let known_products = table.products();
        if let Some(p) = self.products.iter().find(|p| !known_products.contains(*p)) {
            return Err(FilterSpecError::UnknownProduct(p.clone()));
        }
        let known_regions = table.regions();
        if let Some(r) = self.regions.iter().find(|r| {
            !known_regions.contains(*r) && !(mode == RegionFilterMode::AllSentinel && *r == ALL_REGIONS)
        }) {
            return Err(FilterSpecError::UnknownRegion(r.clone()));
        }
        Ok(())
    }

    fn matches(&self, record: &SalesRecord, mode: RegionFilterMode) -> bool {
        if record.date < self.date_from || record.date > self.date_to {
            return false;
        }
        if !self.products.contains(&record.product) {
            return false;
        }
        let region_bypassed =
            mode == RegionFilterMode::AllSentinel && self.regions.contains(ALL_REGIONS);
        region_bypassed || self.regions.contains(&record.region)
    }
}

/// Return exactly the rows matching every predicate of `spec` (logical AND),
/// preserving table order. The input is never mutated. An empty product or
/// region selection selects nothing; an inverted date range selects nothing
/// (callers wanting a hard error use [`FilterSpec::validate`] first).
pub fn filter(table: &SalesTable, spec: &FilterSpec, mode: RegionFilterMode) -> SalesTable {
    let records = table
        .records()
        .iter()
        .filter(|r| spec.matches(r, mode))
        .cloned()
        .collect();
    SalesTable::from_ordered(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sales::SalesRecord;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn example_table() -> SalesTable {
        SalesTable::from_records(vec![
            SalesRecord::new(date("2024-01-01"), "A".into(), "north".into(), 2.0, 5),
            SalesRecord::new(date("2024-01-02"), "B".into(), "south".into(), 3.0, 2),
            SalesRecord::new(date("2024-01-03"), "A".into(), "north".into(), 1.0, 10),
        ])
    }

    fn spec(products: &[&str], regions: &[&str], from: &str, to: &str) -> FilterSpec {
        FilterSpec {
            products: products.iter().map(|s| s.to_string()).collect(),
            regions: regions.iter().map(|s| s.to_string()).collect(),
            date_from: date(from),
            date_to: date(to),
        }
    }

    #[test]
    fn test_example_selection() {
        let table = example_table();
        let s = spec(&["A"], &["north"], "2024-01-01", "2024-01-03");
        let filtered = filter(&table, &s, RegionFilterMode::Strict);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.records()[0].date, date("2024-01-01"));
        assert_eq!(filtered.records()[1].date, date("2024-01-03"));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let table = example_table();
        let s = spec(&["A", "B"], &["north"], "2024-01-01", "2024-01-03");
        let once = filter(&table, &s, RegionFilterMode::Strict);
        let twice = filter(&once, &s, RegionFilterMode::Strict);
        assert_eq!(once.records(), twice.records());
    }

    #[test]
    fn test_narrowing_never_grows_the_result() {
        let table = example_table();
        let wide = spec(&["A", "B"], &["north", "south"], "2024-01-01", "2024-01-03");
        let narrow = spec(&["A"], &["north"], "2024-01-02", "2024-01-03");
        let wide_count = filter(&table, &wide, RegionFilterMode::Strict).len();
        let narrow_count = filter(&table, &narrow, RegionFilterMode::Strict).len();
        assert!(narrow_count <= wide_count);
        assert_eq!(narrow_count, 1);
    }

    #[test]
    fn test_empty_selection_is_closed() {
        let table = example_table();
        let no_products = spec(&[], &["north", "south"], "2024-01-01", "2024-01-03");
        assert!(filter(&table, &no_products, RegionFilterMode::Strict).is_empty());

        let no_regions = spec(&["A", "B"], &[], "2024-01-01", "2024-01-03");
        assert!(filter(&table, &no_regions, RegionFilterMode::Strict).is_empty());
    }

    #[test]
    fn test_all_sentinel_bypasses_region_predicate() {
        let table = example_table();
        let s = spec(&["A", "B"], &["all"], "2024-01-01", "2024-01-03");
        // Strict mode: "all" is just an unknown region name.
        assert!(filter(&table, &s, RegionFilterMode::Strict).is_empty());
        // Sentinel mode: every region passes.
        assert_eq!(filter(&table, &s, RegionFilterMode::AllSentinel).len(), 3);
    }

    #[test]
    fn test_inverted_range_selects_nothing_and_fails_validation() {
        let table = example_table();
        let s = spec(&["A"], &["north"], "2024-01-03", "2024-01-01");
        assert!(filter(&table, &s, RegionFilterMode::Strict).is_empty());
        assert_eq!(
            s.validate(&table, RegionFilterMode::Strict),
            Err(FilterSpecError::InvertedDateRange {
                from: date("2024-01-03"),
                to: date("2024-01-01"),
            })
        );
    }

    #[test]
    fn test_unknown_values_fail_validation() {
        let table = example_table();
        let s = spec(&["C"], &["north"], "2024-01-01", "2024-01-03");
        assert_eq!(
            s.validate(&table, RegionFilterMode::Strict),
            Err(FilterSpecError::UnknownProduct("C".into()))
        );

        let s = spec(&["A"], &["all"], "2024-01-01", "2024-01-03");
        assert_eq!(
            s.validate(&table, RegionFilterMode::Strict),
            Err(FilterSpecError::UnknownRegion("all".into()))
        );
        assert_eq!(s.validate(&table, RegionFilterMode::AllSentinel), Ok(()));
    }

    #[test]
    fn test_select_all_covers_the_table() {
        let table = example_table();
        let s = FilterSpec::select_all(&table);
        assert_eq!(filter(&table, &s, RegionFilterMode::Strict).len(), 3);
    }
}
