// Sales data domain models
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub product: String,
    pub region: String,
    pub price: f64,
    pub quantity: u32,
    pub total_sales: f64,
}

impl SalesRecord {
    pub fn new(date: NaiveDate, product: String, region: String, price: f64, quantity: u32) -> Self {
        Self {
            date,
            product,
            region,
            price,
            quantity,
            total_sales: price * quantity as f64,
        }
    }
}

/// The fully loaded dataset, sorted ascending by date. Built once at startup
/// and shared read-only across all handlers; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    /// Build a table from loaded records, sorting by date (stable, so rows
    /// sharing a date keep their input order).
    pub fn from_records(mut records: Vec<SalesRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    /// Wrap records that are already in table order (filter results).
    pub(crate) fn from_ordered(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct product names, ascending.
    pub fn products(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.product.clone()).collect()
    }

    /// Distinct region names, ascending.
    pub fn regions(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.region.clone()).collect()
    }

    /// (min, max) date over the table, None when empty.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.date;
        let last = self.records.last()?.date;
        Some((first, last))
    }
}
