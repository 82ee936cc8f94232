// Aggregation functions over filtered sales rows
use crate::domain::sales::SalesRecord;
use std::collections::HashMap;

/// Numeric column selector. The schema is fixed, so columns are a closed
/// enum rather than strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Price,
    Quantity,
    TotalSales,
}

impl Measure {
    fn value(self, record: &SalesRecord) -> f64 {
        match self {
            Measure::Price => record.price,
            Measure::Quantity => record.quantity as f64,
            Measure::TotalSales => record.total_sales,
        }
    }
}

/// Grouping column selector. Date keys are formatted as ISO strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupColumn {
    Date,
    Product,
    Region,
}

impl GroupColumn {
    fn key(self, record: &SalesRecord) -> String {
        match self {
            GroupColumn::Date => record.date.to_string(),
            GroupColumn::Product => record.product.clone(),
            GroupColumn::Region => record.region.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agg {
    Sum,
    Mean,
}

/// One group's key plus its aggregate values, in the order the aggregates
/// were requested.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedRow {
    pub key: String,
    pub values: Vec<f64>,
}

/// Sum of a column. Zero on empty input.
pub fn total(rows: &[SalesRecord], measure: Measure) -> f64 {
    // Fold from +0.0 explicitly: the stdlib float `Sum` identity is -0.0,
    // which would format an empty total as "-0.00".
    rows.iter().map(|r| measure.value(r)).fold(0.0, |acc, v| acc + v)
}

/// Arithmetic mean of a column. Zero on empty input: the mean of zero rows
/// is undefined, and NaN must never reach a chart or KPI.
pub fn mean(rows: &[SalesRecord], measure: Measure) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    total(rows, measure) / rows.len() as f64
}

/// Per-group sum of a column, one entry per distinct key.
///
/// Groups appear in first-appearance order. The table is date-sorted, so
/// grouping by date yields ascending dates without a further sort.
pub fn group_sum(rows: &[SalesRecord], group: GroupColumn, measure: Measure) -> Vec<(String, f64)> {
    group_agg(rows, group, &[(measure, Agg::Sum)])
        .into_iter()
        .map(|g| (g.key, g.values[0]))
        .collect()
}

/// Generalized grouping: several simultaneous aggregates per group in one
/// pass. Group order is first appearance, value order matches `aggs`.
pub fn group_agg(
    rows: &[SalesRecord],
    group: GroupColumn,
    aggs: &[(Measure, Agg)],
) -> Vec<GroupedRow> {
    // (sums per agg, row count) accumulated per group, keyed into `order`.
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<(String, Vec<f64>, usize)> = Vec::new();

    for record in rows {
        let key = group.key(record);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            order.push((key, vec![0.0; aggs.len()], 0));
            order.len() - 1
        });
        let (_, sums, count) = &mut order[slot];
        for (i, (measure, _)) in aggs.iter().enumerate() {
            sums[i] += measure.value(record);
        }
        *count += 1;
    }

    order
        .into_iter()
        .map(|(key, sums, count)| {
            let values = aggs
                .iter()
                .zip(sums)
                .map(|((_, agg), sum)| match agg {
                    Agg::Sum => sum,
                    Agg::Mean => sum / count as f64,
                })
                .collect();
            GroupedRow { key, values }
        })
        .collect()
}
