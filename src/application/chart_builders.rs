// Chart builders - pure functions from filtered rows to chart descriptions
use crate::application::aggregate::{Agg, GroupColumn, Measure, group_agg, group_sum};
use crate::domain::chart::{ChartDescription, ChartKind, ChartStyle, Series};
use crate::domain::sales::SalesRecord;

/// Fixed color cycle for per-category series.
const PALETTE: [&str; 6] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3",
];

fn palette_color(index: usize) -> String {
    PALETTE[index % PALETTE.len()].to_string()
}

/// Line chart of summed total sales per date.
pub fn sales_trend(rows: &[SalesRecord], style: &ChartStyle) -> ChartDescription {
    let by_date = group_sum(rows, GroupColumn::Date, Measure::TotalSales);
    if by_date.is_empty() {
        return ChartDescription::placeholder(ChartKind::Line, style.clone());
    }

    let (labels, values): (Vec<String>, Vec<f64>) = by_date.into_iter().unzip();
    let mut chart =
        ChartDescription::new("Total Sales Trend Over Time", ChartKind::Line, style.clone());
    chart.x_label = Some("Date".to_string());
    chart.y_label = Some("Total Sales".to_string());
    chart.series = vec![Series::labeled("Total Sales", labels, values)];
    chart
}

/// Bar chart of summed total sales per product, largest first.
pub fn sales_by_product(rows: &[SalesRecord], style: &ChartStyle) -> ChartDescription {
    let mut by_product = group_sum(rows, GroupColumn::Product, Measure::TotalSales);
    if by_product.is_empty() {
        return ChartDescription::placeholder(ChartKind::Bar, style.clone());
    }
    by_product.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (labels, values): (Vec<String>, Vec<f64>) = by_product.into_iter().unzip();
    let mut chart =
        ChartDescription::new("Total Sales by Product", ChartKind::Bar, style.clone());
    chart.x_label = Some("Product".to_string());
    chart.y_label = Some("Total Sales".to_string());
    chart.series = vec![Series::labeled("Total Sales", labels, values)];
    chart
}

/// Donut chart of each region's share of total sales.
pub fn sales_by_region(rows: &[SalesRecord], style: &ChartStyle) -> ChartDescription {
    let by_region = group_sum(rows, GroupColumn::Region, Measure::TotalSales);
    if by_region.is_empty() {
        return ChartDescription::placeholder(ChartKind::Pie, style.clone());
    }

    let (labels, values): (Vec<String>, Vec<f64>) = by_region.into_iter().unzip();
    let mut chart =
        ChartDescription::new("Sales Distribution by Region", ChartKind::Pie, style.clone());
    chart.series = vec![Series::labeled("Total Sales", labels, values)];
    chart.hole = Some(0.3);
    chart
}

/// Scatter of average price (x) against total quantity (y) per product.
/// One colored series per product; point size carries the quantity.
pub fn product_performance(rows: &[SalesRecord], style: &ChartStyle) -> ChartDescription {
    let per_product = group_agg(
        rows,
        GroupColumn::Product,
        &[(Measure::Price, Agg::Mean), (Measure::Quantity, Agg::Sum)],
    );
    if per_product.is_empty() {
        return ChartDescription::placeholder(ChartKind::Scatter, style.clone());
    }

    let mut chart = ChartDescription::new(
        "Product Performance (Average Price vs. Total Quantity)",
        ChartKind::Scatter,
        style.clone(),
    );
    chart.x_label = Some("Average Price".to_string());
    chart.y_label = Some("Total Quantity".to_string());
    chart.series = per_product
        .into_iter()
        .enumerate()
        .map(|(i, group)| {
            let avg_price = group.values[0];
            let quantity = group.values[1];
            Series {
                name: group.key,
                labels: Vec::new(),
                x: vec![avg_price],
                y: vec![quantity],
                sizes: Some(vec![quantity]),
                color: Some(palette_color(i)),
            }
        })
        .collect();
    chart
}
