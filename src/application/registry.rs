// Handler registry - explicit wiring from output ids to pure handlers
//
// Replaces framework-side callback registration: each dashboard output is a
// pure function of the filtered rows plus the shared style, registered under
// the output id together with the control ids that feed it. The registry is
// fully exercisable without any UI runtime.
use crate::application::aggregate::{Measure, mean, total};
use crate::application::chart_builders;
use crate::application::format;
use crate::domain::chart::{ChartDescription, ChartStyle};
use crate::domain::filter::{FilterSpec, RegionFilterMode, filter};
use crate::domain::sales::{SalesRecord, SalesTable};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// The filter controls every dashboard output declares as its inputs.
pub const FILTER_CONTROLS: [&str; 3] = ["product-dropdown", "region-dropdown", "date-picker-range"];

/// What a handler hands back to the rendering boundary: exactly one of a
/// chart description, a finished display string, or raw rows for a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OutputValue {
    Chart(ChartDescription),
    Text(String),
    Rows(Vec<SalesRecord>),
}

type HandlerFn = Box<dyn Fn(&[SalesRecord], &ChartStyle) -> OutputValue + Send + Sync>;

struct Handler {
    inputs: Vec<&'static str>,
    run: HandlerFn,
}

pub struct HandlerRegistry {
    table: Arc<SalesTable>,
    mode: RegionFilterMode,
    style: ChartStyle,
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    pub fn new(table: Arc<SalesTable>, mode: RegionFilterMode, style: ChartStyle) -> Self {
        Self {
            table,
            mode,
            style,
            handlers: HashMap::new(),
        }
    }

    pub fn register(
        &mut self,
        output_id: &str,
        inputs: &[&'static str],
        run: impl Fn(&[SalesRecord], &ChartStyle) -> OutputValue + Send + Sync + 'static,
    ) {
        self.handlers.insert(
            output_id.to_string(),
            Handler {
                inputs: inputs.to_vec(),
                run: Box::new(run),
            },
        );
    }

    pub fn table(&self) -> &SalesTable {
        &self.table
    }

    /// Registered output ids, ascending.
    pub fn output_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// The control ids a given output declared as inputs.
    pub fn inputs_of(&self, output_id: &str) -> Option<&[&'static str]> {
        self.handlers.get(output_id).map(|h| h.inputs.as_slice())
    }

    /// Compute one output for the given filter values. Returns `None` for an
    /// unknown output id. An invalid spec (inverted date range, unknown
    /// product or region) is logged and treated as an empty selection, so
    /// chart handlers emit the placeholder and KPI handlers emit zeroes;
    /// one bad interaction never takes the process down.
    pub fn invoke(&self, output_id: &str, spec: &FilterSpec) -> Option<OutputValue> {
        let handler = self.handlers.get(output_id)?;
        let filtered = match spec.validate(&self.table, self.mode) {
            Ok(()) => filter(&self.table, spec, self.mode),
            Err(e) => {
                tracing::warn!("rejecting filter spec for output {}: {}", output_id, e);
                SalesTable::from_ordered(Vec::new())
            }
        };
        Some((handler.run)(filtered.records(), &self.style))
    }

    /// Compute every registered output for one filter state. The shared
    /// table is read-only, so handler order is irrelevant; ids are returned
    /// sorted for stable responses.
    pub fn invoke_all(&self, spec: &FilterSpec) -> Vec<(String, OutputValue)> {
        self.output_ids()
            .into_iter()
            .filter_map(|id| self.invoke(id, spec).map(|value| (id.to_string(), value)))
            .collect()
    }
}

/// Wire the standard product-performance dashboard: three KPI strings, four
/// charts and the detail table, all fed by the same filter controls.
pub fn sales_dashboard_registry(
    table: Arc<SalesTable>,
    mode: RegionFilterMode,
    style: ChartStyle,
) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new(table, mode, style);

    registry.register("total-sales-value", &FILTER_CONTROLS, |rows, _| {
        OutputValue::Text(format::group_thousands(total(rows, Measure::TotalSales), 2))
    });
    registry.register("total-quantity-value", &FILTER_CONTROLS, |rows, _| {
        OutputValue::Text(format::group_thousands(total(rows, Measure::Quantity), 0))
    });
    registry.register("average-price-value", &FILTER_CONTROLS, |rows, _| {
        OutputValue::Text(format::currency(mean(rows, Measure::Price)))
    });
    registry.register("sales-trend-graph", &FILTER_CONTROLS, |rows, style| {
        OutputValue::Chart(chart_builders::sales_trend(rows, style))
    });
    registry.register("sales-by-product-bar", &FILTER_CONTROLS, |rows, style| {
        OutputValue::Chart(chart_builders::sales_by_product(rows, style))
    });
    registry.register("sales-by-region-pie", &FILTER_CONTROLS, |rows, style| {
        OutputValue::Chart(chart_builders::sales_by_region(rows, style))
    });
    registry.register("product-performance-scatter", &FILTER_CONTROLS, |rows, style| {
        OutputValue::Chart(chart_builders::product_performance(rows, style))
    });
    registry.register("sales-data-table", &FILTER_CONTROLS, |rows, _| {
        OutputValue::Rows(rows.to_vec())
    });

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: &str, product: &str, region: &str, price: f64, quantity: u32) -> SalesRecord {
        SalesRecord::new(
            date.parse::<NaiveDate>().unwrap(),
            product.to_string(),
            region.to_string(),
            price,
            quantity,
        )
    }

    fn registry(mode: RegionFilterMode) -> HandlerRegistry {
        let table = SalesTable::from_records(vec![
            record("2024-01-01", "A", "north", 2.0, 5),
            record("2024-01-02", "B", "south", 3.0, 2),
            record("2024-01-03", "A", "north", 1.0, 10),
        ]);
        sales_dashboard_registry(Arc::new(table), mode, ChartStyle::default())
    }

    #[test]
    fn test_registry_wires_all_dashboard_outputs() {
        let registry = registry(RegionFilterMode::Strict);
        assert_eq!(registry.output_ids().len(), 8);
        assert_eq!(
            registry.inputs_of("sales-trend-graph").unwrap(),
            &FILTER_CONTROLS
        );
        assert!(registry.inputs_of("no-such-output").is_none());
    }

    #[test]
    fn test_kpis_over_filtered_selection() {
        let registry = registry(RegionFilterMode::Strict);
        let spec = FilterSpec {
            products: ["A".to_string()].into(),
            regions: ["north".to_string()].into(),
            date_from: "2024-01-01".parse().unwrap(),
            date_to: "2024-01-03".parse().unwrap(),
        };
        assert_eq!(
            registry.invoke("total-sales-value", &spec),
            Some(OutputValue::Text("20.00".to_string()))
        );
        assert_eq!(
            registry.invoke("total-quantity-value", &spec),
            Some(OutputValue::Text("15".to_string()))
        );
        assert_eq!(
            registry.invoke("average-price-value", &spec),
            Some(OutputValue::Text("$1.50".to_string()))
        );
    }

    #[test]
    fn test_unknown_output_id_is_none() {
        let registry = registry(RegionFilterMode::Strict);
        let spec = FilterSpec::select_all(registry.table());
        assert_eq!(registry.invoke("no-such-output", &spec), None);
    }

    #[test]
    fn test_invalid_spec_degrades_to_placeholder_output() {
        let registry = registry(RegionFilterMode::Strict);
        let spec = FilterSpec {
            products: ["A".to_string()].into(),
            regions: ["north".to_string()].into(),
            // Inverted range: invalid, must not crash the handler.
            date_from: "2024-01-03".parse().unwrap(),
            date_to: "2024-01-01".parse().unwrap(),
        };
        match registry.invoke("sales-trend-graph", &spec) {
            Some(OutputValue::Chart(chart)) => assert!(chart.is_placeholder()),
            other => panic!("expected placeholder chart, got {other:?}"),
        }
        assert_eq!(
            registry.invoke("total-sales-value", &spec),
            Some(OutputValue::Text("0.00".to_string()))
        );
    }

    #[test]
    fn test_all_sentinel_region_reaches_every_row() {
        let registry = registry(RegionFilterMode::AllSentinel);
        let mut spec = FilterSpec::select_all(registry.table());
        spec.regions = ["all".to_string()].into();
        match registry.invoke("sales-data-table", &spec) {
            Some(OutputValue::Rows(rows)) => assert_eq!(rows.len(), 3),
            other => panic!("expected rows, got {other:?}"),
        }
    }

    #[test]
    fn test_invoke_all_returns_every_output_sorted() {
        let registry = registry(RegionFilterMode::Strict);
        let spec = FilterSpec::select_all(registry.table());
        let outputs = registry.invoke_all(&spec);
        assert_eq!(outputs.len(), 8);
        let ids: Vec<&str> = outputs.iter().map(|(id, _)| id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }
}
