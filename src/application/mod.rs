// Application layer - Pure aggregation, chart building and handler wiring
pub mod aggregate;
pub mod chart_builders;
pub mod format;
pub mod registry;
