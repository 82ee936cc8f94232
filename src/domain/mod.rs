// Domain layer - Core sales, filter and chart types
pub mod chart;
pub mod filter;
pub mod sales;
