// Infrastructure layer - File ingestion and configuration
pub mod config;
pub mod loader;
