use crate::domain::chart::ChartStyle;
use crate::domain::filter::RegionFilterMode;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub data: DataSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Debug toggle: switches the default log filter to `debug`.
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSettings {
    /// Directory of sales CSV files, or a single file.
    pub path: PathBuf,
    #[serde(default)]
    pub region_mode: RegionFilterMode,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Chart styling overrides. The file is optional; every field has a default
/// matching the standard dashboard look.
pub fn load_style_config() -> anyhow::Result<ChartStyle> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/style").required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}
