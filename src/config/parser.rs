use super::ServerConfig;
use crate::errors::Error;
use std::fs;

use tracing::info;

/// Loads and parses the server configuration from a YAML file
///
/// # Arguments
///
/// * `file_path` - Path to the YAML configuration file
///
/// # Errors
///
/// Returns an error if:
/// * The file cannot be read
/// * The YAML content cannot be parsed into a ServerConfig
/// * `page_size` is zero
pub fn load_server_config(file_path: &str) -> Result<ServerConfig, Error> {
    let yaml_str = fs::read_to_string(file_path)?;
    let config = parse_server_config(&yaml_str)?;
    info!("Loaded server configuration from {}", file_path);
    Ok(config)
}

fn parse_server_config(yaml_str: &str) -> Result<ServerConfig, Error> {
    let config: ServerConfig = serde_yaml::from_str(yaml_str)?;
    if config.page_size == 0 {
        return Err(Error::InvalidConfig("page_size must be at least 1".to_string()));
    }
    Ok(config)
}
