mod parser;
use serde::{Deserialize, Serialize};

pub use parser::load_server_config;

/// Runtime configuration of the trivia API server
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Path of the SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// TCP port the HTTP server listens on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of questions per page on every paginated endpoint
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Cross-origin policy applied to every response
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Cross-origin resource sharing policy
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CorsConfig {
    /// Allowed origins, `"*"` allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
    #[serde(default = "default_allowed_headers")]
    pub allowed_headers: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            database_path: default_database_path(),
            port: default_port(),
            page_size: default_page_size(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        CorsConfig {
            allowed_origins: default_allowed_origins(),
            allowed_methods: default_allowed_methods(),
            allowed_headers: default_allowed_headers(),
        }
    }
}

fn default_database_path() -> String {
    "trivia.db".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_page_size() -> usize {
    10
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_allowed_methods() -> Vec<String> {
    ["GET", "PATCH", "POST", "DELETE", "OPTIONS"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

fn default_allowed_headers() -> Vec<String> {
    vec!["Content-Type".to_string(), "Authorization".to_string()]
}
