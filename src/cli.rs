use clap::Parser;

/// Command line interface for the trivia API server
#[derive(Parser)]
pub struct Cli {
    /// Path to an optional YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Port to listen on, overrides the configuration file
    #[arg(short, long)]
    pub port: Option<u16>,

    /// SQLite database path, overrides the configuration file and DATABASE_PATH
    #[arg(long)]
    pub database_path: Option<String>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "info"
    #[arg(long, default_value_t = String::from("info"))]
    pub logging_level: String,

    /// Also write logs to a daily rotating file under `logs/`
    #[arg(long)]
    pub log_to_file: bool,

    /// Insert the standard trivia categories when the category table is empty
    #[arg(long)]
    pub seed_categories: bool,
}
