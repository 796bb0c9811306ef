// Public modules
pub mod types;
pub mod error;
pub mod config;
pub mod cli;
pub mod parsing;
pub mod classify;
pub mod client;
pub mod health;
pub mod stats;
pub mod collector;
pub mod report;
pub mod probe;

// Re-export commonly used items
pub use types::*;
pub use error::{ProbeError, ResultExt};
pub use config::{load_settings, load_settings_with_env, EnvironmentProvider, SystemEnvironment, MockEnvironment};
pub use cli::Cli;
pub use parsing::{strip_ansi, director_id_from_path, format_value, parse_filter_list};
pub use classify::{classify_line, SeverityCounts, StatusToken};
pub use client::VplexClient;
pub use health::*;
pub use stats::*;
pub use collector::HealthCollector;
pub use report::ProbeReport;
pub use probe::{run_probe, run_probe_with_client, build_statistics_report};
