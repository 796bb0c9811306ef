use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Timestamp layout used in every line the probe prints.
pub const TIMESTAMP_FORMAT: &str = "%d-%b-%Y (%H:%M:%S)";

/// Health-check module selected with `-m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Module {
    Configuration,
    BackEnd,
    FrontEnd,
    Cache,
    ConsistencyGroup,
    Wan,
    Hardware,
    #[value(name = "cluster_witness")]
    ClusterWitness,
    Vpn,
    IoAborts,
    All,
    Stats,
}

impl Module {
    pub fn name(&self) -> &'static str {
        match self {
            Module::Configuration => "configuration",
            Module::BackEnd => "back-end",
            Module::FrontEnd => "front-end",
            Module::Cache => "cache",
            Module::ConsistencyGroup => "consistency-group",
            Module::Wan => "wan",
            Module::Hardware => "hardware",
            Module::ClusterWitness => "cluster_witness",
            Module::Vpn => "vpn",
            Module::IoAborts => "io-aborts",
            Module::All => "all",
            Module::Stats => "stats",
        }
    }

    /// Argument passed to `/vplex/health-check`; `None` for modules served by other endpoints.
    pub fn health_check_flag(&self) -> Option<String> {
        match self {
            Module::All | Module::Stats => None,
            m => Some(format!("--{}", m.name())),
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exit-code mapping understood by the monitoring system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok = 0,
    Warning = 1,
    Error = 2,
    Unknown = 3,
}

impl Severity {
    pub fn exit_code(self) -> i32 {
        self as i32
    }
}

/// Everything one invocation needs to know about its target. Built once, never mutated.
#[derive(Clone)]
pub struct RequestContext {
    pub hostname: String,
    pub username: String,
    pub password: String,
    pub module: Module,
    pub timestamp: String,
    pub build_config: bool,
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("hostname", &self.hostname)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("module", &self.module)
            .field("timestamp", &self.timestamp)
            .field("build_config", &self.build_config)
            .finish()
    }
}

/// Probe settings read from the environment.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub filter_file: PathBuf,
    pub metric_config_dir: PathBuf,
    pub timeout: Duration,
    pub retries: u32,
    pub retry_backoff: Duration,
    pub verify_tls: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClusterSummary {
    pub name: String,
    #[serde(default)]
    pub is_local: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorStatistics {
    pub statistics: BTreeMap<String, serde_json::Value>,
}

/// Health fields of `/vplex/v2/clusters/{name}`; the remaining cluster attributes are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructuredHealth {
    pub health_state: String,
    pub operational_status: String,
    pub health_indications: Vec<String>,
}

#[derive(Serialize)]
pub struct HealthCheckRequest<'a> {
    pub args: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct HealthCheckResponse {
    pub response: HealthCheckBody,
}

#[derive(Debug, Deserialize)]
pub struct HealthCheckBody {
    #[serde(rename = "custom-data")]
    pub custom_data: String,
}

/// Raw statistics of every director, keyed by director id then metric name.
pub type DirectorStatistics = BTreeMap<String, BTreeMap<String, serde_json::Value>>;
