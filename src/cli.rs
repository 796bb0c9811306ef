use clap::Parser;

use crate::types::{Module, RequestContext};

#[derive(Parser, Debug)]
#[command(name = "check-vplex")]
#[command(about = "check_mk probe for VPLEX cluster health and performance data")]
pub struct Cli {
    /// Hostname or IP address of the VPLEX management server
    #[arg(short = 'H', long)]
    pub hostname: String,

    /// API user
    #[arg(short, long)]
    pub username: String,

    /// API user password
    #[arg(short, long)]
    pub password: String,

    /// Health-check module to evaluate, `all` for the cluster health object, `stats` for performance data
    #[arg(short, long, value_enum)]
    pub module: Module,

    /// Write a new check_mk metric definition file (stats only)
    #[arg(short = 'c', long = "config")]
    pub build_config: bool,
}

impl Cli {
    pub fn into_context(self, timestamp: String) -> RequestContext {
        RequestContext {
            hostname: self.hostname,
            username: self.username,
            password: self.password,
            module: self.module,
            timestamp,
            build_config: self.build_config,
        }
    }
}
