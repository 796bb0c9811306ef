use chrono::Local;
use clap::Parser;
use tracing::debug;

use vplex_health_probe::{load_settings, run_probe, Cli, TIMESTAMP_FORMAT};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    let ctx = cli.into_context(timestamp);
    debug!(
        "hostname = {}, user = {}, module = {}, flag = {:?}",
        ctx.hostname,
        ctx.username,
        ctx.module,
        ctx.module.health_check_flag()
    );

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            println!("{}: Invalid probe settings: {:#}", ctx.timestamp, err);
            std::process::exit(1);
        }
    };
    debug!("settings = {:?}", settings);

    let code = match run_probe(&ctx, &settings).await {
        Ok(report) => {
            report.emit();
            report.exit_code
        }
        Err(err) => {
            if !err.is_silent() {
                println!("{}: {}", ctx.timestamp, err);
            }
            err.exit_code()
        }
    };
    std::process::exit(code);
}

fn init_tracing() {
    // stdout belongs to the monitoring system
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
