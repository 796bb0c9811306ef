use tracing::{debug, info};

use crate::client::VplexClient;
use crate::collector::HealthCollector;
use crate::error::{ProbeError, ResultExt};
use crate::health::{evaluate, evaluate_structured};
use crate::report::ProbeReport;
use crate::stats::{descriptor_path, perf_data_line, render_descriptor, select_metrics, write_descriptor, MetricFilter};
use crate::types::{DirectorStatistics, Module, ProbeSettings, RequestContext};

pub async fn run_probe(ctx: &RequestContext, settings: &ProbeSettings) -> Result<ProbeReport, ProbeError> {
    let client = VplexClient::from_context(ctx, settings)?;
    run_probe_with_client(ctx, settings, &client).await
}

/// Run the pipeline selected by the context's module against an existing client.
pub async fn run_probe_with_client(
    ctx: &RequestContext,
    settings: &ProbeSettings,
    client: &VplexClient,
) -> Result<ProbeReport, ProbeError> {
    let collector = HealthCollector::new(client);
    match ctx.module {
        Module::Stats => {
            let stats = collector.collect_statistics().await?;
            build_statistics_report(ctx, settings, &stats)
        }
        Module::All => {
            let health = collector.collect_cluster_health().await?;
            let verdict = evaluate_structured(&health, &ctx.timestamp);
            info!("cluster health state {} -> exit {}", health.health_state, verdict.exit_code());
            Ok(ProbeReport::from_structured_verdict(verdict))
        }
        module => {
            let flag = module
                .health_check_flag()
                .ok_or_else(|| ProbeError::Config(format!("module {} has no health check", module)))?;
            let report = collector.collect_health_check(&flag).await?;
            let verdict = evaluate(&report);
            debug!("severity counts {:?}", verdict.counts);
            if verdict.label().is_none() {
                return Err(ProbeError::EvaluationExhausted);
            }
            info!("{} final status {:?}", module, verdict.status);
            Ok(ProbeReport::from_text_verdict(&verdict, &report, &ctx.timestamp))
        }
    }
}

/// Filter, normalize and format fetched statistics; writes the descriptor file when asked to.
pub fn build_statistics_report(
    ctx: &RequestContext,
    settings: &ProbeSettings,
    stats: &DirectorStatistics,
) -> Result<ProbeReport, ProbeError> {
    let filter = MetricFilter::load(&settings.filter_file)
        .context("Not able to load Vplex metrics filter file")?;

    let metrics = select_metrics(stats, &filter).context("Error while generating result output")?;
    info!("{} of {} directors' metrics selected", metrics.len(), stats.len());
    let line = perf_data_line(&ctx.timestamp, &metrics);

    if ctx.build_config {
        let content = render_descriptor(&metrics, &mut rand::thread_rng());
        let path = descriptor_path(&settings.metric_config_dir, &ctx.hostname);
        write_descriptor(&path, &content).context("Not able to write metric config file")?;
    }

    Ok(ProbeReport::perf_data(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn context(build_config: bool) -> RequestContext {
        RequestContext {
            hostname: "vplex01.lab".to_string(),
            username: "service".to_string(),
            password: "secret".to_string(),
            module: Module::Stats,
            timestamp: "ts".to_string(),
            build_config,
        }
    }

    fn settings(dir: &std::path::Path) -> ProbeSettings {
        ProbeSettings {
            filter_file: dir.join("vplex_stats_filter"),
            metric_config_dir: dir.to_path_buf(),
            timeout: Duration::from_secs(5),
            retries: 0,
            retry_backoff: Duration::from_millis(1),
            verify_tls: false,
        }
    }

    fn stats() -> DirectorStatistics {
        let mut metrics = BTreeMap::new();
        metrics.insert("fe-lu read (KB/s)".to_string(), json!(2.0));
        metrics.insert("be-prt ops (counts/s)".to_string(), json!(3));
        let mut all = DirectorStatistics::new();
        all.insert("director_1_1_A".to_string(), metrics);
        all
    }

    #[test]
    fn test_statistics_report() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vplex_stats_filter"), "fe-lu\n").unwrap();

        let report = build_statistics_report(&context(false), &settings(dir.path()), &stats()).unwrap();
        assert_eq!(report.exit_code, 0);
        assert_eq!(
            report.lines,
            vec!["Perf Data successful loaded at ts | 'director_1_1_A_fe-lu_read_(KB_s)'=2048;;;; "]
        );
        assert!(!dir.path().join("vplex_perf_metric_vplex01_lab.py").exists());
    }

    #[test]
    fn test_statistics_report_writes_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vplex_stats_filter"), "fe-lu\nops\n").unwrap();

        build_statistics_report(&context(true), &settings(dir.path()), &stats()).unwrap();
        let written = std::fs::read_to_string(dir.path().join("vplex_perf_metric_vplex01_lab.py")).unwrap();
        assert_eq!(written.matches("metric_info[").count(), 2);
        assert!(written.contains("\"unit\" : \"bytes/s\""));
        assert!(written.contains("\"unit\" : \"1/s\""));
    }

    #[test]
    fn test_missing_filter_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_statistics_report(&context(false), &settings(dir.path()), &stats()).unwrap_err();
        assert!(matches!(err, ProbeError::Config(_)));
        assert!(err.to_string().starts_with("Not able to load Vplex metrics filter file: "));
    }
}
