use tracing::{debug, info};

use crate::client::VplexClient;
use crate::error::{ProbeError, ResultExt};
use crate::health::HealthReport;
use crate::parsing::director_id_from_path;
use crate::types::{DirectorStatistics, StructuredHealth};

/// Groups the API calls each pipeline needs and labels their failures for the operator
pub struct HealthCollector<'a> {
    client: &'a VplexClient,
}

impl<'a> HealthCollector<'a> {
    pub fn new(client: &'a VplexClient) -> Self {
        Self { client }
    }

    /// Statistics of every system monitor on the local cluster, keyed by director id
    pub async fn collect_statistics(&self) -> Result<DirectorStatistics, ProbeError> {
        let cluster = self
            .client
            .local_cluster_name()
            .await
            .context("Not able to get cluster names")?;

        let monitors = self
            .client
            .system_monitors(&cluster)
            .await
            .context("Not able to get metrics names")?;
        info!("Collecting statistics of {} monitors on {}", monitors.len(), cluster);

        let mut all = DirectorStatistics::new();
        for path in monitors {
            let stats = self
                .client
                .monitor_statistics(&path)
                .await
                .context("Not able to get metrics values")?;
            let director = director_id_from_path(&path);
            debug!("{}: {} metrics", director, stats.statistics.len());
            all.insert(director, stats.statistics);
        }
        Ok(all)
    }

    /// Free-text health-check output for one module flag
    pub async fn collect_health_check(&self, flag: &str) -> Result<HealthReport, ProbeError> {
        let raw = self
            .client
            .health_check(flag)
            .await
            .context("Not able to get health status")?;
        let report = HealthReport::from_response(&raw);
        debug!("health check {} returned {} lines", flag, report.lines().len());
        Ok(report)
    }

    /// Structured health of the local cluster
    pub async fn collect_cluster_health(&self) -> Result<StructuredHealth, ProbeError> {
        let cluster = self
            .client
            .local_cluster_name()
            .await
            .context("Not able to get cluster names")?;
        self.client
            .cluster_health(&cluster)
            .await
            .context("Not able to get cluster health")
    }
}
