use std::path::Path;

use tracing::debug;

use crate::error::ProbeError;
use crate::parsing::{format_value, parse_filter_list};
use crate::types::DirectorStatistics;

/// Allow-list of metric-name substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricFilter {
    entries: Vec<String>,
}

impl MetricFilter {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn parse(content: &str) -> Self {
        Self { entries: parse_filter_list(content) }
    }

    pub fn load(path: &Path) -> Result<Self, ProbeError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ProbeError::Config(format!("{}: {}", path.display(), e)))?;
        let filter = Self::parse(&content);
        debug!("loaded {} metric filter entries from {}", filter.entries.len(), path.display());
        Ok(filter)
    }

    pub fn matches(&self, metric_name: &str) -> bool {
        self.entries.iter().any(|entry| metric_name.contains(entry.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One selected metric after unit conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMetric {
    pub id: String,
    pub director_id: String,
    pub name: String,
    pub value: f64,
}

/// KB/s to bytes/s, microseconds to seconds.
pub fn convert_value(metric_name: &str, value: f64) -> f64 {
    let mut value = value;
    if metric_name.contains("KB/s") {
        value *= 1024.0;
    }
    if metric_name.contains("(us)") {
        value /= 1_000_000.0;
    }
    value
}

pub fn metric_id(director_id: &str, metric_name: &str) -> String {
    format!("{}_{}", director_id, metric_name.replace([' ', '/'], "_"))
}

/// Filtered, converted metrics, directors and names in lexicographic order.
pub fn select_metrics(
    stats: &DirectorStatistics,
    filter: &MetricFilter,
) -> Result<Vec<NormalizedMetric>, ProbeError> {
    let mut selected = Vec::new();
    for (director_id, metrics) in stats {
        for (name, raw) in metrics.iter().filter(|(name, _)| filter.matches(name)) {
            let raw = raw.as_f64().ok_or_else(|| {
                ProbeError::Parse(format!("metric '{}' of {} is not numeric: {}", name, director_id, raw))
            })?;
            selected.push(NormalizedMetric {
                id: metric_id(director_id, name),
                director_id: director_id.clone(),
                name: name.clone(),
                value: convert_value(name, raw),
            });
        }
    }
    Ok(selected)
}

/// `Perf Data successful loaded at <ts> | 'id'=value;;;; ...`
pub fn perf_data_line(timestamp: &str, metrics: &[NormalizedMetric]) -> String {
    let mut line = format!("Perf Data successful loaded at {} | ", timestamp);
    for metric in metrics {
        line.push_str(&format!("'{}'={};;;; ", metric.id, format_value(metric.value)));
    }
    line
}
