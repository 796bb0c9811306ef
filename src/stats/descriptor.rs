//! check_mk `metric_info` declarations for the selected metrics.

use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::info;

use crate::error::ProbeError;
use crate::stats::normalize::NormalizedMetric;

/// Applied in order to the metric name (up to its unit suffix).
pub const TITLE_REPLACEMENTS: &[(&str, &str)] = &[
    ("be", "Back-End"),
    ("fe_", "Front-End_"),
    ("avg_lat", "Average Latency"),
    ("_", " "),
    ("director.", ""),
    ("director", "Director"),
];

/// First match wins. `%` sits ahead of `us` so `busy (%)` stays a percentage.
pub const UNIT_PRECEDENCE: &[(&str, &str)] = &[
    ("%", "%"),
    ("counts/s", "1/s"),
    ("us", "s"),
    ("KB/s", "bytes/s"),
];

pub const FALLBACK_UNIT: &str = "count";

pub fn metric_title(director_id: &str, metric_name: &str) -> String {
    let base = metric_name.split('(').next().unwrap_or(metric_name);
    let readable = TITLE_REPLACEMENTS
        .iter()
        .fold(base.to_string(), |acc, (pattern, replacement)| acc.replace(pattern, replacement));
    title_case(format!("{}: {}", director_id, readable).trim_end())
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

pub fn metric_unit(metric_name: &str) -> &'static str {
    UNIT_PRECEDENCE
        .iter()
        .find(|(hint, _)| metric_name.contains(hint))
        .map(|(_, unit)| *unit)
        .unwrap_or(FALLBACK_UNIT)
}

/// `#rrggbb` with every channel in `[10, 253]`.
pub fn random_color<R: Rng>(rng: &mut R) -> String {
    let red: u8 = rng.gen_range(10..=253);
    let green: u8 = rng.gen_range(10..=253);
    let blue: u8 = rng.gen_range(10..=253);
    format!("#{:02x}{:02x}{:02x}", red, green, blue)
}

pub fn render_descriptor<R: Rng>(metrics: &[NormalizedMetric], rng: &mut R) -> String {
    let mut out = String::new();
    for metric in metrics {
        out.push_str(&format!("metric_info[\"{}\"] = {{ \n", metric.id));
        out.push_str(&format!(
            "    \"title\" : _(\"{}\"),\n",
            metric_title(&metric.director_id, &metric.name)
        ));
        out.push_str(&format!("    \"unit\" : \"{}\",\n", metric_unit(&metric.name)));
        out.push_str(&format!("    \"color\" : \"{}\",\n", random_color(rng)));
        out.push_str("}\n");
    }
    out
}

/// `<dir>/vplex_perf_metric_<host>.py` with dots in the host replaced.
pub fn descriptor_path(config_dir: &Path, hostname: &str) -> PathBuf {
    config_dir.join(format!("vplex_perf_metric_{}.py", hostname.replace('.', "_")))
}

pub fn write_descriptor(path: &Path, content: &str) -> Result<(), ProbeError> {
    std::fs::write(path, content)
        .map_err(|e| ProbeError::Config(format!("{}: {}", path.display(), e)))?;
    info!("wrote metric descriptor file {}", path.display());
    Ok(())
}
