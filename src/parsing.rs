use std::sync::LazyLock;

use regex::Regex;

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\x9B|\x1B\[)[0-?]*[ -/]*[@-~]").expect("valid ANSI pattern"));

/// Remove terminal color and cursor sequences from health-check output.
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Director id from a system monitor resource path, e.g.
/// `/vplex/v2/clusters/cluster-1/system_monitors/director-1-1-A_PERPETUAL_MONITOR` -> `director_1_1_A`.
pub fn director_id_from_path(path: &str) -> String {
    let last = path.rsplit('/').next().unwrap_or(path).replace('-', "_");
    match last.find("_PERPETUAL") {
        Some(idx) => last[..idx].to_string(),
        None => last,
    }
}

/// Four decimals, then trailing zeros and a dangling point dropped.
pub fn format_value(value: f64) -> String {
    let fixed = format!("{:.4}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Parse the metric filter list: one substring per line, blank lines skipped.
pub fn parse_filter_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
