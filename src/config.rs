use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::types::ProbeSettings;

/// check_mk installs plugins and metric definitions under sibling trees.
const PLUGIN_DIR_SUFFIX: &str = "/lib/nagios/plugins";
const METRICS_DIR_SUFFIX: &str = "/share/check_mk/web/plugins/metrics";
const FILTER_FILE_NAME: &str = "vplex_stats_filter";

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Directory holding the probe executable, `.` if it cannot be determined.
pub fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Where check_mk expects metric definitions for a plugin installed in `plugin_dir`.
pub fn default_metric_config_dir(plugin_dir: &Path) -> PathBuf {
    let dir = plugin_dir.to_string_lossy();
    if dir.contains(PLUGIN_DIR_SUFFIX) {
        PathBuf::from(dir.replace(PLUGIN_DIR_SUFFIX, METRICS_DIR_SUFFIX))
    } else {
        plugin_dir.to_path_buf()
    }
}

pub fn load_settings() -> Result<ProbeSettings> {
    load_settings_with_env(&SystemEnvironment, &executable_dir())
}

pub fn load_settings_with_env<E: EnvironmentProvider>(env: &E, plugin_dir: &Path) -> Result<ProbeSettings> {
    let filter_file = env
        .get_var("VPLEX_FILTER_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| plugin_dir.join(FILTER_FILE_NAME));

    let metric_config_dir = env
        .get_var("VPLEX_METRIC_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| default_metric_config_dir(plugin_dir));

    let timeout_secs: u64 = env.get_var("VPLEX_TIMEOUT_SECS")
        .unwrap_or_else(|| "30".to_string())
        .parse()
        .context("Invalid VPLEX_TIMEOUT_SECS")?;
    if timeout_secs == 0 {
        return Err(anyhow!("VPLEX_TIMEOUT_SECS must be greater than zero"));
    }

    let retries: u32 = env.get_var("VPLEX_RETRIES")
        .unwrap_or_else(|| "1".to_string())
        .parse()
        .unwrap_or(1);

    let retry_backoff_ms: u64 = env.get_var("VPLEX_RETRY_BACKOFF_MS")
        .unwrap_or_else(|| "500".to_string())
        .parse()
        .unwrap_or(500);

    let verify_tls = env.get_var("VPLEX_VERIFY_TLS")
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(false);

    Ok(ProbeSettings {
        filter_file,
        metric_config_dir,
        timeout: Duration::from_secs(timeout_secs),
        retries,
        retry_backoff: Duration::from_millis(retry_backoff_ms),
        verify_tls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLUGIN_DIR: &str = "/omd/sites/prod/local/lib/nagios/plugins";

    #[test]
    fn test_settings_loading_with_env() {
        let env = MockEnvironment::new()
            .with_var("VPLEX_FILTER_FILE", "/etc/vplex/filter")
            .with_var("VPLEX_METRIC_CONFIG_DIR", "/tmp/metrics")
            .with_var("VPLEX_TIMEOUT_SECS", "10")
            .with_var("VPLEX_RETRIES", "3")
            .with_var("VPLEX_RETRY_BACKOFF_MS", "250")
            .with_var("VPLEX_VERIFY_TLS", "true");

        let settings = load_settings_with_env(&env, Path::new(PLUGIN_DIR)).unwrap();

        assert_eq!(settings.filter_file, PathBuf::from("/etc/vplex/filter"));
        assert_eq!(settings.metric_config_dir, PathBuf::from("/tmp/metrics"));
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.retries, 3);
        assert_eq!(settings.retry_backoff, Duration::from_millis(250));
        assert!(settings.verify_tls);
    }

    #[test]
    fn test_settings_loading_defaults() {
        let settings = load_settings_with_env(&MockEnvironment::new(), Path::new(PLUGIN_DIR)).unwrap();

        assert_eq!(settings.filter_file, PathBuf::from(PLUGIN_DIR).join("vplex_stats_filter"));
        assert_eq!(
            settings.metric_config_dir,
            PathBuf::from("/omd/sites/prod/local/share/check_mk/web/plugins/metrics")
        );
        assert_eq!(settings.timeout, Duration::from_secs(30)); // default
        assert_eq!(settings.retries, 1); // default
        assert_eq!(settings.retry_backoff, Duration::from_millis(500)); // default
        assert!(!settings.verify_tls); // default
    }

    #[test]
    fn test_metric_config_dir_outside_plugin_tree() {
        assert_eq!(default_metric_config_dir(Path::new("/opt/probes")), PathBuf::from("/opt/probes"));
    }

    #[test]
    fn test_invalid_timeout() {
        let env = MockEnvironment::new().with_var("VPLEX_TIMEOUT_SECS", "soon");
        let result = load_settings_with_env(&env, Path::new(PLUGIN_DIR));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("VPLEX_TIMEOUT_SECS"));

        let env = MockEnvironment::new().with_var("VPLEX_TIMEOUT_SECS", "0");
        let result = load_settings_with_env(&env, Path::new(PLUGIN_DIR));
        assert!(result.unwrap_err().to_string().contains("greater than zero"));
    }

    #[test]
    fn test_numeric_parsing_with_invalid_values() {
        // Invalid retry settings fall back to defaults
        let env = MockEnvironment::new()
            .with_var("VPLEX_RETRIES", "many")
            .with_var("VPLEX_RETRY_BACKOFF_MS", "-5");

        let settings = load_settings_with_env(&env, Path::new(PLUGIN_DIR)).unwrap();
        assert_eq!(settings.retries, 1);
        assert_eq!(settings.retry_backoff, Duration::from_millis(500));
    }

    #[test]
    fn test_boolean_parsing() {
        for val in ["1", "true", "TRUE", "True"] {
            let env = MockEnvironment::new().with_var("VPLEX_VERIFY_TLS", val);
            let settings = load_settings_with_env(&env, Path::new(PLUGIN_DIR)).unwrap();
            assert!(settings.verify_tls, "Failed for value: {}", val);
        }

        for val in ["0", "false", "FALSE", "no", "off", ""] {
            let env = MockEnvironment::new().with_var("VPLEX_VERIFY_TLS", val);
            let settings = load_settings_with_env(&env, Path::new(PLUGIN_DIR)).unwrap();
            assert!(!settings.verify_tls, "Failed for value: {}", val);
        }
    }
}
