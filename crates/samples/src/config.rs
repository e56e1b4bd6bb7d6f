use std::time::Duration;

use librarian_registry::{RegistryClient, RegistryError, DEFAULT_REGISTRY_URL};

/// Seconds before a registry call is abandoned when `REGISTRY_TIMEOUT_SECS`
/// is unset.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Per-sample fallbacks for the group and artifact the sample works on.
#[derive(Debug, Clone, Copy)]
pub struct SampleDefaults {
    pub group_id: &'static str,
    pub artifact_id: &'static str,
}

/// Sample configuration loaded from environment variables.
///
/// | Env Var                 | Default                                    |
/// |-------------------------|--------------------------------------------|
/// | `REGISTRY_URL`          | `http://localhost:8080/apis/registry/v3/`  |
/// | `GROUP_ID`              | per sample                                 |
/// | `ARTIFACT_ID`           | per sample                                 |
/// | `REGISTRY_TIMEOUT_SECS` | `30`                                       |
///
/// Empty values count as unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleConfig {
    pub registry_url: String,
    pub group_id: String,
    pub artifact_id: String,
    pub timeout: Duration,
}

impl SampleConfig {
    pub fn from_env(defaults: &SampleDefaults) -> Self {
        Self::from_lookup(defaults, |key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(defaults: &SampleDefaults, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match var("REGISTRY_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "REGISTRY_TIMEOUT_SECS is not a number, using default");
                DEFAULT_TIMEOUT_SECS
            }),
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            registry_url: var("REGISTRY_URL").unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string()),
            group_id: var("GROUP_ID").unwrap_or_else(|| defaults.group_id.to_string()),
            artifact_id: var("ARTIFACT_ID").unwrap_or_else(|| defaults.artifact_id.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// A registry client bound to `registry_url`.
    pub fn client(&self) -> Result<RegistryClient, RegistryError> {
        RegistryClient::with_timeout(&self.registry_url, self.timeout)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const DEFAULTS: SampleDefaults = SampleDefaults {
        group_id: "example-group",
        artifact_id: "example-user-schema",
    };

    fn config_from(pairs: &[(&str, &str)]) -> SampleConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SampleConfig::from_lookup(&DEFAULTS, |key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.registry_url, DEFAULT_REGISTRY_URL);
        assert_eq!(config.group_id, "example-group");
        assert_eq!(config.artifact_id, "example-user-schema");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from(&[
            ("REGISTRY_URL", "http://registry:9000/apis/registry/v3"),
            ("GROUP_ID", "custom"),
            ("ARTIFACT_ID", "thing"),
            ("REGISTRY_TIMEOUT_SECS", "5"),
        ]);
        assert_eq!(config.registry_url, "http://registry:9000/apis/registry/v3");
        assert_eq!(config.group_id, "custom");
        assert_eq!(config.artifact_id, "thing");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = config_from(&[("GROUP_ID", ""), ("REGISTRY_URL", "  ")]);
        assert_eq!(config.group_id, "example-group");
        assert_eq!(config.registry_url, DEFAULT_REGISTRY_URL);
    }

    #[test]
    fn bad_timeout_falls_back_to_default() {
        let config = config_from(&[("REGISTRY_TIMEOUT_SECS", "soon")]);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn client_rejects_invalid_url() {
        let config = config_from(&[("REGISTRY_URL", "not a url")]);
        assert!(config.client().is_err());
    }
}
