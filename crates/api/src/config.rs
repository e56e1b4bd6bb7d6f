use std::path::PathBuf;

use librarian_registry::DEFAULT_REGISTRY_URL;

/// A configuration value that could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Where the OpenAPI document served under `/api-docs` comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocsSource {
    /// A YAML or JSON file on disk. The bundled document is used when the
    /// file does not exist.
    File { path: PathBuf },
    /// A stored artifact version in a schema registry.
    Registry {
        registry_url: String,
        group_id: String,
        artifact_id: String,
        version: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub docs: DocsSource,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                   |
    /// |------------------------|-------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                 |
    /// | `PORT`                 | `3000`                                    |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`                   |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                      |
    /// | `DOCS_SOURCE`          | `file` (or `registry`)                    |
    /// | `OPENAPI_SPEC_PATH`    | `openapi.yaml`                            |
    /// | `REGISTRY_URL`         | `http://localhost:8080/apis/registry/v3/` |
    /// | `DOCS_GROUP_ID`        | `group001`                                |
    /// | `DOCS_ARTIFACT_ID`     | `library-api`                             |
    /// | `DOCS_VERSION`         | `1.0.0`                                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = var("PORT", "3000");
        let port: u16 = port.parse().map_err(|_| ConfigError::Invalid {
            var: "PORT",
            expected: "port number",
            value: port,
        })?;

        let timeout = var("REQUEST_TIMEOUT_SECS", "30");
        let request_timeout_secs: u64 = timeout.parse().map_err(|_| ConfigError::Invalid {
            var: "REQUEST_TIMEOUT_SECS",
            expected: "number of seconds",
            value: timeout,
        })?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let docs = match var("DOCS_SOURCE", "file").to_ascii_lowercase().as_str() {
            "file" => DocsSource::File {
                path: PathBuf::from(var("OPENAPI_SPEC_PATH", "openapi.yaml")),
            },
            "registry" => DocsSource::Registry {
                registry_url: var("REGISTRY_URL", DEFAULT_REGISTRY_URL),
                group_id: var("DOCS_GROUP_ID", "group001"),
                artifact_id: var("DOCS_ARTIFACT_ID", "library-api"),
                version: var("DOCS_VERSION", "1.0.0"),
            },
            other => {
                return Err(ConfigError::Invalid {
                    var: "DOCS_SOURCE",
                    expected: "docs source ('file' or 'registry')",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host: var("HOST", "0.0.0.0"),
            port,
            cors_origins,
            request_timeout_secs,
            docs,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, ["http://localhost:5173"]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(
            config.docs,
            DocsSource::File {
                path: PathBuf::from("openapi.yaml")
            }
        );
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(&[("CORS_ORIGINS", "http://a.test, http://b.test,,")]).unwrap();
        assert_eq!(config.cors_origins, ["http://a.test", "http://b.test"]);
    }

    #[test]
    fn registry_docs_source_uses_docs_coordinates() {
        let config = load(&[
            ("DOCS_SOURCE", "Registry"),
            ("REGISTRY_URL", "http://registry:8080/apis/registry/v3"),
            ("DOCS_VERSION", "2.0.0"),
        ])
        .unwrap();
        assert_eq!(
            config.docs,
            DocsSource::Registry {
                registry_url: "http://registry:8080/apis/registry/v3".into(),
                group_id: "group001".into(),
                artifact_id: "library-api".into(),
                version: "2.0.0".into(),
            }
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "PORT", .. });
    }

    #[test]
    fn unknown_docs_source_is_rejected() {
        let err = load(&[("DOCS_SOURCE", "s3")]).unwrap_err();
        assert_matches!(err, ConfigError::Invalid { var: "DOCS_SOURCE", ref value, .. } if value == "s3");
    }
}
