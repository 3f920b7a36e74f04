use std::env;
use thiserror::Error;

const DEFAULT_APP_NAME: &str = "BrowseMate API";
const DEFAULT_APP_VERSION: &str = "1.0.0";
const DEFAULT_APP_DESCRIPTION: &str = "## BrowseMate API\n\n\
Demo catalog service with users, items, and health checks.\n\n\
* Typed request validation\n\
* Generated OpenAPI document and Swagger UI\n\
* In-memory storage (data is lost on restart)";
const DEFAULT_API_PREFIX: &str = "/api/v1";

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Raw value that failed to parse.
        value: String,
    },
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// Any origin (`*`).
    Any,
    /// Only the listed origins.
    List(Vec<String>),
}

/// Runtime configuration for the BrowseMate server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Application name shown in the OpenAPI document and root endpoint.
    pub app_name: String,
    /// API version reported by health checks and the OpenAPI document.
    pub app_version: String,
    /// Markdown description rendered by Swagger UI.
    pub app_description: String,
    /// Enables debug-level logging by default.
    pub debug: bool,
    /// Path prefix for every resource route, e.g. `/api/v1`.
    pub api_prefix: String,
    /// Optional override for the HTTP server port.
    pub server_port: Option<u16>,
    /// Allowed CORS origins.
    pub cors_origins: CorsOrigins,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.into(),
            app_version: DEFAULT_APP_VERSION.into(),
            app_description: DEFAULT_APP_DESCRIPTION.into(),
            debug: true,
            api_prefix: DEFAULT_API_PREFIX.into(),
            server_port: None,
            cors_origins: CorsOrigins::Any,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            app_name: load_env_optional("APP_NAME").unwrap_or(defaults.app_name),
            app_version: load_env_optional("APP_VERSION").unwrap_or(defaults.app_version),
            app_description: load_env_optional("APP_DESCRIPTION")
                .unwrap_or(defaults.app_description),
            debug: load_env_optional("DEBUG")
                .map(|value| parse_bool("DEBUG", &value))
                .transpose()?
                .unwrap_or(defaults.debug),
            api_prefix: load_env_optional("API_PREFIX")
                .map(|value| normalize_prefix(&value))
                .unwrap_or(defaults.api_prefix),
            server_port: load_env_optional("SERVER_PORT")
                .map(|value| {
                    value.parse().map_err(|_| ConfigError::InvalidValue {
                        key: "SERVER_PORT".into(),
                        value,
                    })
                })
                .transpose()?,
            cors_origins: load_env_optional("CORS_ALLOW_ORIGINS")
                .map(|value| parse_origins(&value))
                .unwrap_or(defaults.cors_origins),
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Ensure the prefix starts with `/` and has no trailing `/`. An empty result means "no prefix".
fn normalize_prefix(value: &str) -> String {
    let trimmed = value.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn parse_origins(value: &str) -> CorsOrigins {
    let origins: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        CorsOrigins::Any
    } else {
        CorsOrigins::List(origins)
    }
}

/// Load `.env` (when present) and then the configuration from the environment.
pub fn load_config() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();
    Config::from_env()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_normalized() {
        assert_eq!(normalize_prefix("api/v2/"), "/api/v2");
        assert_eq!(normalize_prefix("/api/v1"), "/api/v1");
        assert_eq!(normalize_prefix("/"), "");
    }

    #[test]
    fn origins_wildcard_wins() {
        assert_eq!(parse_origins("*"), CorsOrigins::Any);
        assert_eq!(parse_origins("https://a.dev, *"), CorsOrigins::Any);
        assert_eq!(
            parse_origins("https://a.dev, https://b.dev"),
            CorsOrigins::List(vec!["https://a.dev".into(), "https://b.dev".into()])
        );
    }

    #[test]
    fn bool_values() {
        assert!(parse_bool("DEBUG", "TRUE").expect("bool"));
        assert!(!parse_bool("DEBUG", "0").expect("bool"));
        assert!(parse_bool("DEBUG", "maybe").is_err());
    }

    #[test]
    fn defaults_describe_demo_service() {
        let config = Config::default();
        assert_eq!(config.app_name, "BrowseMate API");
        assert_eq!(config.app_version, "1.0.0");
        assert_eq!(config.api_prefix, "/api/v1");
        assert!(config.server_port.is_none());
    }
}
