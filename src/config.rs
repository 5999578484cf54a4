//! Runtime configuration from the environment.
//!
//! Every knob has a default that works for a local checkout: serve on port
//! 8000, load artifacts from `./artifacts`, screen `Y`/`YES`/`P` as
//! positive.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::PositivePolicy;
use crate::GlyscreenError;

/// Listen address, `host:port`.
pub const BIND_ENV: &str = "GLYSCREEN_BIND";
/// Directory holding the exported artifact files.
pub const ARTIFACT_DIR_ENV: &str = "GLYSCREEN_ARTIFACT_DIR";
/// Comma-separated class names that read as a positive screen.
pub const POSITIVE_MARKERS_ENV: &str = "GLYSCREEN_POSITIVE_MARKERS";
/// When set, logs go to this file through a non-blocking appender instead
/// of stdout. Read by the server binary during tracing setup.
pub const LOG_FILE_ENV: &str = "GLYSCREEN_LOG_FILE";

const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// Runtime configuration for the server binary.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub artifact_dir: PathBuf,
    pub positive_policy: PositivePolicy,
}

impl Config {
    /// Read configuration from the environment, falling back to defaults.
    ///
    /// # Errors
    /// Returns a [`GlyscreenError::Config`] for a malformed bind address or
    /// an empty marker list.
    pub fn from_env() -> Result<Self, GlyscreenError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(BIND_ENV) {
            config.bind_addr = raw.parse().map_err(|e| {
                GlyscreenError::Config(format!("{BIND_ENV} {raw:?} is not a socket address: {e}"))
            })?;
        }

        if let Ok(raw) = std::env::var(ARTIFACT_DIR_ENV) {
            config.artifact_dir = PathBuf::from(raw);
        }

        if let Ok(raw) = std::env::var(POSITIVE_MARKERS_ENV) {
            config.positive_policy = parse_markers(&raw)?;
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
            positive_policy: PositivePolicy::default(),
        }
    }
}

fn parse_markers(raw: &str) -> Result<PositivePolicy, GlyscreenError> {
    let markers: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .collect();
    if markers.is_empty() {
        return Err(GlyscreenError::Config(format!(
            "{POSITIVE_MARKERS_ENV} must name at least one marker"
        )));
    }
    Ok(PositivePolicy::new(&markers, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.artifact_dir, PathBuf::from("artifacts"));
        assert_eq!(
            config.positive_policy.markers(),
            &["P".to_string(), "Y".to_string(), "YES".to_string()]
        );
    }

    #[test]
    fn test_marker_parsing() {
        let policy = parse_markers("yes, positive ,").expect("should parse");
        assert_eq!(
            policy.markers(),
            &["POSITIVE".to_string(), "YES".to_string()]
        );

        assert!(parse_markers(" , ,").is_err());
    }

    // Single test owns the env vars; parallel tests must not touch them.
    #[test]
    fn test_env_overrides() {
        std::env::set_var(BIND_ENV, "127.0.0.1:9100");
        std::env::set_var(ARTIFACT_DIR_ENV, "/srv/models");
        std::env::set_var(POSITIVE_MARKERS_ENV, "Y");

        let config = Config::from_env().expect("should load");
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:9100");
        assert_eq!(config.artifact_dir, PathBuf::from("/srv/models"));
        assert_eq!(config.positive_policy.markers(), &["Y".to_string()]);

        std::env::set_var(BIND_ENV, "not-an-address");
        let err = Config::from_env().expect_err("must reject");
        assert!(matches!(err, GlyscreenError::Config(_)));

        std::env::remove_var(BIND_ENV);
        std::env::remove_var(ARTIFACT_DIR_ENV);
        std::env::remove_var(POSITIVE_MARKERS_ENV);
    }
}
