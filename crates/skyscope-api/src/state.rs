//! # Application State
//!
//! Everything a handler reads, built once at startup and shared read-only.
//! Record collections and the policy table are never mutated after
//! [`AppState::bootstrap`], so no locks are held anywhere.

use std::path::PathBuf;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use skyscope_credential::{
    CredentialError, CredentialIssuer, CredentialVerifier, DEFAULT_TOKEN_TTL_SECS,
    MAX_TOKEN_TTL_SECS,
};
use skyscope_crypto::{CryptoError, Ed25519KeyPair};
use skyscope_dataset::{Catalog, Datasets, LoadError};
use skyscope_policy::{PolicyError, PolicyTable};
use thiserror::Error;

/// Startup failure.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("signing key: {0}")]
    Key(#[from] CryptoError),

    #[error("credential issuer: {0}")]
    Issuer(#[from] CredentialError),
}

/// Process configuration, read from the environment.
///
/// Custom `Debug` redacts the signing seed.
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub policy_file: Option<PathBuf>,
    pub signing_key_hex: Option<String>,
    pub token_ttl_secs: i64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("data_dir", &self.data_dir)
            .field("policy_file", &self.policy_file)
            .field(
                "signing_key_hex",
                &self.signing_key_hex.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            data_dir: PathBuf::from("./data"),
            policy_file: None,
            signing_key_hex: None,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, BootstrapError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`.
    ///
    /// `PORT` falls back to 8080 when unparsable. Every other variable, when
    /// set, must be valid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BootstrapError> {
        let defaults = Self::default();
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let data_dir = lookup("SKYSCOPE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let policy_file = lookup("SKYSCOPE_POLICY_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let signing_key_hex = lookup("SKYSCOPE_SIGNING_KEY_HEX")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let token_ttl_secs = match lookup("SKYSCOPE_TOKEN_TTL_SECS") {
            None => defaults.token_ttl_secs,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(secs) if (1..=MAX_TOKEN_TTL_SECS).contains(&secs) => secs,
                _ => {
                    return Err(BootstrapError::Config(format!(
                        "SKYSCOPE_TOKEN_TTL_SECS must be an integer in 1..={MAX_TOKEN_TTL_SECS}, got {raw:?}"
                    )))
                }
            },
        };
        Ok(Self {
            port,
            data_dir,
            policy_file,
            signing_key_hex,
            token_ttl_secs,
        })
    }
}

/// Load the credential signing key from configuration, or generate an
/// ephemeral one.
///
/// Credentials signed by an ephemeral key stop verifying when the process
/// restarts.
pub fn load_or_generate_signing_key(config: &AppConfig) -> Result<Ed25519KeyPair, BootstrapError> {
    match &config.signing_key_hex {
        Some(hex) => {
            let key = Ed25519KeyPair::from_seed_hex(hex)?;
            tracing::info!(public_key = %key.public_key(), "loaded credential signing key");
            Ok(key)
        }
        None => {
            let key = Ed25519KeyPair::generate();
            tracing::warn!(
                public_key = %key.public_key(),
                "SKYSCOPE_SIGNING_KEY_HEX not set; using an ephemeral signing key, issued credentials will not survive a restart"
            );
            Ok(key)
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub issuer: CredentialIssuer,
    pub verifier: CredentialVerifier,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Assemble state from already-built parts.
    pub fn new(catalog: Catalog, issuer: CredentialIssuer) -> Self {
        let verifier = issuer.verifier();
        Self {
            catalog: Arc::new(catalog),
            issuer,
            verifier,
            metrics: None,
        }
    }

    /// Attach a Prometheus handle so `/metrics` can render.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Load the policy table, datasets and signing key named by `config`.
    pub fn bootstrap(config: &AppConfig) -> Result<Self, BootstrapError> {
        let policies = match &config.policy_file {
            Some(path) => PolicyTable::load(path)?,
            None => {
                tracing::info!("no policy file configured; using the standard tier policy");
                PolicyTable::standard()
            }
        };
        let datasets = Datasets::load_dir(&config.data_dir)?;
        let catalog = Catalog::new(datasets, Arc::new(policies));
        let key = load_or_generate_signing_key(config)?;
        let issuer = CredentialIssuer::new(key, config.token_ttl_secs)?;
        Ok(Self::new(catalog, issuer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert!(config.policy_file.is_none());
        assert!(config.signing_key_hex.is_none());
        assert_eq!(config.token_ttl_secs, DEFAULT_TOKEN_TTL_SECS);
    }

    #[test]
    fn reads_all_variables() {
        let seed = "ab".repeat(32);
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("SKYSCOPE_DATA_DIR", "/srv/data"),
            ("SKYSCOPE_POLICY_FILE", "/etc/skyscope/tiers.yaml"),
            ("SKYSCOPE_SIGNING_KEY_HEX", seed.as_str()),
            ("SKYSCOPE_TOKEN_TTL_SECS", "60"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_dir, PathBuf::from("/srv/data"));
        assert_eq!(
            config.policy_file,
            Some(PathBuf::from("/etc/skyscope/tiers.yaml"))
        );
        assert_eq!(config.signing_key_hex.as_deref(), Some(seed.as_str()));
        assert_eq!(config.token_ttl_secs, 60);
    }

    #[test]
    fn unparsable_port_falls_back() {
        let config = AppConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn invalid_ttl_rejected() {
        for bad in ["0", "-5", "day", "9000000000000000", "9223372036854775807"] {
            assert!(matches!(
                AppConfig::from_lookup(lookup(&[("SKYSCOPE_TOKEN_TTL_SECS", bad)])),
                Err(BootstrapError::Config(_))
            ));
        }
    }

    #[test]
    fn debug_redacts_signing_key() {
        let seed = "cd".repeat(32);
        let config = AppConfig {
            signing_key_hex: Some(seed.clone()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(&seed));
    }

    #[test]
    fn configured_key_is_deterministic() {
        let config = AppConfig {
            signing_key_hex: Some("01".repeat(32)),
            ..AppConfig::default()
        };
        let a = load_or_generate_signing_key(&config).unwrap();
        let b = load_or_generate_signing_key(&config).unwrap();
        assert_eq!(a.public_key(), b.public_key());
    }

    #[test]
    fn bad_key_is_startup_error() {
        let config = AppConfig {
            signing_key_hex: Some("nothex".into()),
            ..AppConfig::default()
        };
        assert!(matches!(
            load_or_generate_signing_key(&config),
            Err(BootstrapError::Key(_))
        ));
    }

    #[test]
    fn bootstrap_with_empty_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let state = AppState::bootstrap(&config).unwrap();
        assert!(state.catalog.airlines.records().is_empty());
        assert!(state.metrics.is_none());
    }

    #[test]
    fn bootstrap_rejects_unrepresentable_lifetime() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            token_ttl_secs: i64::MAX,
            ..AppConfig::default()
        };
        assert!(matches!(
            AppState::bootstrap(&config),
            Err(BootstrapError::Issuer(_))
        ));
    }

    #[test]
    fn bootstrap_reports_missing_policy_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            policy_file: Some(dir.path().join("absent.yaml")),
            ..AppConfig::default()
        };
        assert!(matches!(
            AppState::bootstrap(&config),
            Err(BootstrapError::Policy(PolicyError::Io(_)))
        ));
    }
}
