//! Configuration loading for the CLI.
//!
//! Lookup order: `--config <PATH>`, then `<config dir>/reseller/config.json`
//! if it exists, then an empty record. `RESELLER_*` environment variables
//! override file values.

use std::path::{Path, PathBuf};

use anyhow::Context;
use reseller_api::ClientConfig;

/// Environment variable names and the field each one sets.
const ENV_PARTNER_ID: &str = "RESELLER_PARTNER_ID";
const ENV_PROFILE_KEY: &str = "RESELLER_PROFILE_KEY";
const ENV_SECRET: &str = "RESELLER_SECRET";
const ENV_BASE_URL: &str = "RESELLER_BASE_URL";

/// Default config file location.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reseller")
        .join("config.json")
}

/// Loads the effective configuration.
pub async fn load(explicit: Option<&Path>) -> anyhow::Result<ClientConfig> {
    let from_file = match explicit {
        Some(path) => read_file(path).await?,
        None => {
            let path = default_path();
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                read_file(&path).await?
            } else {
                tracing::debug!(?path, "No config file, using environment only");
                ClientConfig::default()
            }
        }
    };

    Ok(apply_env(from_file, |key| std::env::var(key).ok()))
}

async fn read_file(path: &Path) -> anyhow::Result<ClientConfig> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading config file {}", path.display()))?;
    let config = serde_json::from_str(&contents)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    tracing::debug!(?path, "Loaded config file");
    Ok(config)
}

/// Overrides fields with non-empty environment values.
pub fn apply_env(config: ClientConfig, lookup: impl Fn(&str) -> Option<String>) -> ClientConfig {
    let var = |key| lookup(key).filter(|v: &String| !v.is_empty());

    ClientConfig {
        partner_id: var(ENV_PARTNER_ID),
        profile_key: var(ENV_PROFILE_KEY),
        secret: var(ENV_SECRET),
        base_url: var(ENV_BASE_URL),
        timeout_secs: None,
    }
    .or(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"partnerId":"p","profileKey":"k","secret":"s","timeout_secs":3}"#,
        )
        .unwrap();

        let config = read_file(&path).await.unwrap();
        assert_eq!(config.partner_id.as_deref(), Some("p"));
        assert_eq!(config.timeout_secs, Some(3));
    }

    #[tokio::test]
    async fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("nope.json"))).await.unwrap_err();
        assert!(err.to_string().contains("reading config file"));
    }

    #[test]
    fn test_env_overrides_file() {
        let env: HashMap<&str, &str> = [(ENV_SECRET, "from-env"), (ENV_PARTNER_ID, "")]
            .into_iter()
            .collect();

        let config = apply_env(ClientConfig::new("p", "k", "s"), |key| {
            env.get(key).map(ToString::to_string)
        });

        assert_eq!(config.secret.as_deref(), Some("from-env"));
        // Empty variables do not clear file values.
        assert_eq!(config.partner_id.as_deref(), Some("p"));
        assert_eq!(config.profile_key.as_deref(), Some("k"));
    }
}
