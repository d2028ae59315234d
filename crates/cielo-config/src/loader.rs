use std::path::Path;

use secrecy::ExposeSecret;

use crate::{ClientConfig, Environment};

impl ClientConfig {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are blank or custom hosts are not
    /// HTTP(S) base URLs
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_merchant()?;
        self.validate_environment()?;
        Ok(())
    }

    fn validate_merchant(&self) -> anyhow::Result<()> {
        if self.merchant.id.expose_secret().trim().is_empty() {
            anyhow::bail!("merchant.id must not be empty");
        }

        if self.merchant.key.expose_secret().trim().is_empty() {
            anyhow::bail!("merchant.key must not be empty");
        }

        Ok(())
    }

    fn validate_environment(&self) -> anyhow::Result<()> {
        let Environment::Custom { api_url, api_query_url } = &self.environment else {
            return Ok(());
        };

        for (name, url) in [("api_url", api_url), ("api_query_url", api_query_url)] {
            if !matches!(url.scheme(), "http" | "https") {
                anyhow::bail!("environment.{name} must use http or https, got '{}'", url.scheme());
            }

            if url.cannot_be_a_base() {
                anyhow::bail!("environment.{name} must be a base URL");
            }
        }

        Ok(())
    }
}
