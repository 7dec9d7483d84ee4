use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by merging defaults, TOML,
    /// environment variables, and JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from("config/Config.toml")
    }

    /// Loads application configuration from a specific TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from(path: &str) -> Result<AppConfig> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("INTEL_"))
            .join(Json::file("config/Config.json"))
            .extract()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_files_fall_back_to_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = ConfigLoader::load_from("does/not/exist.toml").unwrap();
            assert_eq!(config.symbol, "XRPUSDT");
            Ok(())
        });
    }

    #[test]
    fn env_overrides_default_symbol() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("INTEL_SYMBOL", "SOLUSDT");
            let config = ConfigLoader::load_from("does/not/exist.toml").unwrap();
            assert_eq!(config.symbol, "SOLUSDT");
            Ok(())
        });
    }

    #[test]
    fn toml_file_overrides_sections() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "Config.toml",
                r#"
                symbol = "ADAUSDT"

                [worker]
                analytics_interval_secs = 120
                "#,
            )?;
            let config = ConfigLoader::load_from("Config.toml").unwrap();
            assert_eq!(config.symbol, "ADAUSDT");
            assert_eq!(config.worker.analytics_interval_secs, 120);
            // Untouched sections keep their defaults.
            assert_eq!(config.worker.ingest_interval_secs, 300);
            Ok(())
        });
    }
}
