//! Handles settings for the application. Values are layered: built-in
//! defaults, then an optional TOML file (`config/splitter.toml` unless
//! `--config` says otherwise), then `SPLITTER_*` environment variables, then
//! command line overrides.
use engine::Currency;
use serde::Deserialize;

use crate::{cli::Cli, error::Result};

const DEFAULT_CONFIG_PATH: &str = "config/splitter";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Currency code of the ledger.
    pub currency: String,
    /// Log level applied to the application and the engine.
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: Currency::default().code().to_string(),
            level: "warn".to_string(),
        }
    }
}

impl Settings {
    pub fn load(cli: &Cli) -> Result<Self> {
        Self::load_with_env(cli, None)
    }

    /// Like [`Settings::load`], reading `SPLITTER_*` variables from `env`
    /// instead of the process environment when given.
    fn load_with_env(cli: &Cli, env: Option<config::Map<String, String>>) -> Result<Self> {
        let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(cli.config.is_some()))
            .add_source(config::Environment::with_prefix("SPLITTER").source(env))
            .build()?;
        let mut settings: Settings = settings.try_deserialize()?;
        settings.apply_overrides(cli);
        Ok(settings)
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(currency) = &cli.currency {
            self.currency = currency.clone();
        }
        if let Some(level) = &cli.log_level {
            self.level = level.clone();
        }
    }

    pub fn currency(&self) -> Result<Currency> {
        Ok(Currency::try_from(self.currency.as_str())?)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn cli_overrides_defaults() {
        let cli = Cli::try_parse_from([
            "splitter",
            "--currency",
            "usd",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let mut settings = Settings::default();
        settings.apply_overrides(&cli);
        assert_eq!(settings.currency().unwrap(), Currency::Usd);
        assert_eq!(settings.level, "debug");
    }

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "splitter-{name}-{pid}.toml",
            pid = std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn cli_with_config(path: &std::path::Path, extra: &[&str]) -> Cli {
        let path = path.display().to_string();
        let mut args = vec!["splitter", "--config", path.as_str()];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn reads_values_from_toml_file() {
        let path = write_config("file", "currency = \"eur\"\nlevel = \"info\"\n");
        let settings =
            Settings::load_with_env(&cli_with_config(&path, &[]), Some(config::Map::new()))
                .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.currency().unwrap(), Currency::Eur);
        assert_eq!(settings.level, "info");
    }

    #[test]
    fn environment_overrides_file_and_cli_overrides_environment() {
        let path = write_config("layers", "currency = \"eur\"\nlevel = \"info\"\n");
        let env = config::Map::from([
            ("SPLITTER_CURRENCY".to_string(), "usd".to_string()),
            ("SPLITTER_LEVEL".to_string(), "debug".to_string()),
        ]);

        let from_env =
            Settings::load_with_env(&cli_with_config(&path, &[]), Some(env.clone())).unwrap();
        let from_cli = Settings::load_with_env(
            &cli_with_config(&path, &["--log-level", "trace"]),
            Some(env),
        )
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(from_env.currency().unwrap(), Currency::Usd);
        assert_eq!(from_env.level, "debug");
        assert_eq!(from_cli.currency().unwrap(), Currency::Usd);
        assert_eq!(from_cli.level, "trace");
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["splitter", "--config", "/nonexistent/splitter.toml"])
            .unwrap();
        assert!(Settings::load(&cli).is_err());
    }

    #[test]
    fn defaults_use_rupees() {
        assert_eq!(Settings::default().currency().unwrap(), Currency::Inr);
    }
}
