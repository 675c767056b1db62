//! Settings for the command-line host
//!
//! Resolved in order of precedence:
//! 1. Command-line flags
//! 2. Environment (`CONTRACTS_API_URL`)
//! 3. Config file (`config.toml` in the platform config directory)
//! 4. Built-in defaults

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use contracts_lib::config::API_URL_ENV;
use contracts_lib::config::ClientConfig;
use contracts_lib::config::TableConfig;
use serde::Deserialize;
use serde::Serialize;
use simplelog::LevelFilter;

use crate::cli::Cli;

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub page_size: Option<usize>,
    pub parties_width: Option<usize>,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: Option<String>,
}

impl FileConfig {
    /// Reads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)
                .with_context(|| format!("parsing config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => {
                Err(e).with_context(|| format!("reading config file {}", path.display()))
            }
        }
    }
}

/// Effective settings after all layers are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub client: ClientConfig,
    pub table: TableConfig,
    pub log_level: LevelFilter,
}

/// Overrides taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub verbose: bool,
}

impl From<&Cli> for Overrides {
    fn from(cli: &Cli) -> Self {
        Self {
            api_url: cli.api_url.clone(),
            verbose: cli.verbose,
        }
    }
}

impl Settings {
    /// Loads the config file (the given path or the platform default) and
    /// applies the environment and `overrides` on top.
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> anyhow::Result<Self> {
        let file = match path.map(Path::to_path_buf).or_else(crate::paths::config_file) {
            Some(path) => FileConfig::load(&path)?,
            None => FileConfig::default(),
        };
        let env_url = std::env::var(API_URL_ENV).ok();
        Self::resolve(file, env_url, overrides)
    }

    pub fn resolve(
        file: FileConfig,
        env_url: Option<String>,
        overrides: &Overrides,
    ) -> anyhow::Result<Self> {
        let mut client = ClientConfig::default();
        let base_url = overrides
            .api_url
            .clone()
            .or(env_url.filter(|url| !url.trim().is_empty()))
            .or(file.api_url);
        if let Some(url) = base_url {
            client = client.with_base_url(url.trim());
        }
        if let Some(secs) = file.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = file.connect_timeout_secs {
            client = client.with_connect_timeout(Duration::from_secs(secs));
        }

        let mut table = TableConfig::default();
        if let Some(size) = file.page_size {
            table = table.with_page_size(size);
        }
        if let Some(width) = file.parties_width {
            table = table.with_parties_width(width);
        }

        let log_level = if overrides.verbose {
            LevelFilter::Debug
        } else {
            match file.log_level {
                Some(level) => level
                    .parse()
                    .map_err(|_| anyhow::anyhow!("invalid log_level '{level}' in config"))?,
                None => LevelFilter::Info,
            }
        };

        Ok(Self {
            client,
            table,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_env_beats_file() {
        let file = FileConfig {
            api_url: Some("http://file:1".into()),
            ..FileConfig::default()
        };
        let env = Some("http://env:2".to_string());

        let settings = Settings::resolve(file.clone(), env.clone(), &Overrides::default()).unwrap();
        assert_eq!(settings.client.base_url, "http://env:2");

        let settings = Settings::resolve(file.clone(), None, &Overrides::default()).unwrap();
        assert_eq!(settings.client.base_url, "http://file:1");

        let flags = Overrides {
            api_url: Some("http://flag:3".into()),
            verbose: true,
        };
        let settings = Settings::resolve(file, env, &flags).unwrap();
        assert_eq!(settings.client.base_url, "http://flag:3");
        assert_eq!(settings.log_level, LevelFilter::Debug);
    }

    #[test]
    fn reads_toml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            concat!(
                "api_url = \"https://contracts.example.com\"\n",
                "timeout_secs = 5\n",
                "page_size = 25\n",
                "log_level = \"warn\"\n",
            ),
        )
        .unwrap();

        let settings =
            Settings::resolve(FileConfig::load(&path).unwrap(), None, &Overrides::default())
                .unwrap();
        assert_eq!(settings.client.timeout, Duration::from_secs(5));
        assert_eq!(settings.table.page_size, 25);
        assert_eq!(settings.log_level, LevelFilter::Warn);
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = FileConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(file, FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_uri = \"typo\"\n").unwrap();
        assert!(FileConfig::load(&path).is_err());
    }
}
