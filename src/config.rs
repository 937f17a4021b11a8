use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Catalogue file. Relative paths resolve against the config file's directory.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub explain: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            explain: false,
        }
    }
}

fn default_limit() -> usize {
    20
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7341".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.catalog.path.as_os_str().is_empty() {
        anyhow::bail!("catalog.path must not be empty");
    }

    if config.search.limit < 1 {
        anyhow::bail!("search.limit must be >= 1");
    }

    if config.catalog.path.is_relative() {
        if let Some(dir) = path.parent() {
            config.catalog.path = dir.join(&config.catalog.path);
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("irank.toml");
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_defaults() {
        let (_tmp, path) = write_config("[catalog]\npath = \"commands.toml\"\n");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.search.limit, 20);
        assert!(!cfg.search.explain);
        assert_eq!(cfg.server.bind, "127.0.0.1:7341");
        assert_eq!(cfg.log.level, "info");
    }

    #[test]
    fn test_relative_catalog_path_resolves_against_config_dir() {
        let (tmp, path) = write_config("[catalog]\npath = \"commands.toml\"\n");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.catalog.path, tmp.path().join("commands.toml"));
    }

    #[test]
    fn test_absolute_catalog_path_kept() {
        let (_tmp, path) = write_config("[catalog]\npath = \"/etc/irank/commands.toml\"\n");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.catalog.path, PathBuf::from("/etc/irank/commands.toml"));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let (_tmp, path) =
            write_config("[catalog]\npath = \"commands.toml\"\n\n[search]\nlimit = 0\n");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("search.limit"));
    }

    #[test]
    fn test_empty_catalog_path_rejected() {
        let (_tmp, path) = write_config("[catalog]\npath = \"\"\n");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/irank.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
