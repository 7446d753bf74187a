use std::fs;
use std::path::{Path, PathBuf};

use crate::io::paths;
use crate::model::config::Config;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the config for this run.
///
/// An explicit path must exist. The default location is optional: when it is
/// missing (or no config directory exists) the built-in defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    match paths::default_config_path() {
        Some(path) if path.is_file() => read_config(&path),
        _ => Ok(Config::default()),
    }
}

/// `--db` wins over the config file, which wins over `~/.laneboard.db`
pub fn resolve_db_path(cli_db: Option<&Path>, config: &Config) -> PathBuf {
    cli_db
        .map(Path::to_path_buf)
        .or_else(|| config.db.clone())
        .unwrap_or_else(paths::default_db_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_full_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r##"db = "/tmp/tasks.db"

[ui]
show_clock = false

[ui.colors]
highlight = "#112233"

[ui.tag_colors]
bug = "#FF0000"
"##,
        )
        .unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.db, Some(PathBuf::from("/tmp/tasks.db")));
        assert!(!config.ui.show_clock);
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#112233");
        assert_eq!(config.ui.tag_colors.get("bug").unwrap(), "#FF0000");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = read_config(&path).unwrap();
        assert!(config.db.is_none());
        assert!(config.ui.show_clock);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(Some(&tmp.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "db = [").unwrap();
        assert!(matches!(
            read_config(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn db_path_precedence() {
        let mut config = Config::default();
        assert_eq!(resolve_db_path(None, &config), paths::default_db_path());

        config.db = Some(PathBuf::from("/from/config.db"));
        assert_eq!(
            resolve_db_path(None, &config),
            PathBuf::from("/from/config.db")
        );
        assert_eq!(
            resolve_db_path(Some(Path::new("/from/cli.db")), &config),
            PathBuf::from("/from/cli.db")
        );
    }
}
