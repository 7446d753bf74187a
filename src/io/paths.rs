use std::path::PathBuf;

/// Database file name under the home directory
pub const DB_FILE_NAME: &str = ".laneboard.db";
/// Log file name under the home directory
pub const LOG_FILE_NAME: &str = ".laneboard.log";

/// The user's home directory, or the current directory if it cannot be found
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// `~/.laneboard.db`
pub fn default_db_path() -> PathBuf {
    home_dir().join(DB_FILE_NAME)
}

/// `~/.laneboard.log`
pub fn default_log_path() -> PathBuf {
    home_dir().join(LOG_FILE_NAME)
}

/// `$XDG_CONFIG_HOME/laneboard/config.toml` (platform config dir elsewhere)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("laneboard").join("config.toml"))
}
