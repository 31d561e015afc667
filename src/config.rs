use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use toml::Value;
use log::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::logging::{LogConfig, LogFormat};
use crate::publisher::config::PublisherConfig;

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "OBSERVER_REGISTRY_CONFIG";

/// Configuration storage - section_name -> key -> value
pub type Configuration = HashMap<String, HashMap<String, String>>;

/// Configuration manager
pub struct ConfigManager {
    config: Configuration,
    config_file_path: Option<PathBuf>,
    selected_section: Option<String>,
}

impl ConfigManager {
    /// Create a new ConfigManager from a Configuration (primarily for testing)
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config,
            config_file_path: None,
            selected_section: None,
        }
    }

    /// Load configuration using discovery hierarchy
    pub fn load() -> ConfigResult<Self> {
        debug!("Starting configuration discovery");

        for path in discover_config_files() {
            debug!("Attempting to load config from: {}", path.display());
            if path.exists() {
                info!("Loading configuration from: {}", path.display());
                return Self::load_from_file(path);
            }
        }

        info!("No configuration file found, using empty configuration");
        Ok(Self::from_config(Configuration::new()))
    }

    /// Load configuration from explicit file path
    pub fn load_from_file(path: PathBuf) -> ConfigResult<Self> {
        debug!("Loading configuration from file: {}", path.display());

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Unreadable {
            path: path.clone(),
            source,
        })?;
        let config = parse_toml_config(&content)?;

        info!("Successfully loaded configuration from: {}", path.display());
        Ok(Self {
            config,
            config_file_path: Some(path),
            selected_section: None,
        })
    }

    /// Path of the file this configuration was loaded from, if any
    pub fn config_file_path(&self) -> Option<&PathBuf> {
        self.config_file_path.as_ref()
    }

    /// Get value from configuration with section fallback
    pub fn get_value(&self, section: &str, key: &str) -> Option<&String> {
        // Priority: selected_section -> specified section -> base
        if let Some(selected) = &self.selected_section {
            if let Some(value) = self.config.get(selected).and_then(|s| s.get(key)) {
                return Some(value);
            }
        }

        if let Some(value) = self.config.get(section).and_then(|s| s.get(key)) {
            return Some(value);
        }

        self.config.get("base").and_then(|s| s.get(key))
    }

    /// Select a named section that overrides all others
    pub fn select_section(&mut self, section: String) {
        debug!("Selecting configuration section: {}", section);
        self.selected_section = Some(section);
    }

    /// Get boolean value with type conversion
    pub fn get_bool(&self, section: &str, key: &str) -> ConfigResult<Option<bool>> {
        match self.get_value(section, key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(ConfigError::invalid_value(section, key, value.as_str(), "boolean")),
            },
            None => Ok(None),
        }
    }

    /// Get unsigned integer value with type conversion
    pub fn get_usize(&self, section: &str, key: &str) -> ConfigResult<Option<usize>> {
        match self.get_value(section, key) {
            Some(value) => value
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ConfigError::invalid_value(section, key, value.as_str(), "integer")),
            None => Ok(None),
        }
    }

    /// Get log level value with type conversion
    pub fn get_log_level(&self, section: &str, key: &str) -> ConfigResult<Option<log::LevelFilter>> {
        match self.get_value(section, key) {
            Some(value) => crate::logging::parse_log_level(value)
                .map(Some)
                .map_err(|_| ConfigError::invalid_value(section, key, value.as_str(), "log level")),
            None => Ok(None),
        }
    }

    /// Get path value with type conversion
    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_value(section, key).map(PathBuf::from)
    }

    /// Get publisher configuration from the `[publisher]` section
    pub fn get_publisher_config(&self) -> ConfigResult<PublisherConfig> {
        let mut config = PublisherConfig::default();

        if let Some(initial_capacity) = self.get_usize("publisher", "initial-capacity")? {
            config.initial_capacity = initial_capacity;
        }

        if let Some(history_length) = self.get_usize("publisher", "history-length")? {
            config.history_length = history_length;
        }

        config.validate()?;
        Ok(config)
    }

    /// Get logging configuration from the `[logging]` section
    pub fn get_log_config(&self) -> ConfigResult<LogConfig> {
        let mut config = LogConfig::default();

        if let Some(level) = self.get_log_level("logging", "level")? {
            config.level = level;
        }

        if let Some(format) = self.get_value("logging", "format") {
            config.format = format
                .parse::<LogFormat>()
                .map_err(|_| ConfigError::invalid_value("logging", "format", format.as_str(), "log format"))?;
        }

        config.file = self.get_path("logging", "file");

        Ok(config)
    }
}

/// Discover configuration files in order of precedence
fn discover_config_files() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. Environment variable
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        paths.push(PathBuf::from(env_path));
    }

    // 2. XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("observer-registry").join("config.toml"));
    }

    // 3. Home directory
    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".observer-registry.toml"));
    }

    // 4. Project local
    paths.push(PathBuf::from("./.observer-registry.toml"));

    debug!("Config discovery paths: {:?}", paths);
    paths
}

/// Parse TOML content to string-based configuration
fn parse_toml_config(content: &str) -> ConfigResult<Configuration> {
    let table: toml::Table = content.parse()?;

    let mut config = Configuration::new();
    flatten_toml_table(&table, String::new(), &mut config);

    debug!("Parsed configuration: {:?}", config);
    Ok(config)
}

/// Recursively flatten TOML tables into section.subsection format
fn flatten_toml_table(table: &toml::Table, prefix: String, config: &mut Configuration) {
    for (key, value) in table {
        let section_name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Table(subtable) => {
                if subtable.values().all(|v| !matches!(v, Value::Table(_))) {
                    // Leaf table: a configuration section
                    let section_map = subtable
                        .iter()
                        .map(|(subkey, subvalue)| (subkey.clone(), toml_value_to_string(subvalue)))
                        .collect();
                    config.insert(section_name, section_map);
                } else {
                    flatten_toml_table(subtable, section_name, config);
                }
            }
            _ => {
                // Top-level keys land in the base section
                config
                    .entry("base".to_string())
                    .or_default()
                    .insert(section_name, toml_value_to_string(value));
            }
        }
    }
}

/// Convert TOML Value to string representation
fn toml_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Datetime(d) => d.to_string(),
        Value::Array(_) | Value::Table(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_toml_value_to_string_conversion() {
        assert_eq!(toml_value_to_string(&Value::String("test".to_string())), "test");
        assert_eq!(toml_value_to_string(&Value::Integer(42)), "42");
        assert_eq!(toml_value_to_string(&Value::Float(2.5)), "2.5");
        assert_eq!(toml_value_to_string(&Value::Boolean(true)), "true");
    }

    #[test]
    fn test_parse_toml_config() {
        let toml_content = r#"
quiet = true

[publisher]
initial-capacity = 8
history-length = 16

[profiles.sensors]
history-length = 64
"#;

        let config = parse_toml_config(toml_content).unwrap();

        assert_eq!(config.get("base").unwrap().get("quiet").unwrap(), "true");
        assert_eq!(config.get("publisher").unwrap().get("initial-capacity").unwrap(), "8");
        assert_eq!(config.get("publisher").unwrap().get("history-length").unwrap(), "16");
        assert_eq!(config.get("profiles.sensors").unwrap().get("history-length").unwrap(), "64");
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(matches!(parse_toml_config("[publisher"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_manager_section_selection() {
        let mut config = Configuration::new();

        let mut publisher_section = HashMap::new();
        publisher_section.insert("history-length".to_string(), "2".to_string());
        config.insert("publisher".to_string(), publisher_section);

        let mut selected_section = HashMap::new();
        selected_section.insert("history-length".to_string(), "32".to_string());
        config.insert("sensors".to_string(), selected_section);

        let mut manager = ConfigManager::from_config(config);
        assert_eq!(manager.get_publisher_config().unwrap().history_length, 2);

        manager.select_section("sensors".to_string());
        assert_eq!(manager.get_publisher_config().unwrap().history_length, 32);
    }

    #[test]
    fn test_config_manager_type_conversion() {
        let mut config = Configuration::new();

        let mut base_section = HashMap::new();
        base_section.insert("debug".to_string(), "true".to_string());
        base_section.insert("invalid-bool".to_string(), "maybe".to_string());
        base_section.insert("count".to_string(), "12".to_string());
        base_section.insert("invalid-count".to_string(), "-1".to_string());
        base_section.insert("log-level".to_string(), "info".to_string());
        base_section.insert("invalid-level".to_string(), "loud".to_string());
        config.insert("base".to_string(), base_section);

        let manager = ConfigManager::from_config(config);

        assert_eq!(manager.get_bool("base", "debug").unwrap(), Some(true));
        assert!(manager.get_bool("base", "invalid-bool").is_err());
        assert!(manager.get_bool("base", "missing").unwrap().is_none());

        assert_eq!(manager.get_usize("base", "count").unwrap(), Some(12));
        assert!(manager.get_usize("base", "invalid-count").is_err());

        assert_eq!(manager.get_log_level("base", "log-level").unwrap(), Some(log::LevelFilter::Info));
        assert!(manager.get_log_level("base", "invalid-level").is_err());
    }

    #[test]
    fn test_publisher_config_default() {
        let manager = ConfigManager::from_config(Configuration::new());
        assert_eq!(manager.get_publisher_config().unwrap(), PublisherConfig::default());
    }

    #[test]
    fn test_publisher_config_validation() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(&temp_file, "[publisher]\nhistory-length = 0\n").unwrap();

        let manager = ConfigManager::load_from_file(temp_file.path().to_path_buf()).unwrap();
        assert!(matches!(
            manager.get_publisher_config(),
            Err(ConfigError::InvalidHistoryLength(0))
        ));
    }

    #[test]
    fn test_log_config_from_toml() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(
            &temp_file,
            "[logging]\nlevel = \"debug\"\nformat = \"json\"\nfile = \"/tmp/registry.log\"\n",
        )
        .unwrap();

        let manager = ConfigManager::load_from_file(temp_file.path().to_path_buf()).unwrap();
        let log_config = manager.get_log_config().unwrap();

        assert_eq!(log_config.level, log::LevelFilter::Debug);
        assert_eq!(log_config.format, LogFormat::Json);
        assert_eq!(log_config.file, Some(PathBuf::from("/tmp/registry.log")));
        assert_eq!(manager.config_file_path().unwrap(), temp_file.path());
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let result = ConfigManager::load_from_file(PathBuf::from("/nonexistent/observer-registry.toml"));
        assert!(matches!(result, Err(ConfigError::Unreadable { .. })));
    }
}
