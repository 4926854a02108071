//! Configuration for Kaze
//!
//! Precedence: CLI > env > file > defaults. The file is TOML, looked up at
//! `--config FILE` or `<config dir>/kaze/config.toml`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::term::ReadPolicy;

/// CLI arguments for Kaze
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "kaze")]
#[command(version)]
#[command(about = "Raw-mode key inspector for the kaze editor", long_about = None)]
pub struct CliArgs {
    /// Path to custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Letter whose Ctrl combination quits (default: q)
    #[arg(long, value_name = "LETTER")]
    pub quit_key: Option<char>,

    /// Return from reads after this many tenths of a second without input
    #[arg(long, value_name = "TENTHS")]
    pub read_timeout: Option<u8>,

    /// Do not clear the screen on startup
    #[arg(long)]
    pub no_clear: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub log: LogConfig,
}

/// Keyboard input settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Ctrl + this letter quits
    pub quit_key: char,
    /// Read timeout in tenths of a second; absent means reads block
    pub read_timeout: Option<u8>,
    /// Clear the screen before reading keys
    pub clear_screen: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            quit_key: 'q',
            read_timeout: None,
            clear_screen: true,
        }
    }
}

impl InputConfig {
    pub fn read_policy(&self) -> ReadPolicy {
        match self.read_timeout {
            Some(tenths) => ReadPolicy::Timeout { tenths },
            None => ReadPolicy::Blocking,
        }
    }

    /// Quit letter as a byte; valid once the config has been validated
    pub fn quit_letter(&self) -> u8 {
        u8::try_from(self.quit_key).unwrap_or(b'q')
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter when RUST_LOG is unset
    pub level: String,
    /// Log file; stderr when absent
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Whether log lines already reach the user's terminal
    pub fn logs_to_stderr(&self) -> bool {
        self.file.is_none()
    }

    /// Filter directive after applying `-v` flags
    pub fn filter(&self, verbose: u8) -> &str {
        match verbose {
            0 => &self.level,
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Configuration error
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub message: String,
    pub field: Option<String>,
}

impl ConfigError {
    fn field(field: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "Config error in '{}': {}", field, self.message)
        } else {
            write!(f, "Config error: {}", self.message)
        }
    }
}

impl std::error::Error for ConfigError {}

/// Result of `Config::load_with_args`
///
/// A config file that exists but cannot be read or parsed does not stop
/// startup; the failure is kept here so it can be logged once logging is up.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub file_error: Option<ConfigError>,
}

impl Config {
    /// Load configuration with full precedence:
    /// CLI args > environment variables > config file > defaults
    pub fn load_with_args(args: &CliArgs) -> Result<LoadedConfig, ConfigError> {
        let mut config = Config::default();
        let mut file_error = None;

        let config_path = args.config.clone().or_else(Self::default_config_path);
        if let Some(path) = &config_path {
            if path.exists() {
                match Self::load_from_file(path) {
                    Ok(file_config) => config = file_config,
                    Err(e) => {
                        file_error = Some(ConfigError {
                            message: format!("{} ({}), using defaults", e.message, path.display()),
                            field: None,
                        });
                    }
                }
            } else if args.config.is_some() {
                file_error = Some(ConfigError {
                    message: format!("Config file {} not found, using defaults", path.display()),
                    field: None,
                });
            }
        }

        config.apply_env_vars();
        config.apply_cli_args(args);
        config.validate()?;

        Ok(LoadedConfig { config, file_error })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            message: format!("Failed to read config file: {}", e),
            field: None,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError {
            message: format!("Failed to parse config file: {}", e),
            field: None,
        })
    }

    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kaze").join("config.toml"))
    }

    fn apply_env_vars(&mut self) {
        if let Ok(val) = env::var("KAZE_QUIT_KEY") {
            if let Some(c) = single_char(&val) {
                self.input.quit_key = c;
            }
        }
        if let Ok(val) = env::var("KAZE_READ_TIMEOUT") {
            if let Ok(tenths) = val.parse() {
                self.input.read_timeout = Some(tenths);
            }
        }
        if let Ok(val) = env::var("KAZE_LOG_FILE") {
            self.log.file = Some(PathBuf::from(val));
        }
    }

    fn apply_cli_args(&mut self, args: &CliArgs) {
        if let Some(c) = args.quit_key {
            self.input.quit_key = c;
        }
        if let Some(tenths) = args.read_timeout {
            self.input.read_timeout = Some(tenths);
        }
        if args.no_clear {
            self.input.clear_screen = false;
        }
        if let Some(path) = &args.log_file {
            self.log.file = Some(path.clone());
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.input.quit_key.is_ascii_alphabetic() {
            return Err(ConfigError::field(
                "input.quit_key",
                format!("'{}' is not an ASCII letter", self.input.quit_key),
            ));
        }
        if self.input.read_timeout == Some(0) {
            return Err(ConfigError::field(
                "input.read_timeout",
                "Read timeout must be between 1 and 255 tenths of a second",
            ));
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::field("log.level", "Log level must not be empty"));
        }
        Ok(())
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
