//! Configuration
//!
//! Shell settings loaded from an optional `config.toml` with `MEMSHELL_*`
//! environment overrides. Every field has a default, so the shell starts
//! with nothing configured at all.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Shell configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ShellConfig {
    /// Number of concurrent worker streams.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Path of the persisted file system image.
    #[serde(default = "default_image_path")]
    pub image_path: String,

    /// Directory holding the per-worker command stream files.
    #[serde(default = "default_stream_dir")]
    pub stream_dir: String,

    /// Input stream filename pattern; `{id}` is replaced per worker.
    #[serde(default = "default_input_template")]
    pub input_template: String,

    /// Output filename pattern; `{id}` is replaced per worker.
    #[serde(default = "default_output_template")]
    pub output_template: String,

    /// Maximum accepted command line length in bytes.
    #[serde(default = "default_max_command_length")]
    pub max_command_length: usize,
}

fn default_workers() -> usize {
    4
}

fn default_image_path() -> String {
    "memshell.img".to_string()
}

fn default_stream_dir() -> String {
    ".".to_string()
}

fn default_input_template() -> String {
    "input_worker{id}.txt".to_string()
}

fn default_output_template() -> String {
    "output_worker{id}.txt".to_string()
}

fn default_max_command_length() -> usize {
    512
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            image_path: default_image_path(),
            stream_dir: default_stream_dir(),
            input_template: default_input_template(),
            output_template: default_output_template(),
            max_command_length: default_max_command_length(),
        }
    }
}

impl ShellConfig {
    /// Load configuration from config.toml (optional) with environment
    /// overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("MEMSHELL"))
            .build()?;

        let config: ShellConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values.
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.workers == 0 {
            return Err(config::ConfigError::Message(
                "workers must be greater than 0".into(),
            ));
        }

        if self.image_path.is_empty() {
            return Err(config::ConfigError::Message(
                "image_path cannot be empty".into(),
            ));
        }

        if !self.input_template.contains("{id}") || !self.output_template.contains("{id}") {
            return Err(config::ConfigError::Message(
                "stream templates must contain {id}".into(),
            ));
        }

        if self.max_command_length == 0 {
            return Err(config::ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Path of the persisted image file.
    pub fn image_file(&self) -> PathBuf {
        PathBuf::from(&self.image_path)
    }

    /// Input stream path for one worker.
    pub fn input_path(&self, id: usize) -> PathBuf {
        PathBuf::from(&self.stream_dir).join(self.input_template.replace("{id}", &id.to_string()))
    }

    /// Output path for one worker.
    pub fn output_path(&self, id: usize) -> PathBuf {
        PathBuf::from(&self.stream_dir).join(self.output_template.replace("{id}", &id.to_string()))
    }
}
