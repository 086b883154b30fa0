use crate::error::{PopLinesError, Result};
use crate::rewriter::WriteStrategy;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub pop: PopConfig,
    pub random: RandomConfig,
    pub write: WriteConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PopConfig {
    /// `false` makes every invocation a peek.
    pub save_changes: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RandomConfig {
    pub keep_ordered: bool,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WriteConfig {
    pub atomic: bool,
}

impl Default for PopConfig {
    fn default() -> Self {
        Self { save_changes: true }
    }
}

impl Default for WriteConfig {
    fn default() -> Self {
        Self { atomic: true }
    }
}

impl Config {
    pub const DEFAULT_PATHS: &'static [&'static str] = &["poplines.toml", ".poplines.toml"];

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(PopLinesError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| PopLinesError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| PopLinesError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                for default_path in Self::DEFAULT_PATHS {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if cli_args.peek {
            self.pop.save_changes = false;
        }

        if cli_args.keep_ordered {
            self.random.keep_ordered = true;
        }

        if let Some(seed) = cli_args.seed {
            self.random.seed = Some(seed);
        }

        if cli_args.in_place {
            self.write.atomic = false;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| PopLinesError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| PopLinesError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn write_strategy(&self) -> WriteStrategy {
        if self.write.atomic {
            WriteStrategy::Atomic
        } else {
            WriteStrategy::InPlace
        }
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        let body = toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new());
        format!(
            "# poplines configuration\n\
             # Set pop.save_changes = false to always peek.\n\
             # Set random.seed to make random pops reproducible.\n\n{}",
            body
        )
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub peek: bool,
    pub keep_ordered: bool,
    pub seed: Option<u64>,
    pub in_place: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_peek(mut self, peek: bool) -> Self {
        self.peek = peek;
        self
    }

    pub fn with_keep_ordered(mut self, keep_ordered: bool) -> Self {
        self.keep_ordered = keep_ordered;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_in_place(mut self, in_place: bool) -> Self {
        self.in_place = in_place;
        self
    }
}
