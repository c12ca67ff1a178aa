// config.rs

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Plain,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "plain" | "text" => Ok(OutputFormat::Plain),
            other => Err(anyhow!("unknown output format '{}' (expected json or plain)", other)),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplConfig {
    pub history_file: Option<PathBuf>,
    pub format: OutputFormat,
}

impl ReplConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let history_file = lookup("ARGLINE_HISTFILE")
            .or_else(|| lookup("HISTFILE"))
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let format = match lookup("ARGLINE_FORMAT") {
            Some(value) => value.parse()?,
            None => OutputFormat::default(),
        };
        Ok(Self { history_file, format })
    }
}
