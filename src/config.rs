use std::env;
use std::path::PathBuf;

use crate::{
    error::{AppError, Result},
    models::VoteMode,
};

/// Tags a question may carry; `STACKIT_MAX_TAGS` can lower it but not raise it.
pub const DEFAULT_MAX_TAGS: usize = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub vote_mode: VoteMode,
    pub seed_file: Option<PathBuf>,
    pub max_tags: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "StackIt".to_string(),
            vote_mode: VoteMode::Strict,
            seed_file: None,
            max_tags: DEFAULT_MAX_TAGS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vote_mode = match lookup("STACKIT_VOTE_MODE") {
            Some(raw) => raw
                .parse()
                .map_err(|e: String| AppError::Config(format!("STACKIT_VOTE_MODE: {}", e)))?,
            None => VoteMode::Strict,
        };

        let max_tags = match lookup("STACKIT_MAX_TAGS") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=DEFAULT_MAX_TAGS).contains(n))
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "STACKIT_MAX_TAGS must be between 1 and {}, got {}",
                        DEFAULT_MAX_TAGS, raw
                    ))
                })?,
            None => DEFAULT_MAX_TAGS,
        };

        Ok(Self {
            app_name: lookup("APP_NAME").unwrap_or_else(|| "StackIt".to_string()),
            vote_mode,
            seed_file: lookup("STACKIT_SEED_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            max_tags,
        })
    }
}
