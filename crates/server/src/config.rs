use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use deepshield_core::shared::constants::{
    DEFAULT_NUM_FRAMES, DEFAULT_PORT, EMBEDDING_MODEL_URL_ENV, MAX_UPLOAD_BYTES,
};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub media_dir: PathBuf,
    pub num_frames: usize,
    pub max_upload_bytes: u64,
    pub model_path: Option<PathBuf>,
    pub model_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = Self {
            host: try_load(&lookup, "DEEPSHIELD_HOST", "0.0.0.0")?,
            port: try_load(&lookup, "DEEPSHIELD_PORT", &DEFAULT_PORT.to_string())?,
            media_dir: try_load(&lookup, "DEEPSHIELD_MEDIA_DIR", "./media_files")?,
            num_frames: try_load(
                &lookup,
                "DEEPSHIELD_NUM_FRAMES",
                &DEFAULT_NUM_FRAMES.to_string(),
            )?,
            max_upload_bytes: try_load(
                &lookup,
                "DEEPSHIELD_MAX_UPLOAD_BYTES",
                &MAX_UPLOAD_BYTES.to_string(),
            )?,
            model_path: lookup("DEEPSHIELD_MODEL_PATH").map(PathBuf::from),
            model_url: lookup(EMBEDDING_MODEL_URL_ENV),
        };

        if config.num_frames == 0 {
            return Err(ConfigError {
                key: "DEEPSHIELD_NUM_FRAMES".to_string(),
                value: "0".to_string(),
                reason: "at least one frame must be sampled".to_string(),
            });
        }
        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError {
            key: key.to_string(),
            value: value.clone(),
            reason: e.to_string(),
        }
    })
}
