//! Runtime configuration, supplied by the host as JSON.
//!
//! ```json
//! { "log_level": "debug", "log_tag": "ffi_example", "transform": { "factor": 2.0 } }
//! ```
//!
//! Every field is optional. A host installs one config per process with
//! [`install`]; the C ABI and JNI bridges read the installed transform.

use std::str::FromStr;
use std::sync::OnceLock;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::transform::{Transform, DEFAULT_FACTOR};

/// Longest tag logcat accepts on older Android releases.
pub const MAX_LOG_TAG_LEN: usize = 23;

static INSTALLED: OnceLock<Config> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Logcat tag on Android.
    pub log_tag: String,
    pub transform: TransformConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub factor: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_tag: "ffi_example".to_string(),
            transform: TransformConfig::default(),
        }
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            factor: DEFAULT_FACTOR,
        }
    }
}

impl Config {
    /// Parse and validate a JSON config.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Config = serde_json::from_str(s)
            .map_err(|e| Error::InvalidConfig(format!("malformed config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.level_filter()?;
        self.transform()?;
        if self.log_tag.is_empty() || self.log_tag.len() > MAX_LOG_TAG_LEN {
            return Err(Error::InvalidConfig(format!(
                "log tag must be 1..={MAX_LOG_TAG_LEN} bytes, got {}",
                self.log_tag.len()
            )));
        }
        if self.log_tag.contains('\0') {
            return Err(Error::InvalidConfig("log tag contains NUL".into()));
        }
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| Error::InvalidConfig(format!("unknown log level {:?}", self.log_level)))
    }

    /// The configured element-wise mapping.
    pub fn transform(&self) -> Result<Transform> {
        Transform::new(self.transform.factor)
    }
}

/// Install `cfg` as the process-wide config and start logging.
///
/// The first call wins. A later call with an identical config is a no-op;
/// one that differs fails with [`Error::AlreadyInitialized`] and changes
/// nothing.
pub fn install(cfg: Config) -> Result<&'static Config> {
    cfg.validate()?;
    let mut fresh = false;
    let active = INSTALLED.get_or_init(|| {
        fresh = true;
        cfg.clone()
    });
    if fresh {
        crate::logging::init(active)?;
    } else if *active != cfg {
        log::warn!("config install rejected: a different config is already active");
        return Err(Error::AlreadyInitialized);
    }
    Ok(active)
}

/// The installed config, if any.
pub fn installed() -> Option<&'static Config> {
    INSTALLED.get()
}

/// Transform of the installed config, or the default before [`install`].
pub fn installed_transform() -> Transform {
    installed()
        .and_then(|cfg| cfg.transform().ok())
        .unwrap_or_default()
}
