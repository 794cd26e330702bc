//! Logger installation.
//!
//! On Android the records go to logcat through `android_logger`. Elsewhere
//! only the `log` max level is set; the host binary installs whatever `log`
//! backend it prefers. Called once per process from [`crate::config::install`].

use crate::config::Config;
use crate::error::Result;

/// Install the platform logger for a validated `cfg`.
pub(crate) fn init(cfg: &Config) -> Result<()> {
    let level = cfg.level_filter()?;
    install(cfg, level);
    Ok(())
}

#[cfg(feature = "android")]
fn install(cfg: &Config, level: log::LevelFilter) {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(level)
            .with_tag(cfg.log_tag.as_str()),
    );
    log::info!("ffi_example {} initialized", crate::VERSION);
}

#[cfg(not(feature = "android"))]
fn install(_cfg: &Config, level: log::LevelFilter) {
    log::set_max_level(level);
    log::debug!("ffi_example {} initialized", crate::VERSION);
}
