use std::path::PathBuf;

use cmdpal_common::PlatformError;

pub(super) const APP_NAME: &str = "cmdpal";

/// Platform configuration directory, e.g. `~/.config/cmdpal` on Linux.
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Platform data directory, e.g. `~/.local/share/cmdpal` on Linux.
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Default location of the browser state file read by the desktop host.
pub fn fixture_file() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("browser.json"))
}
