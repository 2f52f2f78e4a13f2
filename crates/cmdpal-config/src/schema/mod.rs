//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod bridge;
mod logging;
mod palette;

pub use bridge::*;
pub use logging::*;
pub use palette::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CmdpalConfig {
    pub palette: PaletteConfig,
    pub bridge: BridgeConfig,
    pub logging: LoggingConfig,
}
