use serde::{Deserialize, Serialize};

/// Page registration bridge limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Commands kept from a single `register` message (1-10000).
    pub max_commands_per_group: u32,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            max_commands_per_group: 500,
        }
    }
}
