//! Full configuration validation.
//!
//! Each check pushes a message; all violations are reported together in a
//! single `ConfigError::ValidationError`.

mod helpers;


use crate::schema::CmdpalConfig;
use cmdpal_common::ConfigError;

use helpers::validate_range;

const MAX_DEFAULT_TEXT_CHARS: usize = 256;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &CmdpalConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_palette(&mut errors, config);
    validate_bridge(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_palette(errors: &mut Vec<String>, config: &CmdpalConfig) {
    let palette = &config.palette;
    validate_range(
        errors,
        "palette.command_debounce_ms",
        palette.command_debounce_ms,
        0,
        2000,
    );
    validate_range(
        errors,
        "palette.recent_bookmarks",
        u64::from(palette.recent_bookmarks),
        1,
        1000,
    );
    validate_range(
        errors,
        "palette.notification_capacity",
        u64::from(palette.notification_capacity),
        1,
        256,
    );

    let chars = palette.default_text.chars().count();
    if chars > MAX_DEFAULT_TEXT_CHARS {
        errors.push(format!(
            "palette.default_text is {chars} chars, max {MAX_DEFAULT_TEXT_CHARS}"
        ));
    }
}

fn validate_bridge(errors: &mut Vec<String>, config: &CmdpalConfig) {
    validate_range(
        errors,
        "bridge.max_commands_per_group",
        u64::from(config.bridge.max_commands_per_group),
        1,
        10_000,
    );
}
