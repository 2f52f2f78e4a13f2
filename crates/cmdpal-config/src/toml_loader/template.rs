/// Default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# cmdpal configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[palette]
# default_text = ">"         # ">" commands, "#" bookmarks, "?" help, anything else tabs
# command_debounce_ms = 128  # 0-2000
# recent_bookmarks = 100     # 1-1000
# notification_capacity = 16 # 1-256

[bridge]
# max_commands_per_group = 500  # 1-10000

[logging]
# level = "info"             # trace, debug, info, warn, error
"##
    .to_string()
}
