pub mod errors;
pub mod id;
pub mod notifications;
pub mod types;

pub use errors::{BridgeError, CmdpalError, ConfigError, PlatformError, TriggerError};
pub use id::{new_correlation_id, new_id, SessionId};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use types::{Bookmark, InputBoxOptions, Tab, TabId};

pub type Result<T> = std::result::Result<T, CmdpalError>;
