//! Everything that produces palette candidates outside the engine itself:
//! the page registration bridge, the built-in commands and the tab and
//! bookmark sources.
//!
//! The page bridge is two one-way channels. Pages send `register`
//! messages in, which [`PageBridge::accept`] turns into a registry group;
//! page commands send `execute` messages out through an
//! [`OutboundMessage`] channel.

pub mod bridge;
pub mod builtin;
pub mod context;
pub mod message;
pub mod sources;
pub mod validation;

pub use bridge::{PageBridge, Registration};
pub use builtin::{builtin_commands, wolfram_alpha_url};
pub use context::PageContexts;
pub use message::{
    ExecutePayload, InboundMessage, OpenPayload, OutboundMessage, PageCommandSpec, PageEvent,
    RegisterPayload,
};
pub use sources::{bookmark_commands, tab_commands, BOOKMARKS_GROUP};
pub use validation::{inbound_registration, is_inbound_kind_allowed, sanitize_registration};
