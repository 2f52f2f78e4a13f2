//! Command palette engine.
//!
//! Ranks a mode-specific candidate set against the query text on every
//! keystroke and keeps the highlighted command stable across re-ranks:
//!
//! - [`CommandRegistry`]: group-partitioned page and built-in commands
//! - [`matcher`]: fuzzy filter over command titles
//! - [`reconcile`]: selection continuity between successive rankings
//! - [`Mode`] / [`ModeTable`]: sigil dispatch (`>`, `?`, `#`, tabs)
//! - [`PaletteSession`]: per-event orchestration and commit handling

mod command;
mod help;
pub mod matcher;
mod mode;
pub mod reconcile;
mod registry;
mod session;
mod view;

pub use command::{Command, TriggerFuture, TriggerOutcome, BUILTIN_GROUP, TABS_GROUP};
pub use help::help_commands;
pub use matcher::{filter, fuzzy_match, FuzzyMatch};
pub use mode::{CandidateSource, EmptyTermPolicy, Mode, ModeSpec, ModeTable};
pub use reconcile::{reconcile, RankedResult};
pub use registry::CommandRegistry;
pub use session::{CommitOutcome, PaletteSession, SessionRequest};
pub use view::{PaletteView, PaletteViewItem};
