//! Checks applied to everything a page sends before it reaches the
//! registry.

use std::collections::HashSet;

use cmdpal_common::BridgeError;
use tracing::warn;

use crate::message::{PageEvent, RegisterPayload};

// =============================================================================
// INBOUND ALLOWLIST
// =============================================================================

/// Event kinds a page may send. `open` and `execute` only flow towards the
/// page.
const ALLOWED_INBOUND_KINDS: &[&str] = &["register"];

pub fn is_inbound_kind_allowed(kind: &str) -> bool {
    ALLOWED_INBOUND_KINDS.contains(&kind)
}

/// Extract the registration from an inbound event, rejecting events that
/// carry anything else.
pub fn inbound_registration(event: PageEvent) -> Result<RegisterPayload, BridgeError> {
    let kinds = event.kinds();
    if let Some(kind) = kinds.iter().find(|kind| !is_inbound_kind_allowed(kind)) {
        return Err(BridgeError::Rejected(format!(
            "`{kind}` may not be sent by a page"
        )));
    }
    event
        .register
        .ok_or_else(|| BridgeError::Rejected("event carries no payload".into()))
}

// =============================================================================
// REGISTRATION
// =============================================================================

/// Normalise a registration.
///
/// An empty group rejects the whole message. Commands with an empty id are
/// dropped, the first of several commands sharing an id wins, and at most
/// `max_commands` commands are kept.
pub fn sanitize_registration(
    mut payload: RegisterPayload,
    max_commands: usize,
) -> Result<RegisterPayload, BridgeError> {
    if payload.group.trim().is_empty() {
        return Err(BridgeError::Rejected("registration has an empty group".into()));
    }

    let received = payload.commands.len();
    let mut seen = HashSet::new();
    payload
        .commands
        .retain(|command| !command.id.is_empty() && seen.insert(command.id.clone()));
    let dropped = received - payload.commands.len();
    if dropped > 0 {
        warn!(
            group = %payload.group,
            dropped,
            "registration contained commands with empty or duplicate ids"
        );
    }

    if payload.commands.len() > max_commands {
        warn!(
            group = %payload.group,
            count = payload.commands.len(),
            max_commands,
            "registration truncated"
        );
        payload.commands.truncate(max_commands);
    }

    Ok(payload)
}
