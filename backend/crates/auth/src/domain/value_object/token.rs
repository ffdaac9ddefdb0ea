//! Opaque Tokens
//!
//! Session ids and password reset tokens are random UUIDs. Clients only ever
//! see their string form; anything that does not parse is simply unknown.

use kernel::id::Id;

pub struct SessionMarker;
pub struct ResetTokenMarker;

/// Identifies a logged-in session
pub type SessionId = Id<SessionMarker>;

/// One-time credential authorizing a password change
pub type ResetToken = Id<ResetTokenMarker>;

/// Parse a token received from a client
///
/// Missing, empty and malformed values all yield `None`.
pub fn parse_token<T>(raw: Option<&str>) -> Option<Id<T>> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}
