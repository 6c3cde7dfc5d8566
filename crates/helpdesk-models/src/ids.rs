//! Strongly-typed ID newtypes for domain entities.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Strongly-typed ID for Invitation entities.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvitationId(pub Uuid);

impl InvitationId {
    /// Create a new random ID.
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InvitationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InvitationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InvitationId({})", self.0)
    }
}

impl fmt::Display for InvitationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for InvitationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let a = InvitationId::new();
        let b = InvitationId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_display_and_parse() {
        let id = InvitationId::new();
        let parsed: InvitationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!(format!("{:?}", id).starts_with("InvitationId("));
    }

    #[test]
    fn test_id_serializes_as_bare_uuid() {
        let uuid = Uuid::from_u128(7);
        let json = serde_json::to_string(&InvitationId(uuid)).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}
