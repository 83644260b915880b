//! Group Management Types

use serde::Deserialize;

/// Group management actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupAction {
    Create,
    AddParticipants,
    RemoveParticipants,
}

impl GroupAction {
    /// Parse from the wire form (e.g., `"add_participants"`).
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "create" => Some(Self::Create),
            "add_participants" => Some(Self::AddParticipants),
            "remove_participants" => Some(Self::RemoveParticipants),
            _ => None,
        }
    }

    /// Convert to the wire form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::AddParticipants => "add_participants",
            Self::RemoveParticipants => "remove_participants",
        }
    }

    /// Message reported in the success envelope.
    pub const fn success_message(&self) -> &'static str {
        match self {
            Self::Create => "Group created successfully",
            Self::AddParticipants => "Participants added successfully",
            Self::RemoveParticipants => "Participants removed successfully",
        }
    }
}

impl std::fmt::Display for GroupAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/groups`.
#[derive(Debug, Deserialize)]
pub struct GroupRequest {
    pub action: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default, rename = "groupId")]
    pub group_id: Option<String>,
}
