//! Vendor command tracking.

use serde::{Deserialize, Serialize};

// ============================================================================
// Command State
// ============================================================================

/// Execution state of a tracked vendor command, serialized as the vendor's
/// numeric code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CommandState {
    /// Queued, not yet executed.
    #[default]
    NotExecuted,
    /// Delivered to the device.
    Executed,
    /// Completed successfully.
    Success,
    /// Completed with an error.
    Failed,
    /// Superseded at checkout.
    CheckOut,
    /// Never sent.
    NotSent,
    /// Partially executed.
    NotFullyExecuted,
    /// Given up on.
    Abandoned,
}

impl CommandState {
    /// Returns the vendor numeric code.
    pub fn code(&self) -> u8 {
        match self {
            Self::NotExecuted => 0,
            Self::Executed => 1,
            Self::Success => 2,
            Self::Failed => 3,
            Self::CheckOut => 4,
            Self::NotSent => 5,
            Self::NotFullyExecuted => 6,
            Self::Abandoned => 7,
        }
    }
}

impl From<CommandState> for u8 {
    fn from(state: CommandState) -> Self {
        state.code()
    }
}

impl TryFrom<u8> for CommandState {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::NotExecuted),
            1 => Ok(Self::Executed),
            2 => Ok(Self::Success),
            3 => Ok(Self::Failed),
            4 => Ok(Self::CheckOut),
            5 => Ok(Self::NotSent),
            6 => Ok(Self::NotFullyExecuted),
            7 => Ok(Self::Abandoned),
            other => Err(format!("unknown command state code: {other}")),
        }
    }
}

// ============================================================================
// Vendor Command
// ============================================================================

/// A tracked remote-management command, as vendors with a command log
/// report it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorCommand {
    /// Vendor command id.
    #[serde(default)]
    pub id: i64,
    /// Target device id.
    #[serde(default)]
    pub device_id: i64,
    /// Wire command name (e.g. `EnableLostMode`).
    #[serde(default)]
    pub command: String,
    /// Target device UDID.
    #[serde(default)]
    pub udid: String,
    /// Execution state.
    #[serde(default)]
    pub do_it: CommandState,
    /// Human-readable command name.
    #[serde(default)]
    pub command_name: String,
    /// Issued timestamp.
    #[serde(default)]
    pub create_time: String,
    /// Last update timestamp.
    #[serde(default)]
    pub modify_time: String,
}

impl VendorCommand {
    /// The placeholder record for a command the vendor no longer reports.
    pub fn abandoned(id: i64) -> Self {
        Self {
            id,
            do_it: CommandState::Abandoned,
            ..Self::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_state_codes_roundtrip() {
        for code in 0..=7u8 {
            let state = CommandState::try_from(code).unwrap();
            assert_eq!(state.code(), code);
        }
        assert!(CommandState::try_from(8).is_err());
    }

    #[test]
    fn test_command_state_serde_numeric() {
        assert_eq!(
            serde_json::to_string(&CommandState::Abandoned).unwrap(),
            "7"
        );
        let parsed: CommandState = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, CommandState::Success);
    }

    #[test]
    fn test_vendor_command_parses_camel_case() {
        let json = r#"{
            "id": 55,
            "deviceId": 9,
            "command": "EnableLostMode",
            "doIt": 1,
            "commandName": "Lost mode"
        }"#;
        let command: VendorCommand = serde_json::from_str(json).unwrap();
        assert_eq!(command.id, 55);
        assert_eq!(command.device_id, 9);
        assert_eq!(command.do_it, CommandState::Executed);
        assert!(command.udid.is_empty());
    }

    #[test]
    fn test_abandoned_placeholder() {
        let command = VendorCommand::abandoned(42);
        assert_eq!(command.id, 42);
        assert_eq!(command.do_it, CommandState::Abandoned);
        assert!(command.command.is_empty());
    }
}
