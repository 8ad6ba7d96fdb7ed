use serde::{Deserialize, Serialize};

/// Payload announced over the network sink once the node is up.
pub const STARTUP_PAYLOAD: &str = "Game started";

/// Snapshot of the three radio flag lines, sampled at trigger time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagLines {
    pub flag_1: bool,
    pub flag_2: bool,
    pub flag_3: bool,
}

impl FlagLines {
    pub fn new(flag_1: bool, flag_2: bool, flag_3: bool) -> Self {
        Self {
            flag_1,
            flag_2,
            flag_3,
        }
    }

    /// All lines low: no signal was present at trigger time.
    pub fn is_clear(&self) -> bool {
        !self.flag_1 && !self.flag_2 && !self.flag_3
    }
}

/// Event kinds decoded from the flag lines.
///
/// Patterns with `flag_1` high alongside another line (`101`, `110`,
/// `111`) are not part of the protocol and fall through silently, same
/// as the original firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationEvent {
    GameModification,
    Hit,
    Heartbeat,
    PlayerStatus,
}

impl NotificationEvent {
    /// Decode a flag sample. `None` both for the all-clear pattern and
    /// for the unspecified combinations.
    pub fn classify(flags: FlagLines) -> Option<Self> {
        match (flags.flag_1, flags.flag_2, flags.flag_3) {
            (true, false, false) => Some(Self::GameModification),
            (false, false, true) => Some(Self::Hit),
            (false, true, false) => Some(Self::Heartbeat),
            (false, true, true) => Some(Self::PlayerStatus),
            _ => None,
        }
    }

    /// Fixed wire payload, byte-for-byte compatible with the original
    /// firmware (including the missing space in the heartbeat message).
    pub fn payload(&self) -> &'static str {
        match self {
            Self::GameModification => "B3.1 - Game Mod.",
            Self::Hit => "B3.1 - HIT",
            Self::Heartbeat => "B3.1- HEARTBEAT",
            Self::PlayerStatus => "B3.1 - PLAYERSTATUS",
        }
    }

    /// Human-readable name for the local log.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::GameModification => "Game Modification",
            Self::Hit => "HIT",
            Self::Heartbeat => "HEARTBEAT",
            Self::PlayerStatus => "PLAYERSTATUS",
        }
    }
}

impl std::fmt::Display for NotificationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}
