use serde::{Deserialize, Serialize};

/// How a replacement part relates to the original
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplaceType {
    /// Same footprint and pinout, drop-in replacement
    PinToPin,
    /// Same function, board changes may be required
    FunctionalEquivalent,
}

impl ReplaceType {
    /// Short label as used in the source spreadsheets
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PinToPin => "P2P",
            Self::FunctionalEquivalent => "功能替代",
        }
    }

    #[must_use]
    pub fn is_pin_to_pin(self) -> bool {
        matches!(self, Self::PinToPin)
    }
}

impl std::fmt::Display for ReplaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
