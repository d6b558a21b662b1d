//! Obfuscation levels
//!
//! Levels are cumulative: requesting `L3` runs renaming, dead-code
//! injection and control-flow restructuring, in that order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ObfuscationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ObfuscationLevel {
    /// Identifier renaming
    L1 = 1,
    /// Dead-code injection
    L2 = 2,
    /// Control-flow restructuring
    L3 = 3,
    /// String encryption
    L4 = 4,
}

impl ObfuscationLevel {
    pub const ALL: [ObfuscationLevel; 4] = [
        ObfuscationLevel::L1,
        ObfuscationLevel::L2,
        ObfuscationLevel::L3,
        ObfuscationLevel::L4,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ObfuscationLevel::L1 => "rename",
            ObfuscationLevel::L2 => "dead_code",
            ObfuscationLevel::L3 => "control_flow",
            ObfuscationLevel::L4 => "string_encryption",
        }
    }

    /// Levels applied when this one is requested, lowest first
    pub fn cumulative(self) -> impl Iterator<Item = ObfuscationLevel> {
        Self::ALL.into_iter().take_while(move |l| *l <= self)
    }
}

impl TryFrom<u8> for ObfuscationLevel {
    type Error = ObfuscationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ObfuscationLevel::L1),
            2 => Ok(ObfuscationLevel::L2),
            3 => Ok(ObfuscationLevel::L3),
            4 => Ok(ObfuscationLevel::L4),
            other => Err(ObfuscationError::InvalidLevel(other)),
        }
    }
}

impl From<ObfuscationLevel> for u8 {
    fn from(level: ObfuscationLevel) -> u8 {
        level.as_u8()
    }
}

impl fmt::Display for ObfuscationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{} ({})", self.as_u8(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_bounds() {
        assert_eq!(ObfuscationLevel::try_from(3).unwrap(), ObfuscationLevel::L3);
        assert!(matches!(
            ObfuscationLevel::try_from(0),
            Err(ObfuscationError::InvalidLevel(0))
        ));
        assert!(ObfuscationLevel::try_from(5).is_err());
    }

    #[test]
    fn test_cumulative_order() {
        let levels: Vec<u8> = ObfuscationLevel::L3.cumulative().map(u8::from).collect();
        assert_eq!(levels, vec![1, 2, 3]);
        assert_eq!(ObfuscationLevel::L1.cumulative().count(), 1);
    }

    #[test]
    fn test_serde_as_number() {
        assert_eq!(serde_json::to_string(&ObfuscationLevel::L4).unwrap(), "4");
        let level: ObfuscationLevel = serde_json::from_str("2").unwrap();
        assert_eq!(level, ObfuscationLevel::L2);
        assert!(serde_json::from_str::<ObfuscationLevel>("9").is_err());
    }
}
