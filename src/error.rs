//! Error types for contract violations and settings I/O

use std::fmt;
use std::io;

/// A caller handed the engine a value outside its closed domain.
///
/// These are programming errors, not gameplay conditions: a rejected move or
/// an unavailable hold is reported as a plain `bool`, never as a `GameError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// A piece symbol that is not one of `IOTSZJL`
    InvalidKind(char),
    /// A rotation index outside `0..4`
    InvalidRotation(u8),
    /// A bag preview request outside `1..=7`
    InvalidPreviewSize(usize),
    /// A timing setting that must be at least 1
    ZeroSetting(&'static str),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidKind(symbol) => write!(f, "invalid piece kind {symbol:?}"),
            GameError::InvalidRotation(index) => {
                write!(f, "invalid rotation state {index}, expected 0..=3")
            }
            GameError::InvalidPreviewSize(n) => {
                write!(f, "invalid preview size {n}, expected 1..=7")
            }
            GameError::ZeroSetting(name) => write!(f, "{name} must be at least 1"),
        }
    }
}

impl std::error::Error for GameError {}

/// Failure while reading or writing the settings file
#[derive(Debug)]
pub enum SettingsError {
    NoConfigDir,
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Invalid(GameError),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::NoConfigDir => write!(f, "could not determine config directory"),
            SettingsError::Io(e) => write!(f, "settings I/O failed: {e}"),
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {e}"),
            SettingsError::Serialize(e) => write!(f, "failed to serialize settings: {e}"),
            SettingsError::Invalid(e) => write!(f, "invalid settings: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::NoConfigDir => None,
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Serialize(e) => Some(e),
            SettingsError::Invalid(e) => Some(e),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(e: toml::de::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl From<toml::ser::Error> for SettingsError {
    fn from(e: toml::ser::Error) -> Self {
        SettingsError::Serialize(e)
    }
}

impl From<GameError> for SettingsError {
    fn from(e: GameError) -> Self {
        SettingsError::Invalid(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_bad_value() {
        assert!(GameError::InvalidKind('X').to_string().contains("'X'"));
        assert!(GameError::InvalidRotation(4).to_string().contains('4'));
        assert!(GameError::InvalidPreviewSize(8).to_string().contains('8'));
        assert_eq!(
            GameError::ZeroSetting("backlash_frames").to_string(),
            "backlash_frames must be at least 1"
        );
    }
}
