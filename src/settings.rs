use serde::{Deserialize, Serialize};

/// Largest table the engine deals for: ten seats leave 24 cards after hole cards, enough for
/// burns and a full board.
pub const MAX_OPPONENTS: usize = 9;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("invalid setting: {0}")]
    InvalidValue(String),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Table configuration used to seat players and size forced bets.
///
/// ```
/// use holdem_engine::settings::TableSettings;
///
/// let s = TableSettings::from_json(r#"{"big_blind": 20, "small_blind": 10}"#).unwrap();
/// assert_eq!(s.big_blind, 20);
/// assert_eq!(s.starting_stack, TableSettings::default().starting_stack);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    pub starting_stack: u64,
    pub small_blind: u64,
    pub big_blind: u64,
    /// Dead chips every dealt-in player posts before the blinds; 0 disables antes.
    pub ante: u64,
    /// Number of AI seats next to the human seat.
    pub opponent_count: usize,
    pub human_name: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            starting_stack: 1000,
            small_blind: 5,
            big_blind: 10,
            ante: 0,
            opponent_count: 5,
            human_name: "You".to_string(),
        }
    }
}

impl TableSettings {
    /// Parse and validate settings from JSON; missing fields take their defaults.
    pub fn from_json(input: &str) -> Result<Self, SettingsError> {
        let settings: TableSettings = serde_json::from_str(input)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.big_blind == 0 {
            return Err(SettingsError::InvalidValue("big_blind must be greater than 0".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(SettingsError::InvalidValue(format!(
                "small_blind {} exceeds big_blind {}",
                self.small_blind, self.big_blind
            )));
        }
        if self.starting_stack < self.big_blind {
            return Err(SettingsError::InvalidValue(format!(
                "starting_stack {} is below big_blind {}",
                self.starting_stack, self.big_blind
            )));
        }
        if self.opponent_count == 0 || self.opponent_count > MAX_OPPONENTS {
            return Err(SettingsError::InvalidValue(format!(
                "opponent_count must be between 1 and {MAX_OPPONENTS}, got {}",
                self.opponent_count
            )));
        }
        if self.human_name.trim().is_empty() {
            return Err(SettingsError::InvalidValue("human_name cannot be empty".into()));
        }
        Ok(())
    }

    pub fn player_count(&self) -> usize {
        self.opponent_count + 1
    }
}
