use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::player::Participant;
use crate::domain::CroupierId;

/// Стартовый стек по умолчанию.
pub const DEFAULT_CHIPS: Chips = Chips(1000);

fn default_chips() -> Chips {
    DEFAULT_CHIPS
}

/// Ошибки конфигурации крупье.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Стартовый стек должен быть больше нуля")]
    ZeroChips,

    #[error("У владельца должно быть имя")]
    EmptyOwnerName,

    #[error("Некорректный JSON конфигурации: {0}")]
    Json(#[from] serde_json::Error),
}

/// Настройки крупье: кто владелец и с каким стеком стартуют игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CroupierConfig {
    pub id: CroupierId,
    pub owner: Participant,
    #[serde(default = "default_chips")]
    pub chips: Chips,
}

impl CroupierConfig {
    pub fn new(id: CroupierId, owner: Participant) -> Self {
        Self {
            id,
            owner,
            chips: DEFAULT_CHIPS,
        }
    }

    pub fn with_chips(mut self, chips: Chips) -> Self {
        self.chips = chips;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chips.is_zero() {
            return Err(ConfigError::ZeroChips);
        }
        if self.owner.name.trim().is_empty() {
            return Err(ConfigError::EmptyOwnerName);
        }
        Ok(())
    }
}
