use thiserror::Error;

use crate::core::types::ResourceType;

#[derive(Error, Debug)]
pub enum KingdomError {
    #[error("Not enough {resource}: need {needed}, have {available}")]
    InsufficientResource {
        resource: ResourceType,
        needed: i64,
        available: i64,
    },

    #[error("Cannot recruit {requested} soldiers: limit is {cap} (10% of peasants)")]
    RecruitCapExceeded { requested: u32, cap: u32 },

    #[error("Tax rate must be between {min}% and {max}%, got {rate}%")]
    TaxRateOutOfRange { rate: u32, min: u32, max: u32 },

    #[error("{0} holds no royal office")]
    NotARuler(String),

    #[error("Bank cannot provide {requested} gold: reserve is {reserve}")]
    InsufficientReserve { requested: i64, reserve: i64 },

    #[error("Kingdom lacks {amount} gold to repay the loan (has {available})")]
    RepaymentDefault { amount: i64, available: i64 },

    #[error("No soldiers to fight")]
    NoSoldiers,

    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    #[error("{amount} at {price} gold each is more than any treasury can hold")]
    AmountTooLarge { amount: i64, price: i64 },

    #[error("The game is already over")]
    GameOver,

    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    #[error("No save file found at {0}")]
    SaveNotFound(String),

    #[error("Corrupt save file at line {line} ({field}): {reason}")]
    CorruptSave {
        line: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, KingdomError>;
