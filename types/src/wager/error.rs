use thiserror::Error;

use super::{
    ERROR_BET_NOT_FOUND, ERROR_DUPLICATE_BET, ERROR_INSUFFICIENT_BALANCE, ERROR_INVALID_AMOUNT,
    ERROR_MATCH_FULL, ERROR_NON_POSITIVE_TOP_UP, ERROR_STORAGE, MAX_BET, MIN_BET,
};

/// Errors surfaced by the wagering engine.
///
/// Domain variants are rejected before any mutation becomes visible; a
/// `Storage` failure aborts the whole per-call transaction.
#[derive(Debug, Error)]
pub enum WagerError {
    #[error("bet amount {amount} outside [{MIN_BET}, {MAX_BET}]")]
    InvalidAmount { amount: u64 },

    #[error("insufficient balance: have {balance}, need {required}")]
    InsufficientBalance { balance: u64, required: u64 },

    #[error("pending bet already placed on this contestant in match {game}")]
    DuplicateBet { game: u64 },

    #[error("bet {0} not found")]
    BetNotFound(u64),

    #[error("top-up amount must be positive")]
    NonPositiveTopUp,

    #[error("match {game} cannot accept further bets")]
    MatchFull { game: u64 },

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

impl WagerError {
    /// Stable machine-readable code for transports and clients.
    pub fn code(&self) -> u8 {
        match self {
            Self::InvalidAmount { .. } => ERROR_INVALID_AMOUNT,
            Self::InsufficientBalance { .. } => ERROR_INSUFFICIENT_BALANCE,
            Self::DuplicateBet { .. } => ERROR_DUPLICATE_BET,
            Self::BetNotFound(_) => ERROR_BET_NOT_FOUND,
            Self::NonPositiveTopUp => ERROR_NON_POSITIVE_TOP_UP,
            Self::MatchFull { .. } => ERROR_MATCH_FULL,
            Self::Storage(_) => ERROR_STORAGE,
        }
    }
}
