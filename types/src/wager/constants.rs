/// Minimum stake accepted on a single bet.
pub const MIN_BET: u64 = 10;

/// Maximum stake accepted on a single bet.
pub const MAX_BET: u64 = 1_000;

/// Balance granted when a bettor profile is first created.
pub const STARTING_BALANCE: u64 = 1_000;

/// Fixed-point scale for odds (hundredths).
pub const ODDS_SCALE: u32 = 100;

/// Odds assigned to the first bet placed into an empty pool (2.00x).
pub const OPENING_ODDS: u32 = 200;

/// Odds assigned when the pool has stake but none on the chosen
/// contestant (3.00x).
pub const UNDERDOG_ODDS: u32 = 300;

/// Floor for computed odds (1.50x).
pub const MIN_ODDS: u32 = 150;

/// Ceiling for computed odds (10.00x).
pub const MAX_ODDS: u32 = 1_000;

/// Maximum contestants tracked per match book.
pub const MAX_MATCH_CONTESTANTS: usize = 64;

/// Maximum bets tracked per match book.
pub const MAX_MATCH_BETS: usize = 4_096;

/// History window retained per bettor. Older ids fall out of the window;
/// the bet records themselves remain addressable by id.
pub const MAX_BETTOR_BETS: usize = 1_024;

/// Error codes surfaced alongside [`WagerError`](super::WagerError)
pub const ERROR_INVALID_AMOUNT: u8 = 1;
pub const ERROR_INSUFFICIENT_BALANCE: u8 = 2;
pub const ERROR_DUPLICATE_BET: u8 = 3;
pub const ERROR_BET_NOT_FOUND: u8 = 4;
pub const ERROR_NON_POSITIVE_TOP_UP: u8 = 5;
pub const ERROR_MATCH_FULL: u8 = 6;
pub const ERROR_STORAGE: u8 = 7;
