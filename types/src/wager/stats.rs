use commonware_cryptography::ed25519::PublicKey;

use super::{Bet, Odds};

/// Live per-contestant aggregate for a match. `odds` is what the calculator
/// would assign a new bet right now, not any stored bet's frozen odds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContestantStats {
    pub contestant: PublicKey,
    pub total_bets: u64,
    pub total_amount: u64,
    pub odds: Odds,
}

/// Aggregate view over every bet ever placed in a match, any status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchStats {
    pub game: u64,
    pub total_bets: u64,
    pub total_amount: u64,
    pub contestants: Vec<ContestantStats>,
}

/// A bettor's aggregates plus their most recent bets, newest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BettorHistory {
    pub bettor: PublicKey,
    pub total_bets: u64,
    pub total_wagered: u64,
    pub total_won: u64,
    /// Won share of settled bets in basis points (percent = bps / 100).
    pub win_rate_bps: u32,
    pub bets: Vec<Bet>,
}
