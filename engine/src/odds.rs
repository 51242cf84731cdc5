//! Pool-based odds.
//!
//! Odds reflect how the match's stake is distributed when a bet arrives:
//! heavily-backed contestants pay less, unbacked ones pay more. The value is
//! frozen onto the bet at placement and never revisited.

use commonware_cryptography::ed25519::PublicKey;
use railbird_types::wager::{MatchBook, Odds};

/// Compute the odds a new bet on `contestant` would receive from `book`.
///
/// An empty book pays the opening odds, a book with stake but none on
/// `contestant` pays the underdog odds, and otherwise the ratio of total
/// stake to the contestant's pool is clamped into the allowed band.
pub fn compute_odds(book: &MatchBook, contestant: &PublicKey) -> Odds {
    let total = book.total_amount();
    if total == 0 {
        return Odds::OPENING;
    }
    match book.pool_for(contestant) {
        Some(entry) if entry.amount > 0 => Odds::from_pool(total, entry.amount),
        _ => Odds::UNDERDOG,
    }
}
