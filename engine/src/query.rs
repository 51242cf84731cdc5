//! Read-only views over the wagering state.
//!
//! Queries never write: a bettor the store has never seen reads as the
//! default profile without persisting it, and an untouched match reads as an
//! empty book.

use anyhow::anyhow;
use commonware_cryptography::ed25519::PublicKey;
use railbird_types::wager::{Bet, BetStatus, BettorHistory, ContestantStats, MatchStats, WagerError};

use crate::odds::compute_odds;
use crate::state::{load_bet, load_book, profile_or_default, State};

/// Current balance, including the starting grant for an unseen bettor.
pub async fn balance<S: State>(state: &S, bettor: &PublicKey) -> Result<u64, WagerError> {
    Ok(profile_or_default(state, bettor).await?.balance)
}

/// A bettor's lifetime aggregates plus up to `limit` recent bets, newest
/// first.
pub async fn history<S: State>(
    state: &S,
    bettor: &PublicKey,
    limit: usize,
) -> Result<BettorHistory, WagerError> {
    let profile = profile_or_default(state, bettor).await?;
    let mut bets = Vec::with_capacity(limit.min(profile.bet_ids.len()));
    for id in profile.bet_ids.iter().rev().take(limit) {
        let bet = load_bet(state, *id)
            .await?
            .ok_or_else(|| anyhow!("bet {id} in history but missing from store"))?;
        bets.push(bet);
    }
    Ok(BettorHistory {
        bettor: bettor.clone(),
        total_bets: profile.total_bets,
        total_wagered: profile.total_wagered,
        total_won: profile.total_won,
        win_rate_bps: profile.win_rate_bps(),
        bets,
    })
}

/// Pool totals and the odds a new bet would receive, per contestant.
pub async fn match_stats<S: State>(state: &S, game: u64) -> Result<MatchStats, WagerError> {
    let book = load_book(state, game).await?;
    let contestants = book
        .pools
        .iter()
        .map(|entry| ContestantStats {
            contestant: entry.contestant.clone(),
            total_bets: entry.bets,
            total_amount: entry.amount,
            odds: compute_odds(&book, &entry.contestant),
        })
        .collect();
    Ok(MatchStats {
        game,
        total_bets: book.total_bets(),
        total_amount: book.total_amount(),
        contestants,
    })
}

/// Bets placed in a match, in placement order, optionally filtered by
/// status.
pub async fn match_bets<S: State>(
    state: &S,
    game: u64,
    status: Option<BetStatus>,
) -> Result<Vec<Bet>, WagerError> {
    let book = load_book(state, game).await?;
    let mut bets = Vec::with_capacity(book.bet_ids.len());
    for id in &book.bet_ids {
        let bet = load_bet(state, *id)
            .await?
            .ok_or_else(|| anyhow!("bet {id} in book but missing from store"))?;
        if status.is_none_or(|wanted| bet.status == wanted) {
            bets.push(bet);
        }
    }
    Ok(bets)
}

/// Look up a single bet by id.
pub async fn bet<S: State>(state: &S, id: u64) -> Result<Bet, WagerError> {
    load_bet(state, id)
        .await?
        .ok_or(WagerError::BetNotFound(id))
}
