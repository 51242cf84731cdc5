use commonware_cryptography::ed25519::PublicKey;
use commonware_runtime::Clock;
use railbird_types::wager::{Bet, BetStatus, BettorHistory, MatchStats, WagerError};
use std::time::SystemTime;

use crate::ledger::Ledger;
use crate::query;
use crate::state::State;

/// Outcome emitted for each bet touched by a settlement or cancellation
/// sweep, in the order the bets were resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    BetSettled {
        bet_id: u64,
        bettor: PublicKey,
        won: bool,
        /// Winnings credited, zero for a loss.
        payout: u64,
    },
    BetRefunded {
        bet_id: u64,
        bettor: PublicKey,
        amount: u64,
    },
}

impl Event {
    fn credited(&self) -> u64 {
        match self {
            Event::BetSettled { payout, .. } => *payout,
            Event::BetRefunded { amount, .. } => *amount,
        }
    }
}

/// Confirmation returned from a successful placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BetReceipt {
    /// The stored bet, odds frozen.
    pub bet: Bet,
    /// Bettor's balance after the stake was debited.
    pub balance: u64,
}

/// Summary of a settlement or cancellation sweep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub game: u64,
    /// Total credited back to bettors across the sweep.
    pub total_paid: u64,
    pub events: Vec<Event>,
}

impl Settlement {
    fn from_events(game: u64, events: Vec<Event>) -> Self {
        let total_paid = events.iter().map(Event::credited).sum();
        Self {
            game,
            total_paid,
            events,
        }
    }
}

fn system_time_ms(now: SystemTime) -> u64 {
    match now.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(duration) => duration.as_millis() as u64,
        Err(_) => 0,
    }
}

/// Wagering engine over a backing state.
///
/// Each mutating call runs inside its own [`Ledger`] transaction: either the
/// whole operation commits or the state is untouched. Reads go straight to
/// the backing state.
pub struct Wagering<E: Clock, S: State> {
    context: E,
    state: S,
}

impl<E: Clock, S: State> Wagering<E, S> {
    pub fn new(context: E, state: S) -> Self {
        Self { context, state }
    }

    /// The backing state, for direct [`query`] access.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Consume the facade, returning the backing state.
    pub fn into_state(self) -> S {
        self.state
    }

    fn now_ms(&self) -> u64 {
        system_time_ms(self.context.current())
    }

    /// Stake `amount` on `contestant` winning match `game`, at odds frozen
    /// from the pool as it stands.
    pub async fn place_bet(
        &mut self,
        bettor: &PublicKey,
        game: u64,
        contestant: &PublicKey,
        amount: u64,
    ) -> Result<BetReceipt, WagerError> {
        let mut ledger = Ledger::new(&self.state, self.now_ms());
        let (bet, balance) = ledger
            .handle_place_bet(bettor, game, contestant, amount)
            .await?;
        self.state.apply(ledger.commit()).await?;
        Ok(BetReceipt { bet, balance })
    }

    /// Credit `amount` to a bettor's balance. Returns the new balance.
    pub async fn top_up(&mut self, bettor: &PublicKey, amount: u64) -> Result<u64, WagerError> {
        let mut ledger = Ledger::new(&self.state, self.now_ms());
        let balance = ledger.handle_top_up(bettor, amount).await?;
        self.state.apply(ledger.commit()).await?;
        Ok(balance)
    }

    /// Resolve every open bet on match `game` against `winner`. All bets
    /// resolve in one transaction; re-running is a no-op.
    pub async fn settle_bets(
        &mut self,
        game: u64,
        winner: &PublicKey,
    ) -> Result<Settlement, WagerError> {
        let mut ledger = Ledger::new(&self.state, self.now_ms());
        let events = ledger.handle_settle_match(game, winner).await?;
        self.state.apply(ledger.commit()).await?;
        Ok(Settlement::from_events(game, events))
    }

    /// Refund every open bet on a voided match `game` in one transaction.
    pub async fn cancel_bets(&mut self, game: u64) -> Result<Settlement, WagerError> {
        let mut ledger = Ledger::new(&self.state, self.now_ms());
        let events = ledger.handle_void_match(game).await?;
        self.state.apply(ledger.commit()).await?;
        Ok(Settlement::from_events(game, events))
    }

    /// Current balance, including the starting grant for a bettor the
    /// store has never seen.
    pub async fn balance(&self, bettor: &PublicKey) -> Result<u64, WagerError> {
        query::balance(&self.state, bettor).await
    }

    /// A bettor's lifetime aggregates with up to `limit` recent bets,
    /// newest first.
    pub async fn history(
        &self,
        bettor: &PublicKey,
        limit: usize,
    ) -> Result<BettorHistory, WagerError> {
        query::history(&self.state, bettor, limit).await
    }

    /// Pool totals and live odds for every contestant in a match.
    pub async fn match_stats(&self, game: u64) -> Result<MatchStats, WagerError> {
        query::match_stats(&self.state, game).await
    }

    /// Bets placed in a match, in placement order, optionally filtered by
    /// status.
    pub async fn match_bets(
        &self,
        game: u64,
        status: Option<BetStatus>,
    ) -> Result<Vec<Bet>, WagerError> {
        query::match_bets(&self.state, game, status).await
    }

    pub async fn bet(&self, id: u64) -> Result<Bet, WagerError> {
        query::bet(&self.state, id).await
    }
}
