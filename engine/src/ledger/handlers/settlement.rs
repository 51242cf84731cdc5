use anyhow::anyhow;
use commonware_cryptography::ed25519::PublicKey;
use railbird_types::wager::BetStatus;
use tracing::{debug, warn};

use super::*;
use crate::service::Event;

impl<'a, S: State> Ledger<'a, S> {
    /// Resolve every open bet on match `game` against `winner`.
    ///
    /// Winners are credited their frozen-odds winnings, losers forfeit the
    /// stake already debited at placement. The open set is drained up front,
    /// so running the sweep again finds nothing and commits nothing.
    pub(crate) async fn handle_settle_match(
        &mut self,
        game: u64,
        winner: &PublicKey,
    ) -> Result<Vec<Event>, WagerError> {
        let mut book = load_book(self, game).await?;
        let open = book.take_open();
        if open.is_empty() {
            debug!(game, "no open bets to settle");
            return Ok(Vec::new());
        }

        let now = self.now_ms;
        let mut events = Vec::with_capacity(open.len());
        for stake in open {
            let Some(mut bet) = load_bet(self, stake.bet_id).await? else {
                warn!(bet = stake.bet_id, game, "open bet missing from store");
                return Err(anyhow!("open bet {} missing from store", stake.bet_id).into());
            };
            if !bet.is_pending() {
                warn!(bet = bet.id, game, status = ?bet.status, "open bet already resolved");
                return Err(anyhow!("open bet {} already resolved", bet.id).into());
            }

            let mut profile = profile_or_default(self, &stake.bettor).await?;
            let won = stake.contestant == *winner;
            let payout = if won {
                let winnings = bet.odds.payout(bet.amount);
                bet.status = BetStatus::Won;
                profile.settle_won(winnings);
                winnings
            } else {
                bet.status = BetStatus::Lost;
                profile.settle_lost();
                0
            };
            bet.payout = Some(payout);
            bet.settled_at_ms = Some(now);

            events.push(Event::BetSettled {
                bet_id: bet.id,
                bettor: stake.bettor.clone(),
                won,
                payout,
            });
            self.store_bet(bet);
            self.store_profile(stake.bettor, profile);
        }

        self.store_book(book);
        debug!(game, settled = events.len(), "match settled");
        Ok(events)
    }

    /// Refund every open bet on a voided match.
    ///
    /// Stakes return to their bettors and the bets resolve as `Cancelled`.
    /// Win/loss aggregates are untouched; a refunded bet never counts as
    /// settled. Idempotent through the same drained open set as settlement.
    pub(crate) async fn handle_void_match(
        &mut self,
        game: u64,
    ) -> Result<Vec<Event>, WagerError> {
        let mut book = load_book(self, game).await?;
        let open = book.take_open();
        if open.is_empty() {
            debug!(game, "no open bets to refund");
            return Ok(Vec::new());
        }

        let now = self.now_ms;
        let mut events = Vec::with_capacity(open.len());
        for stake in open {
            let Some(mut bet) = load_bet(self, stake.bet_id).await? else {
                warn!(bet = stake.bet_id, game, "open bet missing from store");
                return Err(anyhow!("open bet {} missing from store", stake.bet_id).into());
            };
            if !bet.is_pending() {
                warn!(bet = bet.id, game, status = ?bet.status, "open bet already resolved");
                return Err(anyhow!("open bet {} already resolved", bet.id).into());
            }

            let mut profile = profile_or_default(self, &stake.bettor).await?;
            profile.credit(bet.amount);
            bet.status = BetStatus::Cancelled;
            bet.payout = Some(bet.amount);
            bet.settled_at_ms = Some(now);

            events.push(Event::BetRefunded {
                bet_id: bet.id,
                bettor: stake.bettor.clone(),
                amount: bet.amount,
            });
            self.store_bet(bet);
            self.store_profile(stake.bettor, profile);
        }

        self.store_book(book);
        debug!(game, refunded = events.len(), "match voided");
        Ok(events)
    }
}
