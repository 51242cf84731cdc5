use commonware_cryptography::ed25519::PublicKey;
use railbird_types::wager::{Bet, BetStatus, MAX_BET, MIN_BET};
use tracing::debug;

use super::*;
use crate::odds::compute_odds;

impl<'a, S: State> Ledger<'a, S> {
    async fn next_bet_id(&mut self) -> Result<u64, WagerError> {
        let next = match self.get(&Key::BetSeq).await? {
            Some(Value::BetSeq(n)) => n + 1,
            _ => 1,
        };
        self.insert(Key::BetSeq, Value::BetSeq(next));
        Ok(next)
    }

    /// Stake `amount` on `contestant` winning match `game`.
    ///
    /// Preconditions are checked in a fixed order (amount bounds, balance,
    /// duplicate stake, book capacity) so callers see stable error codes.
    /// Returns the stored bet and the bettor's remaining balance.
    pub(crate) async fn handle_place_bet(
        &mut self,
        bettor: &PublicKey,
        game: u64,
        contestant: &PublicKey,
        amount: u64,
    ) -> Result<(Bet, u64), WagerError> {
        if !(MIN_BET..=MAX_BET).contains(&amount) {
            return Err(WagerError::InvalidAmount { amount });
        }

        let mut profile = profile_or_default(self, bettor).await?;
        profile.debit(amount)?;

        let mut book = load_book(self, game).await?;
        if book.has_open(bettor, contestant) {
            return Err(WagerError::DuplicateBet { game });
        }
        if !book.can_accept(contestant) {
            return Err(WagerError::MatchFull { game });
        }

        // Odds come from the pool as it stands, before this stake joins it.
        let odds = compute_odds(&book, contestant);
        let id = self.next_bet_id().await?;
        let bet = Bet {
            id,
            game,
            bettor: bettor.clone(),
            contestant: contestant.clone(),
            amount,
            odds,
            status: BetStatus::Pending,
            payout: None,
            placed_at_ms: self.now_ms,
            settled_at_ms: None,
        };

        book.record(&bet);
        profile.record_bet(id, amount);
        let balance = profile.balance;

        self.store_bet(bet.clone());
        self.store_book(book);
        self.store_profile(bettor.clone(), profile);

        debug!(bet = id, game, amount, odds = %bet.odds, "bet placed");
        Ok((bet, balance))
    }

    /// Credit `amount` to a bettor's balance, creating the profile when it
    /// does not exist yet. Returns the resulting balance.
    pub(crate) async fn handle_top_up(
        &mut self,
        bettor: &PublicKey,
        amount: u64,
    ) -> Result<u64, WagerError> {
        if amount == 0 {
            return Err(WagerError::NonPositiveTopUp);
        }

        let mut profile = profile_or_default(self, bettor).await?;
        profile.credit(amount);
        let balance = profile.balance;
        self.store_profile(bettor.clone(), profile);

        debug!(amount, balance, "balance topped up");
        Ok(balance)
    }
}
