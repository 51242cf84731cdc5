use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, ReadRangeExt, Write};

use super::{WagerError, MAX_BETTOR_BETS, STARTING_BALANCE};

/// Per-user balance and wagering aggregates.
///
/// Created lazily with [`STARTING_BALANCE`] on first mutating touch; the
/// balance is only ever moved through [`debit`](Self::debit) and
/// [`credit`](Self::credit) inside a single store transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BettorProfile {
    pub balance: u64,
    /// Count of every bet ever placed (the history window below may trim).
    pub total_bets: u64,
    pub total_wagered: u64,
    pub total_won: u64,
    pub won_count: u64,
    pub lost_count: u64,
    /// Recent bet ids, oldest first, trimmed at [`MAX_BETTOR_BETS`].
    pub bet_ids: Vec<u64>,
}

impl Default for BettorProfile {
    fn default() -> Self {
        Self {
            balance: STARTING_BALANCE,
            total_bets: 0,
            total_wagered: 0,
            total_won: 0,
            won_count: 0,
            lost_count: 0,
            bet_ids: Vec::new(),
        }
    }
}

impl BettorProfile {
    /// Remove `amount` from the balance, failing without mutation when the
    /// balance cannot cover it.
    pub fn debit(&mut self, amount: u64) -> Result<(), WagerError> {
        if amount > self.balance {
            return Err(WagerError::InsufficientBalance {
                balance: self.balance,
                required: amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Track a freshly placed bet in the aggregates and the history window.
    pub fn record_bet(&mut self, id: u64, amount: u64) {
        self.total_bets += 1;
        self.total_wagered = self.total_wagered.saturating_add(amount);
        self.bet_ids.push(id);
        if self.bet_ids.len() > MAX_BETTOR_BETS {
            self.bet_ids.remove(0);
        }
    }

    /// Credit winnings and bump the win aggregates.
    pub fn settle_won(&mut self, winnings: u64) {
        self.credit(winnings);
        self.total_won = self.total_won.saturating_add(winnings);
        self.won_count += 1;
    }

    pub fn settle_lost(&mut self) {
        self.lost_count += 1;
    }

    /// Share of settled bets won, in basis points. Pending and cancelled
    /// bets do not enter the denominator; no settled bets yields zero.
    pub fn win_rate_bps(&self) -> u32 {
        let settled = self.won_count + self.lost_count;
        if settled == 0 {
            return 0;
        }
        (self.won_count * 10_000 / settled) as u32
    }
}

impl Write for BettorProfile {
    fn write(&self, writer: &mut impl BufMut) {
        self.balance.write(writer);
        self.total_bets.write(writer);
        self.total_wagered.write(writer);
        self.total_won.write(writer);
        self.won_count.write(writer);
        self.lost_count.write(writer);
        self.bet_ids.write(writer);
    }
}

impl Read for BettorProfile {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            balance: u64::read(reader)?,
            total_bets: u64::read(reader)?,
            total_wagered: u64::read(reader)?,
            total_won: u64::read(reader)?,
            won_count: u64::read(reader)?,
            lost_count: u64::read(reader)?,
            bet_ids: Vec::<u64>::read_range(reader, 0..=MAX_BETTOR_BETS)?,
        })
    }
}

impl EncodeSize for BettorProfile {
    fn encode_size(&self) -> usize {
        self.balance.encode_size()
            + self.total_bets.encode_size()
            + self.total_wagered.encode_size()
            + self.total_won.encode_size()
            + self.won_count.encode_size()
            + self.lost_count.encode_size()
            + self.bet_ids.encode_size()
    }
}
