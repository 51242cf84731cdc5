use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, ReadRangeExt, Write};
use commonware_cryptography::ed25519::PublicKey;

use super::{Bet, MAX_MATCH_BETS, MAX_MATCH_CONTESTANTS};

/// Cumulative stake on one contestant. Totals only ever grow; settlement and
/// cancellation leave them untouched so the pool history stays queryable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolEntry {
    pub contestant: PublicKey,
    pub bets: u64,
    pub amount: u64,
}

impl Write for PoolEntry {
    fn write(&self, writer: &mut impl BufMut) {
        self.contestant.write(writer);
        self.bets.write(writer);
        self.amount.write(writer);
    }
}

impl Read for PoolEntry {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            contestant: PublicKey::read(reader)?,
            bets: u64::read(reader)?,
            amount: u64::read(reader)?,
        })
    }
}

impl EncodeSize for PoolEntry {
    fn encode_size(&self) -> usize {
        self.contestant.encode_size() + self.bets.encode_size() + self.amount.encode_size()
    }
}

/// A still-pending stake, indexed for duplicate checks and settlement sweeps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenStake {
    pub bet_id: u64,
    pub bettor: PublicKey,
    pub contestant: PublicKey,
}

impl Write for OpenStake {
    fn write(&self, writer: &mut impl BufMut) {
        self.bet_id.write(writer);
        self.bettor.write(writer);
        self.contestant.write(writer);
    }
}

impl Read for OpenStake {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            bet_id: u64::read(reader)?,
            bettor: PublicKey::read(reader)?,
            contestant: PublicKey::read(reader)?,
        })
    }
}

impl EncodeSize for OpenStake {
    fn encode_size(&self) -> usize {
        self.bet_id.encode_size() + self.bettor.encode_size() + self.contestant.encode_size()
    }
}

/// Per-match betting book: the pool totals that drive odds, the id list of
/// every bet placed, and the open set awaiting settlement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchBook {
    pub game: u64,
    pub pools: Vec<PoolEntry>,
    /// Every bet ever placed in this match, oldest first.
    pub bet_ids: Vec<u64>,
    /// Pending bets. Drained by settlement/cancellation, so a second sweep
    /// over the same match is naturally a no-op.
    pub open: Vec<OpenStake>,
}

impl MatchBook {
    pub fn new(game: u64) -> Self {
        Self {
            game,
            pools: Vec::new(),
            bet_ids: Vec::new(),
            open: Vec::new(),
        }
    }

    /// Sum of all stake ever placed in this match.
    pub fn total_amount(&self) -> u64 {
        self.pools.iter().map(|entry| entry.amount).sum()
    }

    /// Count of all bets ever placed in this match.
    pub fn total_bets(&self) -> u64 {
        self.bet_ids.len() as u64
    }

    pub fn pool_for(&self, contestant: &PublicKey) -> Option<&PoolEntry> {
        self.pools.iter().find(|entry| entry.contestant == *contestant)
    }

    /// Whether `bettor` already holds a pending bet on `contestant`.
    pub fn has_open(&self, bettor: &PublicKey, contestant: &PublicKey) -> bool {
        self.open
            .iter()
            .any(|stake| stake.bettor == *bettor && stake.contestant == *contestant)
    }

    /// Whether another bet on `contestant` fits within the book's bounds.
    pub fn can_accept(&self, contestant: &PublicKey) -> bool {
        if self.bet_ids.len() >= MAX_MATCH_BETS {
            return false;
        }
        self.pool_for(contestant).is_some() || self.pools.len() < MAX_MATCH_CONTESTANTS
    }

    /// Index a freshly placed bet: bump the contestant's pool, append the id,
    /// and track the stake as open.
    pub fn record(&mut self, bet: &Bet) {
        match self
            .pools
            .iter_mut()
            .find(|entry| entry.contestant == bet.contestant)
        {
            Some(entry) => {
                entry.bets += 1;
                entry.amount += bet.amount;
            }
            None => self.pools.push(PoolEntry {
                contestant: bet.contestant.clone(),
                bets: 1,
                amount: bet.amount,
            }),
        }
        self.bet_ids.push(bet.id);
        self.open.push(OpenStake {
            bet_id: bet.id,
            bettor: bet.bettor.clone(),
            contestant: bet.contestant.clone(),
        });
    }

    /// Drain the open set for a settlement or cancellation sweep.
    pub fn take_open(&mut self) -> Vec<OpenStake> {
        std::mem::take(&mut self.open)
    }
}

impl Write for MatchBook {
    fn write(&self, writer: &mut impl BufMut) {
        self.game.write(writer);
        self.pools.write(writer);
        self.bet_ids.write(writer);
        self.open.write(writer);
    }
}

impl Read for MatchBook {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            game: u64::read(reader)?,
            pools: Vec::<PoolEntry>::read_range(reader, 0..=MAX_MATCH_CONTESTANTS)?,
            bet_ids: Vec::<u64>::read_range(reader, 0..=MAX_MATCH_BETS)?,
            open: Vec::<OpenStake>::read_range(reader, 0..=MAX_MATCH_BETS)?,
        })
    }
}

impl EncodeSize for MatchBook {
    fn encode_size(&self) -> usize {
        self.game.encode_size()
            + self.pools.encode_size()
            + self.bet_ids.encode_size()
            + self.open.encode_size()
    }
}
