use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use commonware_cryptography::ed25519::PublicKey;

use super::Odds;

/// Lifecycle of a bet. A bet is born `Pending` and transitions exactly once
/// to one of the terminal states; it is never mutated again afterwards.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BetStatus {
    Pending = 0,
    Won = 1,
    Lost = 2,
    Cancelled = 3,
}

impl BetStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl TryFrom<u8> for BetStatus {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BetStatus::Pending),
            1 => Ok(BetStatus::Won),
            2 => Ok(BetStatus::Lost),
            3 => Ok(BetStatus::Cancelled),
            _ => Err(()),
        }
    }
}

impl Write for BetStatus {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for BetStatus {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        BetStatus::try_from(value).map_err(|_| Error::InvalidEnum(value))
    }
}

impl EncodeSize for BetStatus {
    fn encode_size(&self) -> usize {
        u8::SIZE
    }
}

/// A wager linking a bettor, a match, a contestant, a stake, and odds frozen
/// at placement time. Later pool changes never alter `odds`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bet {
    pub id: u64,
    pub game: u64,
    pub bettor: PublicKey,
    pub contestant: PublicKey,
    pub amount: u64,
    pub odds: Odds,
    pub status: BetStatus,
    /// Amount credited on resolution: the winnings for `Won`, zero for
    /// `Lost`, the refunded stake for `Cancelled`, `None` while `Pending`.
    pub payout: Option<u64>,
    pub placed_at_ms: u64,
    pub settled_at_ms: Option<u64>,
}

impl Bet {
    pub fn is_pending(&self) -> bool {
        self.status == BetStatus::Pending
    }
}

impl Write for Bet {
    fn write(&self, writer: &mut impl BufMut) {
        self.id.write(writer);
        self.game.write(writer);
        self.bettor.write(writer);
        self.contestant.write(writer);
        self.amount.write(writer);
        self.odds.write(writer);
        self.status.write(writer);
        self.payout.write(writer);
        self.placed_at_ms.write(writer);
        self.settled_at_ms.write(writer);
    }
}

impl Read for Bet {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            id: u64::read(reader)?,
            game: u64::read(reader)?,
            bettor: PublicKey::read(reader)?,
            contestant: PublicKey::read(reader)?,
            amount: u64::read(reader)?,
            odds: Odds::read(reader)?,
            status: BetStatus::read(reader)?,
            payout: Option::<u64>::read(reader)?,
            placed_at_ms: u64::read(reader)?,
            settled_at_ms: Option::<u64>::read(reader)?,
        })
    }
}

impl EncodeSize for Bet {
    fn encode_size(&self) -> usize {
        self.id.encode_size()
            + self.game.encode_size()
            + self.bettor.encode_size()
            + self.contestant.encode_size()
            + self.amount.encode_size()
            + self.odds.encode_size()
            + self.status.encode_size()
            + self.payout.encode_size()
            + self.placed_at_ms.encode_size()
            + self.settled_at_ms.encode_size()
    }
}
