//! Store schema: the keys and values persisted by the wagering engine.
//!
//! Both enums carry explicit tag bytes so the wire layout stays stable as
//! variants are added.

use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use commonware_cryptography::ed25519::PublicKey;

use crate::wager::{Bet, BettorProfile, MatchBook};

#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Clone, Debug)]
pub enum Key {
    /// Per-user profile and balance (tag 0).
    Bettor(PublicKey),
    /// Individual bet record (tag 1).
    Bet(u64),
    /// Per-match pool totals and bet indexes (tag 2).
    Book(u64),
    /// Next unassigned bet id (tag 3).
    BetSeq,
}

impl Write for Key {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Bettor(pk) => {
                0u8.write(writer);
                pk.write(writer);
            }
            Self::Bet(id) => {
                1u8.write(writer);
                id.write(writer);
            }
            Self::Book(game) => {
                2u8.write(writer);
                game.write(writer);
            }
            Self::BetSeq => 3u8.write(writer),
        }
    }
}

impl Read for Key {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let key = match u8::read(reader)? {
            0 => Self::Bettor(PublicKey::read(reader)?),
            1 => Self::Bet(u64::read(reader)?),
            2 => Self::Book(u64::read(reader)?),
            3 => Self::BetSeq,
            i => return Err(Error::InvalidEnum(i)),
        };

        Ok(key)
    }
}

impl EncodeSize for Key {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::Bettor(_) => PublicKey::SIZE,
                Self::Bet(_) => u64::SIZE,
                Self::Book(_) => u64::SIZE,
                Self::BetSeq => 0,
            }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
#[allow(clippy::large_enum_variant)]
pub enum Value {
    /// Per-user profile and balance (tag 0).
    Bettor(BettorProfile),
    /// Individual bet record (tag 1).
    Bet(Bet),
    /// Per-match pool totals and bet indexes (tag 2).
    Book(MatchBook),
    /// Next unassigned bet id (tag 3).
    BetSeq(u64),
}

impl Write for Value {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Bettor(profile) => {
                0u8.write(writer);
                profile.write(writer);
            }
            Self::Bet(bet) => {
                1u8.write(writer);
                bet.write(writer);
            }
            Self::Book(book) => {
                2u8.write(writer);
                book.write(writer);
            }
            Self::BetSeq(next) => {
                3u8.write(writer);
                next.write(writer);
            }
        }
    }
}

impl Read for Value {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = match u8::read(reader)? {
            0 => Self::Bettor(BettorProfile::read(reader)?),
            1 => Self::Bet(Bet::read(reader)?),
            2 => Self::Book(MatchBook::read(reader)?),
            3 => Self::BetSeq(u64::read(reader)?),
            i => return Err(Error::InvalidEnum(i)),
        };

        Ok(value)
    }
}

impl EncodeSize for Value {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::Bettor(profile) => profile.encode_size(),
                Self::Bet(bet) => bet.encode_size(),
                Self::Book(book) => book.encode_size(),
                Self::BetSeq(next) => next.encode_size(),
            }
    }
}
