use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};

use super::{MAX_ODDS, MIN_ODDS, ODDS_SCALE, OPENING_ODDS, UNDERDOG_ODDS};

/// Payout multiplier for a bet, fixed at placement time.
///
/// Stored in hundredths (raw 250 = 2.50x) so pool and payout math stays
/// integral. Every constructor clamps to `[MIN_ODDS, MAX_ODDS]`, which the
/// codec also enforces on read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Odds(u32);

impl Odds {
    /// Odds granted to the first bet in an otherwise empty pool.
    pub const OPENING: Self = Self(OPENING_ODDS);

    /// Odds granted when the pool has stake but none on the chosen contestant.
    pub const UNDERDOG: Self = Self(UNDERDOG_ODDS);

    /// Build odds from raw hundredths, clamping to the allowed band.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw.clamp(MIN_ODDS, MAX_ODDS))
    }

    /// Odds implied by the pool: total stake over stake on the contestant,
    /// rounded to the nearest hundredth and clamped.
    ///
    /// `on_contestant` must be non-zero; zero-share cases take
    /// [`Odds::UNDERDOG`] before ever reaching a ratio.
    pub fn from_pool(total: u64, on_contestant: u64) -> Self {
        if on_contestant == 0 {
            return Self::UNDERDOG;
        }
        let scaled = total as u128 * ODDS_SCALE as u128;
        let raw = (scaled + on_contestant as u128 / 2) / on_contestant as u128;
        Self::from_raw(raw.min(u32::MAX as u128) as u32)
    }

    /// Raw value in hundredths.
    pub fn raw(self) -> u32 {
        self.0
    }

    /// `amount` multiplied by these odds, rounded to the nearest unit
    /// (half rounds up).
    pub fn payout(self, amount: u64) -> u64 {
        let scaled = amount as u128 * self.0 as u128;
        ((scaled + ODDS_SCALE as u128 / 2) / ODDS_SCALE as u128) as u64
    }
}

impl std::fmt::Display for Odds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / ODDS_SCALE, self.0 % ODDS_SCALE)
    }
}

impl Write for Odds {
    fn write(&self, writer: &mut impl BufMut) {
        self.0.write(writer);
    }
}

impl Read for Odds {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let raw = u32::read(reader)?;
        if !(MIN_ODDS..=MAX_ODDS).contains(&raw) {
            return Err(Error::Invalid("Odds", "out of band"));
        }
        Ok(Self(raw))
    }
}

impl EncodeSize for Odds {
    fn encode_size(&self) -> usize {
        u32::SIZE
    }
}
