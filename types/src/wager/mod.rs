//! Wagering domain types.
//!
//! Defines bet/book/bettor state, odds, constants, and errors used by the
//! engine and clients.

mod bet;
mod bettor;
mod book;
mod constants;
mod error;
mod odds;
mod stats;

pub use bet::*;
pub use bettor::*;
pub use book::*;
pub use constants::*;
pub use error::*;
pub use odds::*;
pub use stats::*;
