//! Railbird wagering engine.
//!
//! This crate contains the ledgered state machine for spectator wagering:
//! bet placement against pool-based odds, and the all-or-nothing settlement
//! or cancellation of every bet tied to a match.
//!
//! ## Transaction model
//! Every mutating operation runs against a [`Ledger`] overlay: reads see the
//! overlay's own writes, and nothing reaches the backing store until the
//! whole operation succeeds and the change set is applied in one step. A
//! rejected precondition therefore leaves no partial mutation behind.
//!
//! ## Invariants
//! - Odds are computed once, at placement, over the pool excluding the bet
//!   being placed, and are never recomputed.
//! - A bet leaves `Pending` exactly once; settlement and cancellation drain
//!   the open set, so re-running either sweep is a no-op.
//! - Balances move only through debit/credit inside the same transaction as
//!   the operation that triggered them.
//!
//! The primary entrypoint is [`Wagering`].

pub mod odds;
pub mod query;

mod ledger;
mod service;
mod state;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use ledger::Ledger;
pub use service::{BetReceipt, Event, Settlement, Wagering};
pub use state::{Adb, State, Status};

#[cfg(any(test, feature = "mocks"))]
pub use state::Memory;

#[cfg(test)]
mod tests;
