//! Common types for the railbird wagering platform.
//!
//! Spectators stake virtual currency on which contestant will win an
//! in-progress card-game match. This crate defines the persisted domain
//! types (bets, per-match books, bettor profiles), the fixed-point odds
//! representation, the store schema, and the error taxonomy shared by the
//! engine and its callers.

pub mod schema;
pub mod wager;

pub use schema::{Key, Value};
