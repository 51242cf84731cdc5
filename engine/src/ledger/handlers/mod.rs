use super::*;
use crate::state::{load_bet, load_book, profile_or_default};
use railbird_types::wager::WagerError;

mod betting;
mod settlement;
