use anyhow::Result;
use commonware_cryptography::ed25519::PublicKey;
use railbird_types::{
    wager::{Bet, BettorProfile, MatchBook},
    Key, Value,
};
use std::collections::BTreeMap;

use crate::state::{State, Status};

mod handlers;

/// Write overlay providing per-operation transactions.
///
/// Reads fall through to the backing state unless the overlay holds a
/// pending write, so an operation sees its own mutations. Nothing reaches
/// the backing store until [`commit`](Self::commit); dropping the ledger
/// instead rolls the whole operation back.
pub struct Ledger<'a, S: State> {
    state: &'a S,
    pending: BTreeMap<Key, Status>,

    now_ms: u64,
}

impl<'a, S: State> Ledger<'a, S> {
    pub fn new(state: &'a S, now_ms: u64) -> Self {
        Self {
            state,
            pending: BTreeMap::new(),
            now_ms,
        }
    }

    fn insert(&mut self, key: Key, value: Value) {
        self.pending.insert(key, Status::Update(value));
    }

    fn store_profile(&mut self, bettor: PublicKey, profile: BettorProfile) {
        self.insert(Key::Bettor(bettor), Value::Bettor(profile));
    }

    fn store_bet(&mut self, bet: Bet) {
        self.insert(Key::Bet(bet.id), Value::Bet(bet));
    }

    fn store_book(&mut self, book: MatchBook) {
        self.insert(Key::Book(book.game), Value::Book(book));
    }

    /// Timestamp stamped onto bets placed or settled in this transaction.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Consume the overlay, yielding the change set to apply atomically.
    pub fn commit(self) -> Vec<(Key, Status)> {
        self.pending.into_iter().collect()
    }
}

impl<'a, S: State> State for Ledger<'a, S> {
    async fn get(&self, key: &Key) -> Result<Option<Value>> {
        Ok(match self.pending.get(key) {
            Some(Status::Update(value)) => Some(value.clone()),
            Some(Status::Delete) => None,
            None => self.state.get(key).await?,
        })
    }

    async fn insert(&mut self, key: Key, value: Value) -> Result<()> {
        self.pending.insert(key, Status::Update(value));
        Ok(())
    }

    async fn delete(&mut self, key: &Key) -> Result<()> {
        self.pending.insert(key.clone(), Status::Delete);
        Ok(())
    }
}
