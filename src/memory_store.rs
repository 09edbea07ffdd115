//! In-memory connection store, used for throwaway runs and tests.

use crate::errors::StoreError;
use crate::result::StoreResult;
use crate::scanner::Pairing;
use crate::store::{
    sort_by_count, ConnectionAggregate, ConnectionKey, ConnectionReader, ConnectionWriter, CountRow,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<ConnectionAggregate>,
    index: HashMap<ConnectionKey, usize>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, String> {
        self.inner.lock().map_err(|e| e.to_string())
    }

    fn select<F>(&self, addresses: &[String], column: F) -> StoreResult<Vec<CountRow>>
    where
        F: Fn(&ConnectionAggregate) -> &str,
    {
        let wanted: HashSet<&str> = addresses.iter().map(String::as_str).collect();
        let inner = self.lock().map_err(StoreError::Query)?;

        let mut rows: Vec<CountRow> = inner
            .rows
            .iter()
            .filter(|row| wanted.contains(column(*row)))
            .map(|row| CountRow::new(&row.from_address, &row.to_address, row.count))
            .collect();

        sort_by_count(&mut rows);

        Ok(rows)
    }
}


impl ConnectionWriter for MemoryStore {
    fn begin_scan(&mut self) -> StoreResult<()> {
        let mut inner = self.lock().map_err(StoreError::Transaction)?;

        inner.rows.clear();
        inner.index.clear();

        Ok(())
    }

    fn upsert(&self, pairing: &Pairing) -> StoreResult<()> {
        let mut inner = self.lock().map_err(|reason| StoreError::Upsert {
            from: pairing.sender.address.clone(),
            to: pairing.receiver.address.clone(),
            reason,
        })?;

        let key = ConnectionKey::from(pairing);

        match inner.index.get(&key).copied() {
            Some(position) => inner.rows[position].count += 1,
            None => {
                let position = inner.rows.len();
                inner.rows.push(ConnectionAggregate::first_seen(pairing));
                inner.index.insert(key, position);
            }
        }

        Ok(())
    }
}


impl ConnectionReader for MemoryStore {
    fn outbound(&self, addresses: &[String]) -> StoreResult<Vec<CountRow>> {
        self.select(addresses, |row| row.from_address.as_str())
    }

    fn inbound(&self, addresses: &[String]) -> StoreResult<Vec<CountRow>> {
        self.select(addresses, |row| row.to_address.as_str())
    }

    fn note_for(&self, address: &str) -> StoreResult<Option<String>> {
        let inner = self.lock().map_err(StoreError::Query)?;

        Ok(inner
            .rows
            .iter()
            .find(|row| row.from_address == address)
            .map(|row| row.from_note.clone()))
    }

    fn aggregates(&self) -> StoreResult<Vec<ConnectionAggregate>> {
        let inner = self.lock().map_err(StoreError::Query)?;

        Ok(inner.rows.clone())
    }
}
