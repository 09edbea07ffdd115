//! Storage seams for connection aggregates.
//!
//! The scan phase writes through [`ConnectionWriter`]; everything after it reads
//! through [`ConnectionReader`]. Calling [`ConnectionWriter::seal`] moves a store
//! from the first phase into the second, so no write can follow the first read.

use crate::result::StoreResult;
use crate::scanner::Pairing;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ConnectionKey {
    pub from_address: String,
    pub to_address: String,
}

impl From<&Pairing> for ConnectionKey {
    fn from(pairing: &Pairing) -> Self {
        Self {
            from_address: pairing.sender.address.clone(),
            to_address: pairing.receiver.address.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConnectionAggregate {
    pub from_address: String,
    pub from_domain: String,
    pub from_note: String,
    pub to_address: String,
    pub to_domain: String,
    pub to_note: String,
    pub count: u32,
}

impl ConnectionAggregate {
    pub fn first_seen(pairing: &Pairing) -> Self {
        Self {
            from_address: pairing.sender.address.clone(),
            from_domain: pairing.sender.domain.clone(),
            from_note: pairing.sender.note.clone(),
            to_address: pairing.receiver.address.clone(),
            to_domain: pairing.receiver.domain.clone(),
            to_note: pairing.receiver.note.clone(),
            count: 1,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CountRow {
    pub from_address: String,
    pub to_address: String,
    pub count: u32,
}

impl CountRow {
    pub fn new(from_address: &str, to_address: &str, count: u32) -> Self {
        Self {
            from_address: from_address.into(),
            to_address: to_address.into(),
            count,
        }
    }
}

pub trait ConnectionWriter {
    /// Resets the store for a fresh scan.
    fn begin_scan(&mut self) -> StoreResult<()> {
        Ok(())
    }

    /// Inserts the pairing with a count of 1, or bumps the count of the existing
    /// row. Domains and notes keep their first-seen values.
    fn upsert(&self, pairing: &Pairing) -> StoreResult<()>;

    fn commit_scan(&mut self) -> StoreResult<()> {
        Ok(())
    }

    fn seal(self) -> Sealed<Self>
    where
        Self: Sized,
    {
        Sealed(self)
    }
}

pub trait ConnectionReader {
    /// Rows whose sender is one of `addresses`, highest count first.
    fn outbound(&self, addresses: &[String]) -> StoreResult<Vec<CountRow>>;

    /// Rows whose receiver is one of `addresses`, highest count first.
    fn inbound(&self, addresses: &[String]) -> StoreResult<Vec<CountRow>>;

    /// The note recorded with the first row sent from `address`.
    fn note_for(&self, address: &str) -> StoreResult<Option<String>>;

    fn aggregates(&self) -> StoreResult<Vec<ConnectionAggregate>>;
}

/// A store whose scan phase is over.
#[derive(Debug)]
pub struct Sealed<S>(S);

impl<S: ConnectionReader> ConnectionReader for Sealed<S> {
    fn outbound(&self, addresses: &[String]) -> StoreResult<Vec<CountRow>> {
        self.0.outbound(addresses)
    }

    fn inbound(&self, addresses: &[String]) -> StoreResult<Vec<CountRow>> {
        self.0.inbound(addresses)
    }

    fn note_for(&self, address: &str) -> StoreResult<Option<String>> {
        self.0.note_for(address)
    }

    fn aggregates(&self) -> StoreResult<Vec<ConnectionAggregate>> {
        self.0.aggregates()
    }
}


pub fn sort_by_count(rows: &mut [CountRow]) {
    rows.sort_by(compare_rows);
}

fn compare_rows(a: &CountRow, b: &CountRow) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| a.from_address.cmp(&b.from_address))
        .then_with(|| a.to_address.cmp(&b.to_address))
}
