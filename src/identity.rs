use crate::store::{sort_by_count, CountRow};
use std::collections::{BTreeMap, BTreeSet};

/// The addresses one person sends and receives mail as, shown under a single
/// display name. Matching ignores case.
#[derive(Clone, Debug, PartialEq)]
pub struct IdentitySet {
    display_name: String,
    addresses: BTreeSet<String>,
}


impl IdentitySet {
    pub fn new<I, S>(display_name: &str, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            display_name: display_name.into(),
            addresses: addresses
                .into_iter()
                .map(|address| address.as_ref().trim().to_lowercase())
                .filter(|address| !address.is_empty())
                .collect(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.contains(&address.to_lowercase())
    }

    /// Every spelling of the own addresses a store might hold.
    pub fn query_addresses(&self) -> Vec<String> {
        self.addresses
            .iter()
            .flat_map(|address| [address.clone(), address.to_uppercase()])
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    pub fn label<'a>(&'a self, address: &'a str) -> &'a str {
        if self.contains(address) {
            &self.display_name
        } else {
            address
        }
    }
}


/// Replaces own addresses with the display name and sums the counts of rows
/// that end up with the same sender and receiver.
pub fn fold(rows: &[CountRow], identity: &IdentitySet) -> Vec<CountRow> {
    let mut merged: BTreeMap<(&str, &str), u32> = BTreeMap::new();

    for row in rows {
        let key = (
            identity.label(&row.from_address),
            identity.label(&row.to_address),
        );

        *merged.entry(key).or_insert(0) += row.count;
    }

    let mut folded: Vec<CountRow> = merged
        .into_iter()
        .map(|((from, to), count)| CountRow::new(from, to, count))
        .collect();

    sort_by_count(&mut folded);

    folded
}
