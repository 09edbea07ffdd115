use crate::result::StoreResult;
use crate::store::{ConnectionReader, CountRow};
use clap::ValueEnum;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ContactScore {
    pub contact: String,
    pub display_name: String,
    pub receiving_count: u32,
    pub sending_count: u32,
    pub score: f64,
}

/// What to show for a contact whose display name cannot be found.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NameFallback {
    /// Show the raw contact address.
    #[default]
    Address,
    /// Leave the contact out of the ranking.
    Exclude,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ranking {
    pub contacts: Vec<ContactScore>,
    pub unresolved: Vec<String>,
}

impl Ranking {
    pub fn top(&self, count: usize) -> &[ContactScore] {
        &self.contacts[..count.min(self.contacts.len())]
    }
}


pub fn score(receiving_count: u32, sending_count: u32) -> f64 {
    let product = f64::from(receiving_count) * f64::from(sending_count);

    (product.sqrt() * 100.0).round() / 100.0
}


/// Joins folded outbound and inbound rows on the other party and ranks the
/// contacts present on both sides, highest score first.
pub fn resolve(outbound: &[CountRow], inbound: &[CountRow], self_name: &str) -> Vec<ContactScore> {
    let sending: HashMap<&str, u32> = counterpart_counts(
        outbound
            .iter()
            .filter(|row| row.from_address == self_name)
            .map(|row| (row.to_address.as_str(), row.count)),
    )
    .into_iter()
    .collect();

    let receiving = counterpart_counts(
        inbound
            .iter()
            .filter(|row| row.to_address == self_name)
            .map(|row| (row.from_address.as_str(), row.count)),
    );

    let mut contacts: Vec<ContactScore> = receiving
        .into_iter()
        .filter(|(contact, _)| *contact != self_name)
        .filter_map(|(contact, receiving_count)| {
            let sending_count = sending.get(contact).copied()?;

            Some(ContactScore {
                contact: contact.into(),
                display_name: String::new(),
                receiving_count,
                sending_count,
                score: score(receiving_count, sending_count),
            })
        })
        .collect();

    contacts.sort_by(|a, b| b.score.total_cmp(&a.score));

    contacts
}

fn counterpart_counts<'a, I>(rows: I) -> Vec<(&'a str, u32)>
where
    I: Iterator<Item = (&'a str, u32)>,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, u32)> = Vec::new();

    for (counterpart, count) in rows {
        match positions.get(counterpart) {
            Some(&position) => counts[position].1 += count,
            None => {
                positions.insert(counterpart, counts.len());
                counts.push((counterpart, count));
            }
        }
    }

    counts
}


/// Looks up display names for resolved contacts. Contacts without one are
/// recorded in [`Ranking::unresolved`] and handled according to `fallback`.
pub fn name<R>(
    contacts: Vec<ContactScore>,
    reader: &R,
    fallback: NameFallback,
) -> StoreResult<Ranking>
where
    R: ConnectionReader + ?Sized,
{
    let mut ranking = Ranking::default();

    for mut contact in contacts {
        let display_name = reader
            .note_for(&contact.contact)?
            .map(|note| clean_note(&note))
            .filter(|note| !note.is_empty());

        match display_name {
            Some(display_name) => {
                contact.display_name = display_name;
                ranking.contacts.push(contact);
            }
            None => {
                warn!("No display name found for {}", contact.contact);
                ranking.unresolved.push(contact.contact.clone());

                if fallback == NameFallback::Address {
                    contact.display_name = contact.contact.clone();
                    ranking.contacts.push(contact);
                }
            }
        }
    }

    Ok(ranking)
}

fn clean_note(note: &str) -> String {
    let ascii: String = note.chars().filter(char::is_ascii).collect();

    ascii.trim().trim_matches('"').trim().to_string()
}
