use crate::address::{extract, AddressRecord};
use crate::result::AppResult;
use crate::store::ConnectionWriter;
use log::{debug, info, warn};

pub const LOOKAHEAD_LINES: usize = 5;

const FROM_PREFIX: &str = "From: ";
const TO_PREFIX: &str = "To: ";
const LINE_ENDINGS: &[char] = &['\r', '\n'];

#[derive(Clone, Debug, PartialEq)]
pub struct Pairing {
    pub sender: AddressRecord,
    pub receiver: AddressRecord,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ScanState {
    #[default]
    SeekingFrom,
    SeekingTo {
        sender: AddressRecord,
        remaining: usize,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScanSummary {
    pub lines: usize,
    pub pairings: usize,
    pub upsert_failures: usize,
}


impl ScanState {
    pub fn advance(self, line: &str) -> (ScanState, Option<Pairing>) {
        let line = line.trim_end_matches(LINE_ENDINGS);

        match self {
            Self::SeekingFrom => match field(line, FROM_PREFIX) {
                Some(sender) => (
                    Self::SeekingTo {
                        sender,
                        remaining: LOOKAHEAD_LINES,
                    },
                    None,
                ),
                None => (Self::SeekingFrom, None),
            },
            Self::SeekingTo { sender, remaining } => match field(line, TO_PREFIX) {
                Some(receiver) => (Self::SeekingFrom, Some(Pairing { sender, receiver })),
                None if remaining > 1 => (
                    Self::SeekingTo {
                        sender,
                        remaining: remaining - 1,
                    },
                    None,
                ),
                None => (Self::SeekingFrom, None),
            },
        }
    }
}

fn field(line: &str, prefix: &str) -> Option<AddressRecord> {
    if line.starts_with(prefix) {
        extract(line)
    } else {
        None
    }
}


pub fn pairings<I, S>(lines: I) -> impl Iterator<Item = Pairing>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut state = ScanState::default();

    lines.into_iter().filter_map(move |line| {
        let (next, pairing) = std::mem::take(&mut state).advance(line.as_ref());
        state = next;
        pairing
    })
}


pub fn scan<I, S, W>(lines: I, store: &W) -> AppResult<ScanSummary>
where
    I: IntoIterator<Item = AppResult<S>>,
    S: AsRef<str>,
    W: ConnectionWriter + ?Sized,
{
    let mut summary = ScanSummary::default();
    let mut state = ScanState::default();

    for line in lines {
        let line = line?;
        summary.lines += 1;

        let (next, pairing) = std::mem::take(&mut state).advance(line.as_ref());
        state = next;

        if let Some(pairing) = pairing {
            summary.pairings += 1;

            debug!(
                "{} -> {}",
                pairing.sender.address, pairing.receiver.address
            );

            if let Err(e) = store.upsert(&pairing) {
                warn!("Skipping record: {e}");
                summary.upsert_failures += 1;
            }
        }
    }

    info!(
        "Scanned {} lines, found {} pairings, skipped {}",
        summary.lines, summary.pairings, summary.upsert_failures
    );

    Ok(summary)
}
