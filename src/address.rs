use serde::Serialize;

const SURROUNDING_CHARS: &[char] = &['"', '\'', ',', ' ', '(', ')', '<', '>'];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AddressRecord {
    pub address: String,
    pub domain: String,
    pub note: String,
}


pub fn extract(line: &str) -> Option<AddressRecord> {
    let pieces: Vec<&str> = line.split_whitespace().collect();

    pieces.iter().find_map(|piece| {
        let (local, rest) = piece.split_once('@')?;
        let domain = rest.split('>').next().unwrap_or_default();

        if domain.contains('@') {
            return None;
        }

        let address = format!("{}@{}", local.trim_matches('<'), domain);

        Some(AddressRecord {
            address: address.trim_matches(SURROUNDING_CHARS).to_lowercase(),
            domain: domain.trim_matches(SURROUNDING_CHARS).to_lowercase(),
            note: note(&pieces),
        })
    })
}

fn note(pieces: &[&str]) -> String {
    if pieces.len() > 2 {
        pieces[1..pieces.len() - 1].join(" ")
    } else {
        String::new()
    }
}
