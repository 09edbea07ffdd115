use crate::mutual::{ContactScore, Ranking};
use crate::result::AppResult;
use crate::scanner::ScanSummary;

use prettytable::{Cell, Row, Table};


pub fn display_ranking(ranking: &Ranking, top: usize) -> AppResult<String> {
    let mut table = Table::new();

    table.add_row(Row::new(vec![
        Cell::new("Contact"),
        Cell::new("Name"),
        Cell::new("Receiving"),
        Cell::new("Sending"),
        Cell::new("Score"),
    ]));

    for contact in ranking.top(top) {
        contact_row(&mut table, contact);
    }

    table_to_string(&table)
}

fn contact_row(table: &mut Table, contact: &ContactScore) {
    table.add_row(Row::new(vec![
        Cell::new(&contact.contact),
        Cell::new(&contact.display_name),
        Cell::new(&contact.receiving_count.to_string()),
        Cell::new(&contact.sending_count.to_string()),
        Cell::new(&format!("{:.2}", contact.score)),
    ]));
}

fn table_to_string(table: &Table) -> AppResult<String> {
    let mut buffer: Vec<u8> = Vec::new();

    table.print(&mut buffer)?;

    Ok(String::from_utf8(buffer)?)
}


pub fn display_unresolved(ranking: &Ranking) -> Option<String> {
    if ranking.unresolved.is_empty() {
        return None;
    }

    let mut output = format!("Unresolved names ({}):\n", ranking.unresolved.len());

    for address in &ranking.unresolved {
        output.push_str(&format!("  {address}\n"));
    }

    Some(output)
}


pub fn display_summary(summary: &ScanSummary) -> String {
    format!(
        "Scanned {} lines: {} sender/receiver pairs, {} skipped",
        summary.lines, summary.pairings, summary.upsert_failures
    )
}
