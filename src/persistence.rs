use crate::errors::StoreError;
use crate::result::{AppResult, StoreResult};
use crate::scanner::Pairing;
use crate::store::{ConnectionAggregate, ConnectionReader, ConnectionWriter, CountRow};
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;

const CREATE_CONNECTIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS connections \
    ( \
        id INTEGER PRIMARY KEY, \
        from_address TEXT NOT NULL, \
        from_domain TEXT NOT NULL, \
        from_note TEXT NOT NULL, \
        to_address TEXT NOT NULL, \
        to_domain TEXT NOT NULL, \
        to_note TEXT NOT NULL, \
        count INTEGER NOT NULL, \
        UNIQUE (from_address, to_address) \
    )";


pub fn connect(path: &Path) -> AppResult<Connection> {
    Ok(Connection::open(path)?)
}

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> AppResult<Self> {
        Self::new(connect(path)?)
    }

    pub fn new(conn: Connection) -> AppResult<Self> {
        conn.execute(CREATE_CONNECTIONS_TABLE, [])?;

        Ok(Self { conn })
    }

    fn select_counts(&self, column: Column, addresses: &[String]) -> StoreResult<Vec<CountRow>> {
        if addresses.is_empty() {
            return Ok(vec![]);
        }

        let sql = format!(
            "SELECT from_address, to_address, count FROM connections \
            WHERE {} IN ({}) \
            ORDER BY count DESC, from_address, to_address",
            column.name(),
            vec!["?"; addresses.len()].join(", ")
        );

        let mut stmt = self.conn.prepare(&sql).map_err(StoreError::query)?;

        let rows = stmt
            .query_map(params_from_iter(addresses.iter()), |row| {
                Ok(CountRow {
                    from_address: row.get(0)?,
                    to_address: row.get(1)?,
                    count: row.get(2)?,
                })
            })
            .map_err(StoreError::query)?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::query)
    }
}

#[derive(Clone, Copy)]
enum Column {
    FromAddress,
    ToAddress,
}

impl Column {
    fn name(self) -> &'static str {
        match self {
            Self::FromAddress => "from_address",
            Self::ToAddress => "to_address",
        }
    }
}

#[cfg(test)]
mod writer_tests {
    use super::*;
    use crate::address::extract;

    #[test]
    fn creates_the_connections_table() {
        let store = store();

        assert!(store.conn.prepare("SELECT * FROM connections").is_ok())
    }

    #[test]
    fn inserts_new_pair_with_count_of_one() {
        let store = store();

        store.upsert(&alice_to_bob("Alice", "Bob")).unwrap();

        assert_eq!(
            vec![ConnectionAggregate::first_seen(&alice_to_bob("Alice", "Bob"))],
            store.aggregates().unwrap()
        );
    }

    #[test]
    fn counts_repeated_pairs_and_keeps_first_seen_fields() {
        let store = store();

        store.upsert(&alice_to_bob("Alice", "Bob")).unwrap();
        store.upsert(&alice_to_bob("Alice A", "Bob B")).unwrap();
        store.upsert(&alice_to_bob("", "")).unwrap();

        let aggregates = store.aggregates().unwrap();

        assert_eq!(1, aggregates.len());
        assert_eq!(3, aggregates[0].count);
        assert_eq!("Alice", aggregates[0].from_note);
        assert_eq!("Bob", aggregates[0].to_note);
    }

    #[test]
    fn begin_scan_replaces_rows_from_previous_run() {
        let mut store = store();

        store.upsert(&alice_to_bob("Alice", "Bob")).unwrap();
        store.begin_scan().unwrap();
        store.commit_scan().unwrap();

        assert!(store.aggregates().unwrap().is_empty());
    }

    #[test]
    fn uncommitted_scan_leaves_previous_run_in_place() {
        let temp = assert_fs::TempDir::new().unwrap();
        let db_path = temp.path().join("contacts.sqlite3");

        {
            let mut store = SqliteStore::open(&db_path).unwrap();
            store.begin_scan().unwrap();
            store.upsert(&alice_to_bob("Alice", "Bob")).unwrap();
            store.commit_scan().unwrap();
        }

        {
            let mut store = SqliteStore::open(&db_path).unwrap();
            store.begin_scan().unwrap();
            store.upsert(&alice_to_bob("Alice", "Bob")).unwrap();
            store.upsert(&alice_to_bob("Alice", "Bob")).unwrap();
        }

        let store = SqliteStore::open(&db_path).unwrap();
        let aggregates = store.aggregates().unwrap();

        assert_eq!(1, aggregates.len());
        assert_eq!(1, aggregates[0].count);
    }

    #[test]
    fn upsert_failure_is_returned_as_store_error() {
        let store = store();
        store.conn.execute("DROP TABLE connections", []).unwrap();

        let result = store.upsert(&alice_to_bob("Alice", "Bob"));

        assert!(matches!(
            result,
            Err(StoreError::Upsert { ref from, ref to, .. })
                if from == "alice@test.zzz" && to == "bob@test.zzz"
        ));
    }

    fn store() -> SqliteStore {
        SqliteStore::new(Connection::open_in_memory().unwrap()).unwrap()
    }

    fn alice_to_bob(sender_note: &str, receiver_note: &str) -> Pairing {
        Pairing {
            sender: extract(&format!("From: {sender_note} <alice@test.zzz>")).unwrap(),
            receiver: extract(&format!("To: {receiver_note} <bob@test.zzz>")).unwrap(),
        }
    }
}

impl ConnectionWriter for SqliteStore {
    fn begin_scan(&mut self) -> StoreResult<()> {
        self.conn
            .execute_batch(&format!(
                "BEGIN; DROP TABLE IF EXISTS connections; {CREATE_CONNECTIONS_TABLE};"
            ))
            .map_err(StoreError::transaction)
    }

    fn upsert(&self, pairing: &Pairing) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT INTO connections \
                (from_address, from_domain, from_note, to_address, to_domain, to_note, count) \
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1) \
                ON CONFLICT (from_address, to_address) DO UPDATE SET count = count + 1",
                (
                    &pairing.sender.address,
                    &pairing.sender.domain,
                    &pairing.sender.note,
                    &pairing.receiver.address,
                    &pairing.receiver.domain,
                    &pairing.receiver.note,
                ),
            )
            .map(|_| ())
            .map_err(|e| StoreError::Upsert {
                from: pairing.sender.address.clone(),
                to: pairing.receiver.address.clone(),
                reason: e.to_string(),
            })
    }

    fn commit_scan(&mut self) -> StoreResult<()> {
        if self.conn.is_autocommit() {
            return Ok(());
        }

        self.conn
            .execute_batch("COMMIT")
            .map_err(StoreError::transaction)
    }
}


impl ConnectionReader for SqliteStore {
    fn outbound(&self, addresses: &[String]) -> StoreResult<Vec<CountRow>> {
        self.select_counts(Column::FromAddress, addresses)
    }

    fn inbound(&self, addresses: &[String]) -> StoreResult<Vec<CountRow>> {
        self.select_counts(Column::ToAddress, addresses)
    }

    fn note_for(&self, address: &str) -> StoreResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT from_note FROM connections WHERE from_address = ?1 ORDER BY id LIMIT 1",
                [address],
                |row| row.get(0),
            )
            .optional()
            .map_err(StoreError::query)
    }

    fn aggregates(&self) -> StoreResult<Vec<ConnectionAggregate>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT from_address, from_domain, from_note, to_address, to_domain, to_note, count \
                FROM connections ORDER BY id",
            )
            .map_err(StoreError::query)?;

        let rows = stmt
            .query_map([], aggregate_from_row)
            .map_err(StoreError::query)?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::query)
    }
}

fn aggregate_from_row(row: &Row) -> rusqlite::Result<ConnectionAggregate> {
    Ok(ConnectionAggregate {
        from_address: row.get(0)?,
        from_domain: row.get(1)?,
        from_note: row.get(2)?,
        to_address: row.get(3)?,
        to_domain: row.get(4)?,
        to_note: row.get(5)?,
        count: row.get(6)?,
    })
}
