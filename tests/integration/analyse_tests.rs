use crate::{command, config_file_path};
use assert_fs::fixture::TempDir;
use assert_fs::prelude::*;
use assert_json_diff::assert_json_eq;
use predicates::prelude::*;
use serde::Serialize;
use serde_json::json;

#[test]
fn ranks_mutual_contacts() {
    let temp = TempDir::new().unwrap();
    let mbox = archive(&temp);

    command(temp.path())
        .args([
            "analyse",
            "--mbox",
            mbox.to_str().unwrap(),
            "--name",
            "Alice",
            "--address",
            "a@x.com",
            "--in-memory",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Scanned 20 lines: 5 sender/receiver pairs, 0 skipped")
                .and(predicate::str::contains("b@y.com"))
                .and(predicate::str::contains("2.45")),
        );
}

#[test]
fn prints_json_ranking() {
    let temp = TempDir::new().unwrap();
    let mbox = archive(&temp);

    let output = command(temp.path())
        .args([
            "analyse",
            "--mbox",
            mbox.to_str().unwrap(),
            "--name",
            "Alice",
            "--address",
            "a@x.com",
            "--in-memory",
            "--json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());

    let actual: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_json_eq!(
        json!([
            {
                "contact": "b@y.com",
                "display_name": "B",
                "receiving_count": 2,
                "sending_count": 3,
                "score": 2.45
            }
        ]),
        actual
    );
}

#[test]
fn folds_every_own_address_into_the_display_name() {
    let temp = TempDir::new().unwrap();
    let mbox = temp.child("aliases.mbox");
    mbox.write_str(
        "From: a@x.com\n\
        To: b@y.com\n\
        From: A <a@work.com>\n\
        To: b@y.com\n\
        From: B <b@y.com>\n\
        To: a@work.com\n",
    )
    .unwrap();

    command(temp.path())
        .args([
            "analyse",
            "--mbox",
            mbox.path().to_str().unwrap(),
            "--name",
            "Alice",
            "--address",
            "a@x.com",
            "--address",
            "A@Work.com",
            "--in-memory",
            "--json",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"sending_count\": 2")
                .and(predicate::str::contains("\"receiving_count\": 1"))
                .and(predicate::str::contains("\"score\": 1.41")),
        );
}

#[test]
fn reads_identity_from_config_file() {
    let temp = TempDir::new().unwrap();
    let mbox = archive(&temp);

    store_config(&temp);

    command(temp.path())
        .args(["analyze", "--mbox", mbox.to_str().unwrap(), "--in-memory"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2.45"));
}

#[test]
fn writes_counts_to_the_database() {
    let temp = TempDir::new().unwrap();
    let mbox = archive(&temp);
    let db = temp.child("alice.sqlite3");

    command(temp.path())
        .args([
            "analyse",
            "--mbox",
            mbox.to_str().unwrap(),
            "--name",
            "Alice",
            "--address",
            "a@x.com",
            "--db",
            db.path().to_str().unwrap(),
        ])
        .assert()
        .success();

    db.assert(predicate::path::exists());

    let conn = rusqlite::Connection::open(db.path()).unwrap();
    let count: u32 = conn
        .query_row(
            "SELECT count FROM connections WHERE from_address = 'a@x.com' AND to_address = 'b@y.com'",
            [],
            |row| row.get(0),
        )
        .unwrap();

    assert_eq!(3, count);
}

#[test]
fn writes_dot_graph() {
    let temp = TempDir::new().unwrap();
    let mbox = archive(&temp);
    let dot = temp.child("contacts.dot");

    command(temp.path())
        .args([
            "analyse",
            "--mbox",
            mbox.to_str().unwrap(),
            "--name",
            "Alice",
            "--address",
            "a@x.com",
            "--in-memory",
            "--dot",
            dot.path().to_str().unwrap(),
        ])
        .assert()
        .success();

    dot.assert(predicate::str::contains(
        "\"self\" -- \"b@y.com\" [label=\"2.45\"]",
    ));
}

#[test]
fn fails_with_run_error_when_archive_is_missing() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.mbox");

    command(temp.path())
        .args([
            "analyse",
            "--mbox",
            missing.to_str().unwrap(),
            "--name",
            "Alice",
            "--address",
            "a@x.com",
            "--in-memory",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing.mbox"));
}

#[test]
fn fails_with_config_error_without_own_addresses() {
    let temp = TempDir::new().unwrap();
    let mbox = archive(&temp);

    command(temp.path())
        .args([
            "analyse",
            "--mbox",
            mbox.to_str().unwrap(),
            "--name",
            "Alice",
            "--in-memory",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--address"));
}

fn archive(temp: &TempDir) -> std::path::PathBuf {
    let mbox = temp.child("archive.mbox");
    mbox.write_str(
        "From: A <a@x.com>\n\
        To: B <b@y.com>\n\
        \n\
        From: A <a@x.com>\n\
        Subject: hi\n\
        To: B <b@y.com>\n\
        \n\
        From: A <a@x.com>\n\
        \n\
        To: B <b@y.com>\n\
        From: B <b@y.com>\n\
        To: A <a@x.com>\n\
        From: B <b@y.com>\n\
        To: A <a@x.com>\n\
        From: C <c@z.com>\n\
        Subject: no receiver\n\
        \n\
        \n\
        \n\
        \n",
    )
    .unwrap();

    mbox.path().to_path_buf()
}

fn store_config(temp: &TempDir) {
    #[derive(Serialize)]
    struct TestConfig<'a> {
        addresses: Vec<&'a str>,
        display_name: &'a str,
    }

    let config = TestConfig {
        addresses: vec!["a@x.com"],
        display_name: "Alice",
    };

    confy::store_path(config_file_path(temp), config).unwrap();
}
