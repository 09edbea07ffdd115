use crate::{command, config_file_path};
use assert_fs::fixture::TempDir;
use predicates::prelude::*;
use serde::Serialize;

#[test]
fn shows_path_to_config_file() {
    let temp = TempDir::new().unwrap();
    let expected_path = config_file_path(&temp);

    command(temp.path())
        .args(["config", "location"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected_path.to_str().unwrap()));
}

#[test]
fn lists_current_config_contents() {
    let temp = TempDir::new().unwrap();

    store_config(&temp);

    command(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("display_name: Fred Flintstone")
                .and(predicate::str::contains("addresses: fred@bedrock.zzz")),
        );
}

#[test]
fn sets_config() {
    let temp = TempDir::new().unwrap();

    store_config(&temp);

    command(temp.path())
        .args([
            "config",
            "set",
            "--display-name",
            "Barney Rubble",
            "--top",
            "3",
            "--name-fallback",
            "exclude",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("display_name: Barney Rubble")
                .and(predicate::str::contains("addresses: fred@bedrock.zzz"))
                .and(predicate::str::contains("top: 3"))
                .and(predicate::str::contains("name_fallback: exclude")),
        );

    command(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("display_name: Barney Rubble"));
}

fn store_config(temp: &TempDir) {
    #[derive(Serialize)]
    struct TestConfig<'a> {
        addresses: Vec<&'a str>,
        display_name: &'a str,
    }

    let config = TestConfig {
        addresses: vec!["fred@bedrock.zzz"],
        display_name: "Fred Flintstone",
    };

    confy::store_path(config_file_path(temp), config).unwrap();
}
