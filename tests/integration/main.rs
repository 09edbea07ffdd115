mod analyse_tests;
mod config_tests;

use assert_cmd::Command;
use assert_fs::fixture::TempDir;
use std::path::{Path, PathBuf};

pub const BINARY_NAME: &str = "contacts";

pub fn command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();

    cmd.env("HOME", home.to_str().unwrap())
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RUST_LOG");

    cmd
}

pub fn config_file_path(home: &TempDir) -> PathBuf {
    let mut path = home.path().to_path_buf();
    path.push(".config");
    path.push("mutual_contacts");
    path.push("default-config.toml");

    path
}
