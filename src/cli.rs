use crate::mutual::NameFallback;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, PartialEq)]
#[command(version, about = "Ranks the people you exchange the most mail with")]
pub struct SingleCli {
    #[command(subcommand)]
    pub command: SingleCliCommands,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum SingleCliCommands {
    /// Scan an mbox archive and rank mutual contacts
    #[command(alias = "analyze")]
    Analyse(AnalyseArgs),
    /// View or change the stored configuration
    Config(ConfigArgs),
}

#[derive(Args, Debug, Default, PartialEq)]
pub struct AnalyseArgs {
    /// Path to the mbox archive
    #[arg(long)]
    pub mbox: PathBuf,
    /// Display name to show for your own addresses
    #[arg(long)]
    pub name: Option<String>,
    /// One of your own addresses; may be repeated
    #[arg(long = "address")]
    pub addresses: Vec<String>,
    /// Number of top contacts to show
    #[arg(long)]
    pub top: Option<usize>,
    /// SQLite database to store connection counts in
    #[arg(long, conflicts_with = "in_memory")]
    pub db: Option<PathBuf>,
    /// Keep connection counts in memory only
    #[arg(long)]
    pub in_memory: bool,
    /// What to show for contacts without a display name
    #[arg(long, value_enum)]
    pub name_fallback: Option<NameFallback>,
    /// Print the top contacts as JSON
    #[arg(long)]
    pub json: bool,
    /// Also write the top contacts as a Graphviz graph to this path
    #[arg(long)]
    pub dot: Option<PathBuf>,
}

#[derive(Args, Debug, PartialEq)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum ConfigCommands {
    /// Print the location of the configuration file
    Location,
    /// Store new configuration values
    Set(SetConfigArgs),
    /// Print the current configuration
    Show,
}

#[derive(Args, Debug, Default, PartialEq)]
pub struct SetConfigArgs {
    #[arg(long)]
    pub display_name: Option<String>,
    #[arg(long = "address")]
    pub addresses: Vec<String>,
    #[arg(long)]
    pub db_path: Option<String>,
    #[arg(long)]
    pub top: Option<usize>,
    #[arg(long, value_enum)]
    pub name_fallback: Option<NameFallback>,
}
