use crate::cli::{AnalyseArgs, ConfigArgs, ConfigCommands, SetConfigArgs, SingleCli, SingleCliCommands};
use crate::identity::IdentitySet;
use crate::mutual::NameFallback;
use crate::pipeline::RunOptions;
use crate::result::AppResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const APP_NAME: &str = "mutual_contacts";
pub const DEFAULT_TOP: usize = 10;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct FileConfig {
    pub addresses: Option<Vec<String>>,
    pub db_path: Option<String>,
    pub display_name: Option<String>,
    pub name_fallback: Option<NameFallback>,
    pub top: Option<usize>,
}

pub trait Configuration {
    fn analyse_settings(&self) -> Option<&AnalyseSettings>;

    fn config_file_entries(&self) -> Vec<(String, Option<String>)>;

    fn config_file_location(&self) -> &Path;

    fn service_type(&self) -> ServiceType;

    fn store_config(&mut self) -> AppResult<()>;
}

#[derive(Debug, Error, PartialEq)]
pub enum ServiceConfigurationError {
    #[error("Error reading configuration file")]
    ConfigFileReadError,
    #[error("Please provide a display name with --name or `config set --display-name`")]
    MissingDisplayName,
    #[error("Please provide at least one of your addresses with --address or `config set --address`")]
    NoOwnAddresses,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ServiceType {
    Analyse,
    Config(ConfigServiceCommands),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigServiceCommands {
    Location,
    Set,
    Show,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StoreLocation {
    InMemory,
    Path(PathBuf),
}

/// Everything an analyse run needs, with CLI arguments taking precedence
/// over the config file.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyseSettings {
    pub dot: Option<PathBuf>,
    pub identity: IdentitySet,
    pub json: bool,
    pub mbox: PathBuf,
    pub name_fallback: NameFallback,
    pub store: StoreLocation,
    pub top: usize,
}

impl AnalyseSettings {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            identity: self.identity.clone(),
            name_fallback: self.name_fallback,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct ServiceConfiguration<'a> {
    analyse_settings: Option<AnalyseSettings>,
    config_file: FileConfig,
    config_file_location: &'a Path,
    service_type: ServiceType,
    set_config_args: Option<&'a SetConfigArgs>,
}

impl<'a> ServiceConfiguration<'a> {
    pub fn new(
        cli_parameters: &'a SingleCli,
        config_file_location: &'a Path,
    ) -> Result<Self, ServiceConfigurationError> {
        let config_file = confy::load_path::<FileConfig>(config_file_location)
            .map_err(|_| ServiceConfigurationError::ConfigFileReadError)?;

        let service_type = determine_service_type(cli_parameters);

        match &cli_parameters.command {
            SingleCliCommands::Analyse(args) => Ok(Self {
                analyse_settings: Some(build_analyse_settings(args, &config_file)?),
                config_file,
                config_file_location,
                service_type,
                set_config_args: None,
            }),
            SingleCliCommands::Config(ConfigArgs { command }) => {
                let set_config_args = match command {
                    ConfigCommands::Set(args) => Some(args),
                    _ => None,
                };

                Ok(Self {
                    analyse_settings: None,
                    config_file,
                    config_file_location,
                    service_type,
                    set_config_args,
                })
            }
        }
    }
}

impl<'a> Configuration for ServiceConfiguration<'a> {
    fn analyse_settings(&self) -> Option<&AnalyseSettings> {
        self.analyse_settings.as_ref()
    }

    fn config_file_entries(&self) -> Vec<(String, Option<String>)> {
        let config = &self.config_file;

        vec![
            (
                "addresses".into(),
                config.addresses.as_ref().map(|addresses| addresses.join(", ")),
            ),
            ("db_path".into(), config.db_path.clone()),
            ("display_name".into(), config.display_name.clone()),
            (
                "name_fallback".into(),
                config.name_fallback.map(|fallback| name_fallback_label(fallback).into()),
            ),
            ("top".into(), config.top.map(|top| top.to_string())),
        ]
    }

    fn config_file_location(&self) -> &Path {
        self.config_file_location
    }

    fn service_type(&self) -> ServiceType {
        self.service_type
    }

    fn store_config(&mut self) -> AppResult<()> {
        if let Some(new_config) = new_contents(&self.config_file, self.set_config_args) {
            confy::store_path(self.config_file_location, &new_config)?;
            self.config_file = new_config;
        }

        Ok(())
    }
}

fn determine_service_type(cli_parameters: &SingleCli) -> ServiceType {
    match &cli_parameters.command {
        SingleCliCommands::Analyse(_) => ServiceType::Analyse,
        SingleCliCommands::Config(ConfigArgs { command }) => match command {
            ConfigCommands::Location => ServiceType::Config(ConfigServiceCommands::Location),
            ConfigCommands::Set(_) => ServiceType::Config(ConfigServiceCommands::Set),
            ConfigCommands::Show => ServiceType::Config(ConfigServiceCommands::Show),
        },
    }
}

fn name_fallback_label(fallback: NameFallback) -> &'static str {
    match fallback {
        NameFallback::Address => "address",
        NameFallback::Exclude => "exclude",
    }
}


fn build_analyse_settings(
    args: &AnalyseArgs,
    config: &FileConfig,
) -> Result<AnalyseSettings, ServiceConfigurationError> {
    let display_name = args
        .name
        .as_deref()
        .or(config.display_name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ServiceConfigurationError::MissingDisplayName)?;

    let addresses: &[String] = if args.addresses.is_empty() {
        config.addresses.as_deref().unwrap_or_default()
    } else {
        &args.addresses
    };

    let identity = IdentitySet::new(display_name, addresses);

    if identity.is_empty() {
        return Err(ServiceConfigurationError::NoOwnAddresses);
    }

    let store = if args.in_memory {
        StoreLocation::InMemory
    } else {
        StoreLocation::Path(
            args.db
                .clone()
                .or_else(|| config.db_path.as_ref().map(PathBuf::from))
                .unwrap_or_else(|| default_db_path(display_name)),
        )
    };

    Ok(AnalyseSettings {
        dot: args.dot.clone(),
        identity,
        json: args.json,
        mbox: args.mbox.clone(),
        name_fallback: args
            .name_fallback
            .or(config.name_fallback)
            .unwrap_or_default(),
        store,
        top: args.top.or(config.top).unwrap_or(DEFAULT_TOP),
    })
}

fn default_db_path(display_name: &str) -> PathBuf {
    let stem: String = display_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    PathBuf::from(format!("{stem}_contacts.sqlite3"))
}


fn new_contents(current: &FileConfig, args: Option<&SetConfigArgs>) -> Option<FileConfig> {
    let args = args?;

    Some(FileConfig {
        addresses: if args.addresses.is_empty() {
            current.addresses.clone()
        } else {
            Some(args.addresses.clone())
        },
        db_path: args.db_path.clone().or_else(|| current.db_path.clone()),
        display_name: args
            .display_name
            .clone()
            .or_else(|| current.display_name.clone()),
        name_fallback: args.name_fallback.or(current.name_fallback),
        top: args.top.or(current.top),
    })
}
