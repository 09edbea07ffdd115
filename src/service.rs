use crate::archive;
use crate::errors::AppError;
use crate::graph::render_dot;
use crate::memory_store::MemoryStore;
use crate::persistence::SqliteStore;
use crate::pipeline::{run, RunOutcome};
use crate::result::AppResult;
use crate::service_configuration::{
    AnalyseSettings, ConfigServiceCommands, Configuration, ServiceType, StoreLocation,
};
use crate::ui::{display_ranking, display_summary, display_unresolved};

pub struct Service;

impl Service {
    pub fn run<T>(config: &mut T) -> AppResult<String>
    where
        T: Configuration,
    {
        match config.service_type() {
            ServiceType::Analyse => {
                let settings = config
                    .analyse_settings()
                    .ok_or(AppError::NothingToAnalyse)?;

                Self::analyse(settings)
            }
            ServiceType::Config(ConfigServiceCommands::Location) => {
                Ok(config.config_file_location().display().to_string())
            }
            ServiceType::Config(ConfigServiceCommands::Show) => Ok(Self::display_config(config)),
            ServiceType::Config(ConfigServiceCommands::Set) => {
                config.store_config()?;

                Ok(Self::display_config(config))
            }
        }
    }

    fn analyse(settings: &AnalyseSettings) -> AppResult<String> {
        let lines = archive::open(&settings.mbox)?;
        let options = settings.run_options();

        let outcome = match &settings.store {
            StoreLocation::InMemory => run(lines, MemoryStore::new(), &options)?,
            StoreLocation::Path(path) => run(lines, SqliteStore::open(path)?, &options)?,
        };

        let top = outcome.ranking.top(settings.top);

        if let Some(path) = &settings.dot {
            std::fs::write(path, render_dot(options.identity.display_name(), top))?;
        }

        if settings.json {
            return Ok(serde_json::to_string_pretty(top)?);
        }

        Self::present(&outcome, settings.top)
    }

    fn present(outcome: &RunOutcome, top: usize) -> AppResult<String> {
        let mut sections = vec![
            display_summary(&outcome.summary),
            display_ranking(&outcome.ranking, top)?,
        ];

        if let Some(unresolved) = display_unresolved(&outcome.ranking) {
            sections.push(unresolved);
        }

        Ok(sections.join("\n"))
    }

    fn display_config<T>(config: &T) -> String
    where
        T: Configuration,
    {
        config
            .config_file_entries()
            .into_iter()
            .map(|(key, value)| format!("{key}: {}", value.unwrap_or_default()))
            .collect::<Vec<String>>()
            .join("\n")
    }
}
