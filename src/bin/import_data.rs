#![warn(clippy::all)]

mod config;
mod data_loader;
mod database;

use std::{env, path::PathBuf, process::ExitCode};

use config::AppConfig;
use data_loader::{
    data_loader::DataLoader, database_loader::store_recipe_book, error::ImportError,
    json_loader::JsonLoader,
};
use database::connection::ConnectionFactory;
use tracing::{error, info, trace_span};
use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;

const DEFAULT_BOOK_PATH: &str = "resources/json/sample_recipes.json";

fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let stdout_log = tracing_subscriber::fmt::layer().pretty();
    let subscriber = Registry::default().with(stdout_log).with(config.log_level);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Unable to set global subscriber: {e}");
    }

    let path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BOOK_PATH));

    match import(&config, path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Import failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn import(config: &AppConfig, path: PathBuf) -> Result<(), ImportError> {
    let span = trace_span!("import");
    let _guard = span.enter();

    info!(path = %path.display(), "Starting import");
    let book = JsonLoader::new(path).load_recipe_book()?;

    let factory = ConnectionFactory::from_config(&config.database);
    let mut connection = factory.open()?;

    let summary = store_recipe_book(&mut connection, &book)?;

    info!(
        ingredients = summary.ingredients,
        recipes = summary.recipes,
        links = summary.links,
        "End import"
    );

    Ok(())
}
