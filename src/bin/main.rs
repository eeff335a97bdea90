#![warn(clippy::all)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

mod config;
mod database;
mod state;
mod windows;

use std::process::ExitCode;

use config::AppConfig;
use database::{connection::ConnectionFactory, repository::DieselRecipeRepository};
use eframe::NativeOptions;
use egui::{FontId, Style, ViewportBuilder, Visuals};
use tracing::level_filters::LevelFilter;
use tracing::{error, event, trace_span, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::Registry;
use windows::main_window::MainWindow;

fn main() -> ExitCode {
    let config = AppConfig::from_env();
    let log_level = config
        .as_ref()
        .map(|config| config.log_level)
        .unwrap_or(LevelFilter::INFO);

    let stdout_log = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::ACTIVE)
        .pretty();
    let subscriber = Registry::default().with(stdout_log).with(log_level);

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Unable to set global subscriber: {e}");
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    match start(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Application stopped: {e}");
            ExitCode::FAILURE
        }
    }
}

fn start(config: AppConfig) -> eframe::Result<()> {
    let span = trace_span!("starting main");
    let _guard = span.enter();

    event!(Level::TRACE, "creating connection factory");
    let factory = ConnectionFactory::from_config(&config.database);
    let repository = DieselRecipeRepository::new(factory);

    let options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("Recipe Manager")
            .with_inner_size([1000f32, 650f32]),
        ..NativeOptions::default()
    };

    eframe::run_native(
        "Recipe Manager",
        options,
        Box::new(|creation_context| {
            let style = Style {
                visuals: Visuals::dark(),
                override_font_id: Some(FontId::proportional(17f32)),
                ..Style::default()
            };

            creation_context.egui_ctx.set_style(style);
            Ok(Box::new(MainWindow::new(creation_context, repository)))
        }),
    )
}
