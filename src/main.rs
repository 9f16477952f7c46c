use std::{path::PathBuf, time::Duration};

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use crate::{
    commands::{DashboardCommand, execute},
    models::store::Store,
    settings::{
        Language, SettingsSource, Theme, default_settings_path, json::JsonFileSettings,
    },
    shell::Shell,
};

mod commands;
mod models;
mod services;
mod settings;
mod shell;
mod ui;

#[derive(Parser)]
#[command(
    name = "pdash",
    about = "Projects, team and tasks dashboard for your terminal"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Delay before each change is applied, overrides the settings file
    #[arg(long, global = true)]
    latency_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Dashboard(DashboardCommand),

    /// Show or change dashboard settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Open an interactive session on a single in-memory store
    Shell,
}

#[derive(Debug, Subcommand)]
enum SettingsCommands {
    /// Show the current settings
    Show,
    /// Change one or more settings
    Set {
        #[arg(long)]
        theme: Option<Theme>,

        #[arg(long)]
        language: Option<Language>,

        #[arg(long)]
        email_notifications: Option<bool>,

        /// Must start with https://
        #[arg(long)]
        api_url: Option<String>,

        #[arg(long = "latency")]
        latency: Option<u64>,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pdash={}", default_level)));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let settings_source = JsonFileSettings::new(cli.settings.unwrap_or_else(default_settings_path));

    let mut settings = match settings_source.load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };

    let latency = Duration::from_millis(cli.latency_ms.unwrap_or(settings.latency_ms));

    // Every run starts from the seed data, nothing is written back
    let mut store = Store::seeded();

    match cli.command {
        None => {
            if let Err(e) = execute(
                &mut store,
                DashboardCommand::Summary { json: false },
                latency,
            ) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Dashboard(command)) => {
            if let Err(e) = execute(&mut store, command, latency) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Some(Commands::Settings(SettingsCommands::Show)) => {
            ui::render_settings(&settings, settings_source.path());
        }
        Some(Commands::Settings(SettingsCommands::Set {
            theme,
            language,
            email_notifications,
            api_url,
            latency,
        })) => {
            if let Some(theme) = theme {
                settings.theme = theme;
            }
            if let Some(language) = language {
                settings.default_language = language;
            }
            if let Some(email_notifications) = email_notifications {
                settings.email_notifications = email_notifications;
            }
            if let Some(api_url) = api_url {
                settings.api_url = api_url;
            }
            if let Some(latency) = latency {
                settings.latency_ms = latency;
            }

            match settings_source.save(&settings) {
                Ok(()) => {
                    println!("✓ Settings saved");
                    ui::render_settings(&settings, settings_source.path());
                }
                Err(e) => {
                    eprintln!("Error: Failed to save settings: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Shell) => {
            let result = Shell::new(store, latency).and_then(|mut shell| shell.run());
            if let Err(e) = result {
                eprintln!("Error: Shell failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
