// src/main.rs

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use questionnaire_store::config::Config;
use questionnaire_store::error::AppError;
use questionnaire_store::handlers::{catalog, statistics, transfer};
use questionnaire_store::models::User;
use questionnaire_store::reducer::Action;
use questionnaire_store::storage::{FileStorage, StorageSlot};
use questionnaire_store::store::Store;
use questionnaire_store::utils::{hash::hash_password, ids::new_id};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

type FileStore = Store<StorageSlot<FileStorage>>;

#[derive(Parser, Debug)]
#[command(
    name = "questionnaire-store",
    version,
    about = "Inspect and move questionnaires in the local store"
)]
struct Cli {
    /// Defaults to `summary`.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List questionnaires with question and completion counts
    Summary,
    /// Print response statistics for one questionnaire
    Stats {
        /// Questionnaire id
        id: String,
    },
    /// Write one questionnaire to a JSON file
    Export {
        /// Questionnaire id
        id: String,
        file: PathBuf,
    },
    /// Add a questionnaire from a JSON file under fresh ids
    Import { file: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load .env file (if present)
    dotenv().ok();

    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "store.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let storage = FileStorage::new(&config.data_dir);
    let mut store = Store::new(StorageSlot::new(storage, config.storage_key.clone()));
    tracing::info!("Store opened at {}", config.data_dir.display());

    if let Err(e) = seed_admin_user(&mut store, &config) {
        tracing::error!("Failed to seed admin user: {}", e);
    }

    let command = cli.command.unwrap_or(Command::Summary);
    match run_command(&mut store, &config, command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn seed_admin_user(store: &mut FileStore, config: &Config) -> Result<(), AppError> {
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        if store.state().user_by_email(email).is_none() {
            tracing::info!("Seeding admin user: {}", email);
            store.dispatch(Action::AddUser(User {
                id: new_id(),
                email: email.clone(),
                password: Some(hash_password(password)?),
            }))?;
            tracing::info!("Admin user created successfully.");
        }
    }
    Ok(())
}

fn run_command(store: &mut FileStore, config: &Config, command: Command) -> Result<(), AppError> {
    match command {
        Command::Summary => {
            for summary in catalog::list_questionnaires(&store.state(), None) {
                println!(
                    "{}  {}  questions: {}  completions: {}",
                    summary.id, summary.title, summary.question_count, summary.completion_count
                );
            }
            Ok(())
        }
        Command::Stats { id } => {
            let stats = statistics::questionnaire_statistics(&store.state(), &id)?;
            println!("{}: {} responses", stats.title, stats.total_responses);
            println!(
                "average time: {}",
                statistics::format_duration(stats.average_time_seconds)
            );
            let rendered = serde_json::to_string_pretty(&stats.questions)
                .map_err(|e| AppError::InternalServerError(e.to_string()))?;
            println!("{}", rendered);
            Ok(())
        }
        Command::Export { id, file } => {
            let export = transfer::export_questionnaire(&store.state(), &id)?;
            std::fs::write(&file, export.to_json()?)?;
            tracing::info!("Exported questionnaire {} to {}", id, file.display());
            Ok(())
        }
        Command::Import { file } => import_file(store, config, &file),
    }
}

fn import_file(store: &mut FileStore, config: &Config, file: &Path) -> Result<(), AppError> {
    let json = std::fs::read_to_string(file)?;
    let owner = import_owner(store, config)
        .ok_or(AppError::BadRequest("No user to own the import".to_string()))?;
    let id = transfer::import_questionnaire(store, &json, &owner)?;
    println!("{}", id);
    Ok(())
}

/// The signed-in user, falling back to the configured admin.
fn import_owner(store: &FileStore, config: &Config) -> Option<String> {
    let state = store.state();
    state
        .current_user
        .as_ref()
        .or_else(|| {
            config
                .admin_email
                .as_deref()
                .and_then(|email| state.user_by_email(email))
        })
        .map(|user| user.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_summary_is_the_default() {
        let cli = Cli::try_parse_from(["questionnaire-store"]).unwrap();
        assert_eq!(cli.command, None);

        let cli = Cli::try_parse_from(["questionnaire-store", "summary"]).unwrap();
        assert_eq!(cli.command, Some(Command::Summary));
    }

    #[test]
    fn test_subcommand_arguments() {
        let cli = Cli::try_parse_from(["questionnaire-store", "export", "q1", "out.json"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Export {
                id: "q1".to_string(),
                file: PathBuf::from("out.json"),
            })
        );

        let cli = Cli::try_parse_from(["questionnaire-store", "import", "in.json"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Import {
                file: PathBuf::from("in.json"),
            })
        );
    }

    #[test]
    fn test_missing_argument_and_help_are_reported_by_clap() {
        let err = Cli::try_parse_from(["questionnaire-store", "stats"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let err = Cli::try_parse_from(["questionnaire-store", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);

        let err = Cli::try_parse_from(["questionnaire-store", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
