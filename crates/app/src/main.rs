mod dashboard;
mod endpoint;
mod render;
mod telemetry;

use std::process::ExitCode;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use jobdeck_client::{JobStoreClient, JobStoreError};
use jobdeck_core::types::{DateSort, DraftError, FilterCriteria, Intent, JobDraft, JobStatus};
use jobdeck_storage::{SettingsError, SettingsStore};
use jobdeck_util::{load_env_file, AppConfig};

use crate::dashboard::Dashboard;
use crate::endpoint::StoredEndpoint;

#[derive(Debug, Parser)]
#[command(
    name = "jobdeck",
    about = "Track job applications stored in a remote service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List applications with optional filtering and sorting.
    List {
        /// Only show applications with this status.
        #[arg(long)]
        status: Option<JobStatus>,
        /// Sort by applied date: newest or oldest.
        #[arg(long, default_value = "newest")]
        sort: DateSort,
    },
    /// Record a new application.
    Add {
        #[arg(long)]
        company: String,
        #[arg(long)]
        role: String,
        #[arg(long, default_value = "applied")]
        status: JobStatus,
        /// Applied date (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        applied: Option<NaiveDate>,
        /// Posting URL.
        #[arg(long, default_value = "")]
        link: String,
    },
    /// Edit an application; omitted fields keep their current value.
    Edit {
        id: String,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        status: Option<JobStatus>,
        #[arg(long)]
        applied: Option<NaiveDate>,
        #[arg(long)]
        link: Option<String>,
    },
    /// Move an application to a new status.
    SetStatus { id: String, status: JobStatus },
    /// Delete an application.
    Delete { id: String },
    /// Show or change the backend API URL.
    Config {
        /// Persist a new base URL; takes effect on the next command.
        #[arg(long)]
        set_url: Option<String>,
    },
}

#[derive(Debug, Error)]
enum AppError {
    #[error("failed to build http client: {0}")]
    Http(reqwest::Error),
    #[error(transparent)]
    Store(#[from] JobStoreError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Draft(#[from] DraftError),
    #[error("no job application with id {0:?}")]
    UnknownId(String),
    #[error("failed to load jobs from the remote service")]
    LoadFailed,
}

#[tokio::main]
async fn main() -> ExitCode {
    load_env_file();
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = telemetry::init_tracing(&config) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    telemetry::describe_metrics();

    info!(stage = "app", env = %config.environment.as_str(), "jobdeck starting");

    let store = SettingsStore::open(&config.settings_path);
    match run(cli.command, store).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, store: SettingsStore) -> Result<(), AppError> {
    let command = match command {
        Command::Config { set_url } => return run_config(set_url.as_deref(), &store),
        other => other,
    };

    let http = reqwest::Client::builder().build().map_err(AppError::Http)?;
    let client = JobStoreClient::new(Arc::new(StoredEndpoint::new(store)), http);
    let mut dashboard = Dashboard::new(client);
    let today = Local::now().date_naive();

    match command {
        Command::List { status, sort } => {
            dashboard
                .dispatch(Intent::FilterChanged {
                    criteria: FilterCriteria {
                        status,
                        date_sort: sort,
                    },
                })
                .await?;
            load_or_bail(&mut dashboard, today).await?;
        }
        Command::Add {
            company,
            role,
            status,
            applied,
            link,
        } => {
            let draft = JobDraft {
                company,
                role,
                status,
                applied_date: applied.unwrap_or(today),
                link,
            };
            draft.validate()?;
            load_or_bail(&mut dashboard, today).await?;
            dashboard
                .dispatch(Intent::SubmitRequested {
                    draft,
                    editing_id: None,
                })
                .await?;
            println!("Job application added.");
        }
        Command::Edit {
            id,
            company,
            role,
            status,
            applied,
            link,
        } => {
            load_or_bail(&mut dashboard, today).await?;
            let existing = dashboard
                .jobs()
                .iter()
                .find(|job| job.id == id)
                .cloned()
                .ok_or_else(|| AppError::UnknownId(id.clone()))?;
            let draft = JobDraft {
                company: company.unwrap_or(existing.company),
                role: role.unwrap_or(existing.role),
                status: status.unwrap_or(existing.status),
                applied_date: applied.unwrap_or(existing.applied_date),
                link: link.unwrap_or(existing.link),
            };
            draft.validate()?;
            dashboard
                .dispatch(Intent::SubmitRequested {
                    draft,
                    editing_id: Some(id),
                })
                .await?;
            println!("Job application updated.");
        }
        Command::SetStatus { id, status } => {
            load_or_bail(&mut dashboard, today).await?;
            dashboard
                .dispatch(Intent::StatusChangeRequested { id, status })
                .await?;
            println!("Status updated to {status}.");
        }
        Command::Delete { id } => {
            load_or_bail(&mut dashboard, today).await?;
            dashboard.dispatch(Intent::DeleteRequested { id }).await?;
            println!("Job application deleted.");
        }
        // Config is handled before the client is built.
        Command::Config { .. } => return Ok(()),
    }

    print!("{}", render::render_dashboard(&dashboard, today));
    Ok(())
}

async fn load_or_bail(dashboard: &mut Dashboard, today: NaiveDate) -> Result<(), AppError> {
    dashboard.dispatch(Intent::LoadRequested).await?;
    if dashboard.last_error().is_some() {
        print!("{}", render::render_dashboard(dashboard, today));
        return Err(AppError::LoadFailed);
    }
    Ok(())
}

fn run_config(set_url: Option<&str>, store: &SettingsStore) -> Result<(), AppError> {
    match set_url {
        Some(value) => {
            let url = store.set_api_url(value)?;
            println!("api url set to {url}");
        }
        None => {
            println!("api url: {}", store.api_url());
            println!("settings file: {}", store.path().display());
        }
    }
    Ok(())
}
