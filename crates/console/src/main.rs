// crates/console/src/main.rs
//! PressWatch console binary.
//!
//! A terminal front end for the media-monitoring backend: dashboards,
//! project administration, and a live watcher for the bulk AI-processing
//! job. All network access goes through `presswatch-api`; the bulk watcher
//! is driven by `presswatch-monitor`.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use presswatch_api::ApiClient;
use tracing_subscriber::EnvFilter;

use cli::{Cli, ClientCommand, Command, MediaCommand, ProjectCommand, SourceCommand, ThemeCommand};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PRESSWATCH_LOG").unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url)?;

    match cli.command {
        Command::Dashboard { watch } => commands::dashboard::run(client, watch).await,
        Command::Media(cmd) => match cmd {
            MediaCommand::List => commands::media::list(client).await,
            MediaCommand::Show { media_id } => commands::media::show(client, &media_id).await,
            MediaCommand::Analyze { media_id } => commands::media::analyze(client, &media_id).await,
            MediaCommand::ProcessAll => commands::media::process_all(client).await,
        },
        Command::Projects(cmd) => match cmd {
            ProjectCommand::List => commands::projects::list(client).await,
            ProjectCommand::Create(args) => commands::projects::create(client, args).await,
            ProjectCommand::Dashboard { project_id } => {
                commands::projects::dashboard(client, &project_id).await
            }
            ProjectCommand::Insights {
                project_id,
                generate,
            } => commands::projects::insights(client, &project_id, generate).await,
            ProjectCommand::Media { project_id } => {
                commands::projects::media(client, &project_id).await
            }
        },
        Command::Clients(ClientCommand::Create { name, email }) => {
            commands::admin::create_client(client, name, email).await
        }
        Command::Sources(cmd) => match cmd {
            SourceCommand::List => commands::admin::list_sources(client).await,
            SourceCommand::Create { name, url } => {
                commands::admin::create_source(client, name, url).await
            }
        },
        Command::Themes(cmd) => match cmd {
            ThemeCommand::List { project_id } => {
                commands::admin::list_themes(client, &project_id).await
            }
            ThemeCommand::Add {
                project_id,
                name,
                description,
            } => commands::admin::add_theme(client, &project_id, &name, &description).await,
            ThemeCommand::Remove { thematic_id } => {
                commands::admin::remove_theme(client, &thematic_id).await
            }
        },
        Command::Scrape { project, source } => {
            commands::admin::scrape(client, &project, &source).await
        }
    }
}
