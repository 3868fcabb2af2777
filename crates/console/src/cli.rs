// crates/console/src/cli.rs
//! Command-line surface of the `presswatch` console.

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "presswatch", version, about = "Console for the PressWatch media-monitoring backend")]
pub struct Cli {
    /// Base URL of the backend API.
    #[arg(
        long,
        global = true,
        env = "PRESSWATCH_API_URL",
        default_value = "http://127.0.0.1:8000"
    )]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show overall stats and the latest scraped items.
    Dashboard {
        /// Keep the dashboard on screen, refreshing every 5 seconds.
        #[arg(long)]
        watch: bool,
    },
    /// Media items: listing, single-item analysis, bulk processing.
    #[command(subcommand)]
    Media(MediaCommand),
    /// Projects: listing, creation, analytics, insights.
    #[command(subcommand)]
    Projects(ProjectCommand),
    /// Client management.
    #[command(subcommand)]
    Clients(ClientCommand),
    /// Media source management.
    #[command(subcommand)]
    Sources(SourceCommand),
    /// Thematic areas of a project.
    #[command(subcommand)]
    Themes(ThemeCommand),
    /// Trigger an RSS scrape for one project/source pair.
    Scrape {
        #[arg(long)]
        project: String,
        #[arg(long)]
        source: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum MediaCommand {
    /// List every scraped media item.
    List,
    /// Show one media item with its AI analysis.
    Show { media_id: String },
    /// Run AI analysis on a single item.
    Analyze { media_id: String },
    /// Start the bulk AI-processing job and watch it to completion.
    ProcessAll,
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// List all projects with their themes and sources.
    List,
    /// Create a project for an existing client.
    Create(ProjectCreateArgs),
    /// Show the analytics dashboard of one project.
    Dashboard { project_id: String },
    /// Show (or generate) the AI insight report of one project.
    Insights {
        project_id: String,
        /// Generate a fresh report instead of showing the latest one.
        #[arg(long)]
        generate: bool,
    },
    /// List the analysed articles of one project.
    Media { project_id: String },
}

#[derive(Debug, Args)]
pub struct ProjectCreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub client: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Media sources to attach (repeatable).
    #[arg(long = "source")]
    pub sources: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// Register a new client.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum SourceCommand {
    /// List all media sources.
    List,
    /// Register a new media source.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ThemeCommand {
    /// List the thematic areas of a project.
    List { project_id: String },
    /// Add a thematic area to a project.
    Add {
        project_id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a thematic area.
    Remove { thematic_id: String },
}
