use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use boardroom_core::ledger::VoteChoice;
use boardroom_core::statement::Stance;
use boardroom_infrastructure::BoardroomPaths;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod logging;

use commands::AppContext;

#[derive(Parser)]
#[command(name = "boardroom")]
#[command(about = "Boardroom Battles - vote on statements, or run them as a judge", long_about = None)]
struct Cli {
    /// Backend endpoint; overrides BOARDROOM_API_URL and config.toml
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Where the session and vote ledger are stored
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long, global = true, conflicts_with = "state_file")]
    ephemeral: bool,

    /// Use this directory instead of the platform config directory
    #[arg(long, global = true, env = "BOARDROOM_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as a judge or participant
    Login {
        username: String,
        /// Prompted for when omitted
        #[arg(long, env = "BOARDROOM_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log out and clear the local vote ledger
    Logout,
    /// Show the current session
    Status,
    /// Show or change the colour theme
    Theme {
        #[arg(value_enum)]
        mode: Option<ThemeArg>,
    },
    /// Show or change the client configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show the active statement
    Statement,
    /// Vote on the active statement
    Vote {
        choice: VoteChoice,
        /// Expected statement id; lets an exhausted vote be refused offline
        #[arg(long)]
        id: Option<String>,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// List the votes cast from this client
    History,
    /// List every statement (judge)
    Statements,
    /// Publish a new statement (judge)
    Publish {
        text: String,
        /// The judge's own position
        #[arg(long)]
        stance: Stance,
        /// Voting window in minutes
        #[arg(long)]
        duration: i64,
    },
    /// Close voting on a statement (judge)
    Deactivate { id: String },
    /// Reopen a statement for a new voting window (judge)
    Reactivate {
        id: String,
        /// Prompted for when omitted
        #[arg(long)]
        duration: Option<i64>,
    },
    /// Show the scores (judge)
    Results,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
    Toggle,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the resolved configuration
    Show,
    /// Store the backend endpoint in config.toml
    SetUrl { url: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let paths = BoardroomPaths::new(cli.config_dir.clone());
    let _log_guard = logging::init(paths.logs_dir().ok().as_deref());

    match run(cli, paths).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            commands::utils::print_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, paths: BoardroomPaths) -> Result<()> {
    let ctx = AppContext::open(&paths, cli.api_url, cli.state_file, cli.ephemeral)?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::session::login(&ctx, &username, password).await?
        }
        Commands::Logout => commands::session::logout(&ctx).await?,
        Commands::Status => commands::session::status(&ctx).await?,
        Commands::Theme { mode } => {
            let mode = mode.map(|m| match m {
                ThemeArg::Dark => commands::session::ThemeChange::Dark,
                ThemeArg::Light => commands::session::ThemeChange::Light,
                ThemeArg::Toggle => commands::session::ThemeChange::Toggle,
            });
            commands::session::theme(&ctx, mode).await?
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::session::show_config(&ctx)?,
            ConfigAction::SetUrl { url } => commands::session::set_api_url(&ctx, &url)?,
        },
        Commands::Statement => commands::participant::statement(&ctx).await?,
        Commands::Vote { choice, id, yes } => {
            commands::participant::vote(&ctx, choice, id.as_deref(), yes).await?
        }
        Commands::History => commands::participant::history(&ctx).await?,
        Commands::Statements => commands::judge::statements(&ctx).await?,
        Commands::Publish {
            text,
            stance,
            duration,
        } => commands::judge::publish(&ctx, &text, stance, duration).await?,
        Commands::Deactivate { id } => commands::judge::deactivate(&ctx, &id).await?,
        Commands::Reactivate { id, duration } => {
            commands::judge::reactivate(&ctx, &id, duration).await?
        }
        Commands::Results => commands::judge::results(&ctx).await?,
    }

    Ok(())
}
