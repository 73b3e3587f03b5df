use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use spendwise::cli::{
    handle_achievements_command, handle_auth_command, handle_budget_command,
    handle_categorize_command, handle_config_command, handle_expense_command,
    handle_export_command, handle_goal_command, handle_import_command, handle_summary_command,
    handle_tip_command, AppContext,
};
use spendwise::config::{paths::SpendwisePaths, settings::Settings};
use spendwise::display::format_unlock_banner;
use spendwise::events::EventLogger;
use spendwise::remote::{RemoteClient, Session};
use spendwise::services::AchievementService;
use spendwise::storage::Storage;
use spendwise::store::{LocalStore, RemoteStore, Store};

#[derive(Parser)]
#[command(
    name = "spendwise",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "Spendwise tracks expenses, savings goals, and a monthly budget \
                  from the command line. It works offline in guest mode and can \
                  sync to a hosted account; signing in merges guest data into the \
                  account."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(spendwise::cli::ExpenseCommands),

    /// Savings goal commands
    #[command(subcommand)]
    Goal(spendwise::cli::GoalCommands),

    /// Budget threshold commands
    #[command(subcommand)]
    Budget(spendwise::cli::BudgetCommands),

    /// Show a monthly spending summary
    Summary {
        /// Month to summarize (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Import expenses from a CSV file
    Import {
        /// Path to the CSV file
        file: std::path::PathBuf,
        /// Parse and preview without importing
        #[arg(long)]
        dry_run: bool,
    },

    /// Export data as CSV
    #[command(subcommand)]
    Export(spendwise::cli::ExportCommands),

    /// Account and session commands
    #[command(subcommand)]
    Auth(spendwise::cli::AuthCommands),

    /// Show earned achievements
    #[command(alias = "badges")]
    Achievements,

    /// Suggest a category for an expense description (AI)
    Categorize {
        /// Free-text expense description
        description: String,
    },

    /// Get a budgeting tip based on this month's spending (AI)
    Tip,

    /// Configuration commands
    #[command(subcommand)]
    Config(spendwise::cli::ConfigCommands),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = SpendwisePaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    let store = resolve_store(&paths, &settings)?;
    let events = EventLogger::new(paths.event_log());
    let ctx = AppContext {
        store,
        events,
        settings,
        paths,
    };

    // Login streak and completed-month badges are evaluated on every run
    record_daily_activity(&ctx)?;

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&ctx, cmd)?,
        Some(Commands::Goal(cmd)) => handle_goal_command(&ctx, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&ctx, cmd)?,
        Some(Commands::Summary { month }) => handle_summary_command(&ctx, month.as_deref())?,
        Some(Commands::Import { file, dry_run }) => handle_import_command(&ctx, &file, dry_run)?,
        Some(Commands::Export(cmd)) => handle_export_command(&ctx, cmd)?,
        Some(Commands::Auth(cmd)) => handle_auth_command(&ctx, cmd)?,
        Some(Commands::Achievements) => handle_achievements_command(&ctx)?,
        Some(Commands::Categorize { description }) => {
            handle_categorize_command(&ctx, &description)?
        }
        Some(Commands::Tip) => handle_tip_command(&ctx)?,
        Some(Commands::Config(cmd)) => handle_config_command(&ctx, cmd)?,
        None => {
            println!("Spendwise - Terminal-based personal expense tracker");
            println!();
            println!("Run 'spendwise --help' for usage information.");
            println!("Run 'spendwise expense add <description> <amount>' to get started.");
        }
    }

    Ok(())
}

/// Pick the active store: the hosted account when a live session exists,
/// local guest files otherwise.
fn resolve_store(
    paths: &SpendwisePaths,
    settings: &Settings,
) -> Result<Box<dyn Store>> {
    if let Some(session) = Session::load(paths)? {
        if session.is_expired() {
            warn!(email = %session.email, "session expired, falling back to guest mode");
            eprintln!(
                "Session for {} has expired; using guest mode. Run 'spendwise auth login'.",
                session.email
            );
        } else if let (Some(api_url), Some(api_key)) = (settings.api_url(), settings.api_key()) {
            let client = RemoteClient::new(api_url, api_key, session);
            return Ok(Box::new(RemoteStore::new(client)));
        } else {
            warn!("session present but backend is not configured, using guest mode");
        }
    }

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    Ok(Box::new(LocalStore::new(storage)))
}

/// Update the login streak and evaluate date-driven badges, at most once per
/// day per user.
fn record_daily_activity(ctx: &AppContext) -> Result<()> {
    let today = Local::now().date_naive();
    let already_seen_today = ctx.store.profile()?.last_login == Some(today);

    let achievements = AchievementService::new(ctx.store.as_ref(), &ctx.events);
    for badge in achievements.record_login(today)? {
        println!("{}", format_unlock_banner(badge));
    }

    if !already_seen_today {
        for badge in achievements.check_budget_keeper(today)? {
            println!("{}", format_unlock_banner(badge));
        }
    }

    Ok(())
}
