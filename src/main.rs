use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use selavu::cli::{
    handle_admin_command, handle_audit_command, handle_backup_command, handle_category_command,
    handle_dashboard_command, handle_expense_command, handle_income_command,
    handle_period_command, handle_user_command, open_session, AdminCommands, AuditArgs,
    BackupCommands, CategoryCommands, DashboardArgs, ExpenseCommands, IncomeCommands,
    PeriodCommands, UserCommands,
};
use selavu::config::{paths::TrackerPaths, settings::Settings};
use selavu::storage::{init::needs_initialization, initialize_storage, Storage};

/// Environment variable for the log filter
const LOG_ENV: &str = "SELAVU_LOG";

#[derive(Parser)]
#[command(
    name = "selavu",
    version,
    about = "Personal expense and income tracker",
    long_about = "selavu records your expenses and income and reports them over \
                  billing cycles that run from the 27th of one month to the 26th \
                  of the next."
)]
struct Cli {
    /// User to act as
    #[arg(short, long, global = true, env = "SELAVU_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Billing period commands
    #[command(subcommand)]
    Period(PeriodCommands),

    /// Category management commands
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Income management commands
    #[command(subcommand, alias = "inc")]
    Income(IncomeCommands),

    /// Totals, balance and spending by category for a period
    Dashboard(DashboardArgs),

    /// User management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Admin account bootstrap
    #[command(subcommand)]
    Admin(AdminCommands),

    /// Backup commands (admin only)
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Show the audit log (admin only)
    Audit(AuditArgs),
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("selavu - personal expense and income tracker");
        println!();
        println!("Run 'selavu --help' for usage information.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing selavu at: {}", paths.base_dir().display());
            if initialize_storage(&paths, &settings)? {
                println!("Initialization complete!");
            } else {
                println!("Already initialized.");
            }
            println!();
            println!("Create an admin account with: selavu admin ensure <username>");
            return Ok(());
        }
        Commands::Config => {
            println!("selavu Configuration");
            println!("====================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Initialized:      {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Cycle start day: {}", settings.cycle_start_day);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Backups kept:    {} daily, {} monthly",
                settings.backup_retention.daily_count, settings.backup_retention.monthly_count
            );
            return Ok(());
        }
        Commands::Period(cmd) => {
            handle_period_command(&settings, cmd)?;
            return Ok(());
        }
        _ => {}
    }

    if needs_initialization(&paths) {
        bail!("selavu is not initialized; run 'selavu init' first");
    }
    let storage = Storage::open(paths)?;

    if let Commands::Admin(cmd) = command {
        handle_admin_command(&storage, cmd)?;
        return Ok(());
    }

    let session = open_session(&storage, cli.user.as_deref())?;

    match command {
        Commands::Category(cmd) => handle_category_command(&storage, &session, cmd)?,
        Commands::Expense(cmd) => handle_expense_command(&storage, &settings, &session, cmd)?,
        Commands::Income(cmd) => handle_income_command(&storage, &settings, &session, cmd)?,
        Commands::Dashboard(args) => {
            handle_dashboard_command(&storage, &settings, &session, args)?
        }
        Commands::User(cmd) => handle_user_command(&storage, &session, cmd)?,
        Commands::Backup(cmd) => handle_backup_command(&storage, &settings, &session, cmd)?,
        Commands::Audit(args) => handle_audit_command(&storage, &session, args)?,
        Commands::Init | Commands::Config | Commands::Period(_) | Commands::Admin(_) => {}
    }

    Ok(())
}
