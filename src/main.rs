use std::io;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use billcover::audit::AuditLogger;
use billcover::cli::{
    handle_audit_command, handle_list_command, handle_report_command, Console, Session,
};
use billcover::config::{BillcoverPaths, Settings};
use billcover::display::format_suggestions;

#[derive(Parser)]
#[command(
    name = "billcover",
    version,
    about = "Half-month bill coverage and transfer planner",
    long_about = "billcover keeps a CSV of upcoming bills and account balances and \
                  tells you how much to move from savings to checking so the bills \
                  due in the current half of the month are covered with a safety \
                  margin to spare."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive session (default)
    Session,

    /// Print the transfer recommendation for a CSV file
    Report {
        /// Path to the CSV file
        file: PathBuf,
        /// Reference date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the expenses and income in a CSV file
    List {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// Write the default settings file
    Init,

    /// Show current configuration and paths
    Config,

    /// Show recent changes made through the editor
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let paths = BillcoverPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => {
            let audit = AuditLogger::new(paths.audit_log());
            let today = Local::now().date_naive();
            let console = Console::new(io::stdin().lock(), io::stdout());

            Session::new(console, &settings, today)
                .with_audit(&audit)
                .run()?;
        }
        Commands::Report { file, date, json } => {
            handle_report_command(&settings, &file, date.as_deref(), json)?;
        }
        Commands::List { file } => {
            handle_list_command(&file)?;
        }
        Commands::Init => {
            println!("Initializing billcover at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!("Settings written to {}", paths.settings_file().display());
        }
        Commands::Config => {
            println!("billcover Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Safety margin:     {}", settings.safety_margin);
            println!("  Checking account:  {}", settings.checking_label);
            println!("  Savings account:   {}", settings.savings_label);
            println!("  Default data file: {}", settings.default_data_file);
            println!("  Payee suggestions:");
            println!("{}", format_suggestions(&settings.payee_suggestions));
            println!("  Income sources:");
            println!("{}", format_suggestions(&settings.income_sources));
        }
        Commands::Audit { limit } => {
            handle_audit_command(&paths, limit)?;
        }
    }

    Ok(())
}
