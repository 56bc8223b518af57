use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_ledger::audit::AuditLogger;
use expense_ledger::cli::{
    handle_category_command, handle_expense_command, handle_export_command,
    handle_import_command, CategoryCommands, ExpenseCommands, ExportFormat,
};
use expense_ledger::config::{CsvDialect, LedgerPaths, Settings, ValidationMode};
use expense_ledger::ledger::Ledger;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Track expenses by category",
    long_about = "Record expenses against your own categories, derive amounts from \
                  units and unit prices, see per-category totals, and move the whole \
                  ledger in and out as JSON or CSV."
)]
struct Cli {
    /// Directory holding the ledger data and settings
    #[arg(long, global = true, env = "EXPENSE_LEDGER_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category management commands
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommands),

    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Export the ledger
    Export {
        /// Output format
        #[arg(value_enum)]
        format: ExportFormat,
        /// Output file or directory (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the ledger with the contents of a .json or .csv file
    Import {
        /// Path to the file
        file: PathBuf,
    },

    /// Show or change settings
    Config {
        /// lenient or strict category checking
        #[arg(long)]
        validation_mode: Option<ValidationMode>,
        /// rfc4180 or legacy CSV layout
        #[arg(long)]
        csv_dialect: Option<CsvDialect>,
        /// Indent JSON exports
        #[arg(long)]
        pretty_json: Option<bool>,
    },

    /// Show recent changes
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => LedgerPaths::with_base_dir(dir),
        None => LedgerPaths::new()?,
    };

    match cli.command {
        Some(Commands::Category(cmd)) => {
            let ledger = Ledger::open(&paths)?;
            handle_category_command(&ledger, cmd)?;
            report_audit_warnings(&ledger);
        }
        Some(Commands::Expense(cmd)) => {
            let ledger = Ledger::open(&paths)?;
            handle_expense_command(&ledger, cmd)?;
            report_audit_warnings(&ledger);
        }
        Some(Commands::Export { format, output }) => {
            let ledger = Ledger::open(&paths)?;
            handle_export_command(&ledger, format, output)?;
        }
        Some(Commands::Import { file }) => {
            let ledger = Ledger::open(&paths)?;
            handle_import_command(&ledger, &file)?;
            report_audit_warnings(&ledger);
        }
        Some(Commands::Config {
            validation_mode,
            csv_dialect,
            pretty_json,
        }) => {
            let mut settings = Settings::load_or_create(&paths)?;
            let changed = validation_mode.is_some() || csv_dialect.is_some() || pretty_json.is_some();

            if let Some(mode) = validation_mode {
                settings.validation_mode = mode;
            }
            if let Some(dialect) = csv_dialect {
                settings.csv_dialect = dialect;
            }
            if let Some(pretty) = pretty_json {
                settings.pretty_json = pretty;
            }
            if changed {
                settings.save(&paths)?;
            }

            println!("Expense Ledger Configuration");
            println!("============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!(
                "  Validation mode: {}{}",
                settings.validation_mode,
                if settings.is_strict() {
                    " (unregistered categories are rejected)"
                } else {
                    ""
                }
            );
            println!("  CSV dialect:     {}", settings.csv_dialect);
            println!("  Pretty JSON:     {}", settings.pretty_json);
        }
        Some(Commands::History { limit }) => {
            let logger = AuditLogger::new(paths.audit_log());
            let entries = logger.read_recent(limit)?;
            if entries.is_empty() {
                println!("No history yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        None => {
            println!("Expense Ledger - track expenses by category");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense category add <NAME>' to create your first category.");
        }
    }

    Ok(())
}

/// The change was saved; only its history entry is missing
fn report_audit_warnings(ledger: &Ledger) {
    for warning in ledger.take_audit_warnings() {
        eprintln!("Warning: change saved but not recorded in history: {}", warning);
    }
}
