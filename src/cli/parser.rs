use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for ticketrecon
/// Scrape ticket sales from the box-office portal and reconcile them into the sales sheet
#[derive(Parser)]
#[command(
    name = "ticketrecon",
    version = env!("CARGO_PKG_VERSION"),
    about = "Scrape per-event ticket sales and reconcile them against the sales spreadsheet",
    long_about = None
)]
pub struct Cli {
    /// Use a configuration file other than the default one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override run-log database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the run-log database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Log in with every configured account and print the scraped events
    Scrape {
        #[arg(long = "json", help = "Print events as JSON instead of a table")]
        json: bool,

        #[arg(long, value_enum, requires = "file", help = "Also export events to a file")]
        format: Option<ExportFormat>,

        #[arg(long, value_name = "FILE", requires = "format")]
        file: Option<String>,

        #[arg(long, help = "Overwrite the export file without asking")]
        force: bool,
    },

    /// Scrape every account, then update the sales sheet
    Sync {
        #[arg(long = "dry-run", help = "Plan the updates without writing the sheet")]
        dry_run: bool,

        #[arg(long = "sheet", value_name = "CSV", help = "Reconcile into a local CSV sheet")]
        sheet: Option<String>,

        #[arg(long = "json", help = "Print the run report as JSON")]
        json: bool,
    },

    /// Reconcile previously exported events (JSON) against the sales sheet
    Reconcile {
        #[arg(long = "events", value_name = "FILE")]
        events: String,

        #[arg(long = "sheet", value_name = "CSV", help = "Reconcile into a local CSV sheet")]
        sheet: Option<String>,

        #[arg(long = "dry-run", help = "Plan the updates without writing the sheet")]
        dry_run: bool,

        #[arg(long = "json", help = "Print the run report as JSON")]
        json: bool,
    },

    /// Run the row extractor over a saved listing page
    Extract {
        #[arg(long = "html", value_name = "FILE")]
        html: String,

        #[arg(long = "user", default_value = "", help = "Account to tag events with")]
        user: String,

        #[arg(long = "json", help = "Print events as JSON instead of a table")]
        json: bool,
    },

    /// Print the internal log table or the recorded runs
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "runs", help = "Print the most recent sync/reconcile runs")]
        runs: bool,

        #[arg(long = "limit", default_value_t = 20, help = "Number of runs shown with --runs")]
        limit: usize,
    },
}

impl Commands {
    /// True when the command prints JSON on stdout.
    pub fn json_output(&self) -> bool {
        match self {
            Commands::Scrape { json, .. }
            | Commands::Sync { json, .. }
            | Commands::Reconcile { json, .. }
            | Commands::Extract { json, .. } => *json,
            _ => false,
        }
    }
}
