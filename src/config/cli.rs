use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "stock-ledger")]
#[command(about = "Track item stock levels in a JSON file")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Inventory data file (default: inventory.json)")]
    pub file: Option<String>,

    #[arg(long, global = true, help = "Optional TOML settings file")]
    pub config: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

// Quantities stay textual here so that bad input is reported as an
// invalid argument by the inventory layer rather than by clap.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add stock for an item
    Add {
        name: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Remove stock for an item
    Remove {
        name: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Print the quantity held for an item
    Get { name: String },
    /// List items below a stock threshold
    Low {
        #[arg(long, allow_hyphen_values = true)]
        threshold: Option<String>,
    },
    /// Print every item and its quantity
    Report,
    /// Run a short demonstration; overwrites the data file with demo stock
    Demo,
}
