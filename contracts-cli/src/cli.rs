//! Command-line arguments

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;

/// Browse, search and query contracts from the terminal
#[derive(Debug, Parser)]
#[command(name = "contracts", version)]
pub struct Cli {
    /// API base URL (overrides CONTRACTS_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        username: String,
        /// Read from standard input when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Signup {
        username: String,
        email: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the saved session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List contracts as a table
    List(ListArgs),

    /// Show one contract with its clauses and insights
    Show { doc_id: String },

    /// Delete a contract
    Delete {
        doc_id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Upload a contract file (PDF, TXT or DOCX)
    Upload {
        file: PathBuf,
        /// Contract name shown in listings
        #[arg(long)]
        name: Option<String>,
        /// Parties to the contract, comma separated
        #[arg(long)]
        parties: Option<String>,
    },

    /// Check processing of an uploaded contract
    Status { doc_id: String },

    /// Ask a question about your contracts
    Ask {
        question: String,
        /// Maximum number of supporting passages
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Suggested questions and past questions
    Suggestions,

    /// Contract counts by status and risk
    Stats {
        /// Read rows from a JSON file instead of the API
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Free-text search across all fields
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only contracts with this status
    #[arg(long)]
    pub status: Option<String>,

    /// Only contracts with this risk level
    #[arg(long)]
    pub risk: Option<String>,

    /// Toggle sorting on a column; repeat to flip direction
    #[arg(long = "sort", value_name = "COLUMN")]
    pub sort: Vec<String>,

    /// Page to show, 1-based
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Show every row on one page
    #[arg(long)]
    pub all: bool,

    /// Open the contract in this row of the page (1-based)
    #[arg(long, value_name = "ROW")]
    pub open: Option<usize>,

    /// Read rows from a JSON file (an array, or a listing with `documents`)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}
