//! Command-line argument structures for Xenophon

use clap::Args;

#[derive(Args)]
pub struct InsertArgs {
    /// Command to record
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Directory where the command was executed (defaults to the current one)
    #[arg(short = 'D', long)]
    pub directory: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Directory to list (defaults to the current one)
    #[arg(short = 'D', long)]
    pub directory: Option<String>,

    /// Only show commands matching this regex
    #[arg(short = 'g', long)]
    pub grep: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct LastArgs {
    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub count: usize,

    /// Only show commands matching this regex
    #[arg(short = 'g', long)]
    pub grep: Option<String>,

    /// Only show commands run in a location matching this regex
    #[arg(short = 'l', long)]
    pub location_grep: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PeriodArgs {
    /// Start of the window (RFC 3339, YYYY-MM-DD or Unix seconds)
    #[arg(long)]
    pub since: String,

    /// End of the window, inclusive (defaults to now)
    #[arg(long)]
    pub until: Option<String>,

    /// Only show commands matching this regex
    #[arg(short = 'g', long)]
    pub grep: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Show configuration file path
    #[arg(long)]
    pub path: bool,
}
