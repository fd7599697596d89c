use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables on the terminal
    Terminal,
    /// Machine-readable JSON report
    Json,
    /// Markdown tables for pasting into documents
    Markdown,
}

impl From<OutputFormat> for crate::io::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => crate::io::OutputFormat::Terminal,
            OutputFormat::Json => crate::io::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::OutputFormat::Markdown,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "valuemap")]
#[command(about = "Interactive business value and ROI estimator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute a one-shot value estimate from flag inputs
    Estimate {
        /// Industry vertical (see `valuemap industries` for the list)
        #[arg(short, long)]
        industry: Option<String>,

        /// Number of entities (locations, branches, practitioners)
        #[arg(short, long, default_value = "0")]
        entities: String,

        /// Average transaction value in dollars
        #[arg(long = "avg-transaction", default_value = "0")]
        avg_transaction: String,

        /// Vendor cost in dollars (the ROI denominator)
        #[arg(long = "vendor-cost", default_value = "0")]
        vendor_cost: String,

        /// Monthly page views (feeds search conversions)
        #[arg(long = "page-views", default_value = "0")]
        page_views: String,

        /// Products to enable (comma-separated: listings,reviews,pages,search,support_search)
        #[arg(short, long, value_delimiter = ',')]
        products: Option<Vec<String>>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Industry catalog override file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// List the industries available in the coefficient catalog
    Industries {
        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Industry catalog override file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Interactive estimation session (one command per line; try `help`)
    Session {
        /// Industry catalog override file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
}
