//! FILENAME: app/src/cli.rs
//! CLI argument definitions for the orders listing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use engine::{FilterCriteria, SortKey};

#[derive(Parser)]
#[command(
    name = "shopdesk",
    version,
    about = "Shopdesk orders listing - filter, sort and export the catalog",
    long_about = "List the orders catalog with the same filters and sort as the listing screen.\n\n\
                  The filtered, sorted view can be exported as an XLSX workbook\n\
                  or as a printable PDF report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file to use instead of the platform settings file.
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Read the catalog from a local JSON file.
    #[arg(long = "source", value_name = "FILE", global = true, conflicts_with = "url")]
    pub source: Option<PathBuf>,

    /// Catalog endpoint URL.
    #[arg(long = "url", value_name = "URL", global = true)]
    pub url: Option<String>,

    /// Write the unified log to this file.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Increase log detail (-v for debug, -vv for trace) and echo it to stderr.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the filtered, sorted listing.
    List(ListArgs),

    /// List the categories present in the catalog.
    Categories,

    /// Export the filtered, sorted listing.
    Export(ExportArgs),

    /// Print the effective settings as TOML.
    Config(ConfigArgs),
}

/// Filters and sort shared by `list` and `export`.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Case-insensitive text matched against id, title, category and description.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Only this category ("all" for every category).
    #[arg(long = "category", value_name = "NAME")]
    pub category: Option<String>,

    /// Inclusive lower price bound.
    #[arg(long = "min-price", value_name = "PRICE", allow_hyphen_values = true)]
    pub min_price: Option<String>,

    /// Inclusive upper price bound.
    #[arg(long = "max-price", value_name = "PRICE", allow_hyphen_values = true)]
    pub max_price: Option<String>,

    /// Inclusive lower bound on the rating.
    #[arg(long = "min-rating", value_name = "RATE")]
    pub min_rating: Option<String>,

    /// Click the column header KEY (id, title, category, price, rating).
    /// Repeat to click again: `--sort price --sort price` sorts descending.
    #[arg(long = "sort", value_name = "KEY")]
    pub sort: Vec<SortKey>,
}

impl ViewArgs {
    pub fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new();
        if let Some(text) = &self.search {
            criteria = criteria.with_search(text);
        }
        if let Some(category) = &self.category {
            criteria = criteria.with_category(category.as_str());
        }
        criteria = criteria.with_price_range(
            self.min_price.as_deref().unwrap_or(""),
            self.max_price.as_deref().unwrap_or(""),
        );
        if let Some(rating) = &self.min_rating {
            criteria = criteria.with_min_rating(rating);
        }
        criteria
    }
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Print the view as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Artifact(s) to write.
    #[arg(long = "format", value_enum, default_value = "both")]
    pub format: ExportFormatArg,

    /// Output directory (default: the configured export directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    Xlsx,
    Pdf,
    Both,
}

impl ExportFormatArg {
    pub fn spreadsheet(self) -> bool {
        matches!(self, ExportFormatArg::Xlsx | ExportFormatArg::Both)
    }

    pub fn report(self) -> bool {
        matches!(self, ExportFormatArg::Pdf | ExportFormatArg::Both)
    }
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Also write the effective settings to the settings file.
    #[arg(long = "save")]
    pub save: bool,
}
