use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::ItemKind;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "linecols",
    version,
    about = "Resolve invoice line-item table columns from company settings.",
    after_help = "Examples:\n  linecols                      Resolve product columns (same as `linecols resolve`)\n  linecols resolve --kind task --format json\n  linecols --settings ./company.json catalog --kind task\n  linecols --log debug resolve"
)]
pub struct Cli {
    /// Company settings JSON document (defaults to $LINECOLS_SETTINGS or the platform config dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,

    /// Tracing filter written to stderr (e.g. "info", "debug", or full directives)
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl Cli {
    /// The requested command, defaulting to resolving product columns.
    pub fn command_or_default(&self) -> CliCommand {
        self.command
            .clone()
            .unwrap_or_else(|| CliCommand::Resolve(ResolveArgs::default()))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Print the resolved column order for a line-item kind (default command)
    Resolve(ResolveArgs),
    /// Print the built-in default columns for a line-item kind
    Catalog(CatalogArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One column key per line with its bare field name
    Plain,
    /// JSON object with the kind and the column list
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Line-item kind whose columns are resolved
    #[arg(long, value_enum, default_value_t = ItemKind::Product)]
    pub kind: ItemKind,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,
}

impl Default for ResolveArgs {
    fn default() -> Self {
        Self {
            kind: ItemKind::Product,
            format: OutputFormat::Plain,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Line-item kind whose catalog is printed
    #[arg(long, value_enum, default_value_t = ItemKind::Product)]
    pub kind: ItemKind,
}
