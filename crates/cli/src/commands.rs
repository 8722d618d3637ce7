use std::fmt;
use std::io::Write;

use anyhow::Result;

use crate::cli::{CatalogArgs, CliCommand, OutputFormat, ResolveArgs};
use crate::config::AppConfig;
use crate::core::commands as core_commands;
use crate::core::ColumnSnapshot;
use crate::model::{ColumnCatalogEntry, ColumnKey};

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Resolve(args) => handle_resolve(config, &args, &mut writer),
        CliCommand::Catalog(args) => handle_catalog(&args, &mut writer),
    }
}

fn handle_resolve<W: Write>(config: &AppConfig, args: &ResolveArgs, mut writer: W) -> Result<()> {
    let snapshot = core_commands::resolve_columns(config, args.kind)?;
    if snapshot.differs_from_stored() {
        tracing::info!(
            kind = args.kind.as_str(),
            "resolved order differs from the stored column preferences"
        );
    }

    match args.format {
        OutputFormat::Plain => write_plain(&snapshot, &mut writer),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &snapshot)?;
            writeln!(writer)?;
            Ok(())
        }
    }
}

fn write_plain<W: Write>(snapshot: &ColumnSnapshot, mut writer: W) -> Result<()> {
    for column in &snapshot.columns {
        writeln!(writer, "{}", ColumnLine(column))?;
    }
    Ok(())
}

fn handle_catalog<W: Write>(args: &CatalogArgs, mut writer: W) -> Result<()> {
    for entry in core_commands::catalog(args.kind) {
        writeln!(writer, "{}", CatalogLine(&entry))?;
    }
    Ok(())
}

/// A resolved key followed by its bare field name when the key is one of ours.
struct ColumnLine<'a>(&'a str);

impl fmt::Display for ColumnLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match ColumnKey::parse(self.0) {
            Some(key) => write!(f, "{:<24} {}", self.0, key.field),
            None => write!(f, "{}", self.0),
        }
    }
}

struct CatalogLine<'a>(&'a ColumnCatalogEntry);

impl fmt::Display for CatalogLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<24} {}",
            self.0.key,
            if self.0.default_visible {
                "default"
            } else {
                "hidden"
            }
        )
    }
}
