use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = linecols::cli::Cli::parse();
    linecols::logging::init_tracing(cli.log_filter.as_deref())?;

    let config = linecols::config::from_cli(&cli)?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    linecols::commands::execute(&config, cli.command_or_default(), &mut handle)?;

    Ok(())
}
