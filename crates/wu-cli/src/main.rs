//! `wu`: build the WebHaru utility script and package snippet downloads.

mod cli;
mod commands;

use clap::Parser;
use cli::{Args, Commands};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wu_core::WuConfig;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => WuConfig::load(path)?,
        None => WuConfig::default(),
    };

    match &args.command {
        Commands::Build { src, out, readable, mode, banner } => {
            commands::build(&config, src, out, readable.as_deref(), *mode, banner.as_deref())
        }
        Commands::Pack { inputs, output, prefix } => {
            commands::pack(&config, inputs, output, prefix.as_deref())
        }
        Commands::Bundle { script, footer, attributes_table, attributes, llms, readme, output } => {
            let inputs = commands::BundleInputs {
                script,
                footer,
                attributes_table,
                attributes,
                llms,
                readme: readme.as_deref(),
            };
            commands::bundle(&config, &inputs, output.as_deref())
        }
        Commands::List { archive } => commands::list(archive),
    }
}
