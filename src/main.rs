use anyhow::{Context as AnyhowContext, Result};
use binsuite::cli;
use binsuite::logging::{self, Verbosity};
use binsuite::output::OutputFormatter;
use binsuite::DispatchingBuilder;
use clap::Parser;
use std::process::ExitCode;

const EXIT_NOT_RUNNABLE: u8 = 2;

fn main() -> Result<ExitCode> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    let dispatcher = DispatchingBuilder::new();

    if args.list_builders {
        for key in dispatcher.registry().keys() {
            println!("{key}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let path = args.path.as_deref().context("Missing --path")?;
    let options = args.discovery_options()?;
    tracing::info!(path, options = options.len(), "discovering tests");

    let root = if args.strict {
        dispatcher
            .try_build_from_path(path, &options)
            .with_context(|| format!("Failed to build tests for {path}"))?
    } else {
        dispatcher.build_from_path(path, &options)
    };

    let rendered = OutputFormatter::format(&root, args.format)?;
    match args.output_file {
        Some(ref output_file) => std::fs::write(output_file, rendered)
            .with_context(|| format!("Cannot write output file: {}", output_file.display()))?,
        None => print!("{rendered}"),
    }

    if root.is_runnable() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!(
            binary = %root.full_name,
            state = root.run_state.as_str(),
            reason = root.skip_reason().unwrap_or("unknown"),
            "binary is not runnable"
        );
        Ok(ExitCode::from(EXIT_NOT_RUNNABLE))
    }
}
