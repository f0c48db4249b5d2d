use anyhow::Result;
use clap::Parser;
use esgmap::cli::{Cli, Commands};
use esgmap::commands::render_error;
use esgmap::commands::report::{formatting_from_flags, handle_report, ReportConfig};
use esgmap::observability::{init_tracing, install_panic_hook};
use std::process::ExitCode;

fn main() -> ExitCode {
    install_panic_hook();
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprint!("{}", render_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Report {
            input,
            format,
            output,
            config,
            high_sensitivity_sectors,
            parallel,
            color,
            plain,
        } => handle_report(ReportConfig {
            input,
            format,
            output,
            config,
            high_sensitivity_sectors,
            parallel,
            formatting: formatting_from_flags(color, plain),
        }),
        Commands::Init { force } => esgmap::commands::init_config(force),
        Commands::Sample { output, force } => {
            esgmap::commands::write_sample(&output, force)?;
            println!("Wrote sample input to {}", output.display());
            Ok(())
        }
    }
}
