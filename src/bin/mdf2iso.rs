/// Command line converter from MDF / raw sector dumps to ISO-9660

use clap::{ErrorKind, Parser};
use mdf2iso::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(arg_required_else_help = true)]
struct Cli {
    /// Generate a cdrdao toc file
    #[clap(long, conflicts_with = "cue")]
    toc: bool,

    /// Generate a cue sheet
    #[clap(long)]
    cue: bool,

    /// Do not draw the progress bar
    #[clap(short, long)]
    quiet: bool,

    /// Log each conversion stage
    #[clap(short, long)]
    verbose: bool,

    /// Source image (BASENAME.MDF)
    #[clap(parse(from_os_str))]
    source: PathBuf,

    /// Destination image, defaults to the source with an .iso extension
    #[clap(parse(from_os_str))]
    destination: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };

    // `RUST_LOG` overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Help and version requests are not failures
fn parse_exit_status(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => 2,
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(parse_exit_status(e.kind()));
        }
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mode = OutputMode::from_flags(cli.cue, cli.toc)?;

    let mut options = ConvertOptions::new(&cli.source).mode(mode);
    if let Some(ref destination) = cli.destination {
        options = options.destination(destination);
    }

    let outcome = if cli.quiet {
        convert(&options, &mut NoProgress)?
    } else {
        convert(&options, &mut ConsoleProgress::stdout())?
    };

    match outcome {
        ConversionOutcome::AlreadyIso => {
            println!("This is file iso9660 ;)");
        }
        ConversionOutcome::Converted(report) => {
            if report.cue_overridden {
                println!("Audio track detected, cue sheet not generated");
            }
            match report.sidecar {
                Some(sidecar) if report.mode == OutputMode::Cue => {
                    println!("Created Cuesheet : {}", sidecar.descriptor.display());
                }
                Some(sidecar) => {
                    println!("Created TOC File : {}", sidecar.descriptor.display());
                }
                None => {
                    println!("Create iso9660: {}", report.output.display());
                }
            }
        }
    }

    Ok(())
}
