use clap::Parser;
use dcmpeek_core::cli::{Cli, OutputFormat};
use dcmpeek_core::{FileProcessor, FileReport, TextReport};
use log::{error, info};
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    #[cfg(not(feature = "json"))]
    if cli.format == OutputFormat::Json {
        eprintln!("Error: JSON output requires the 'json' feature");
        eprintln!("Rebuild with: cargo build --features json");
        process::exit(1);
    }

    let options = cli.options();
    let compact = options.compact_output;

    let processor = match FileProcessor::new(options) {
        Ok(processor) => processor,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    info!("Processing {}", cli.path.display());

    let result = processor.run(&cli.path, cli.recursive, |report| {
        output_report(report, cli.format, compact)
    });

    match result {
        Ok(summary) if summary.is_success() => {}
        Ok(_) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(if e.is_fatal() { 2 } else { 1 });
        }
    }
}

fn setup_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn output_report(report: &FileReport, format: OutputFormat, compact: bool) {
    match format {
        OutputFormat::Text => print!("{}", TextReport::new(report, compact)),
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match dcmpeek_core::cli::report::to_json(report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => error!("Failed to serialize {}: {}", report.path.display(), e),
                }
            }
        }
    }
}
