//! Main application orchestrator.
//!
//! 1. Initializes the verbose file logger unless `--quiet` is set.
//! 2. Dispatches the subcommand to `processing`, which loads the graph and
//!    runs the query.
//! 3. Prints results to stdout (or writes the fixture to a file).
//! 4. Flushes the log before returning, on success and on error.

use super::cli::{Cli, Command};
use super::error::AppError;
use super::file_handler;
use super::logger;
use super::processing::{self, TraceQuery};
use super::{verbose_eprintln, verbose_println}; // Macros for conditional logging.

/// Runs the application for parsed command-line arguments.
///
/// # Errors
/// Returns `AppError` for unreadable input, rejected edge lists, failed
/// searches and output I/O failures.
pub fn run_app(cli: Cli) -> Result<(), AppError> {
    let quiet_mode = cli.quiet;

    if !quiet_mode {
        if let Err(e) = logger::init_global_logger(&cli.log_file) {
            // Keep going without a log file.
            eprintln!(
                "Warning: Failed to initialize verbose logger ({}): {}. Verbose file logging will be unavailable.",
                cli.log_file.display(),
                e
            );
        } else {
            verbose_println!(
                quiet_mode,
                "Verbose logging initialized to {}",
                cli.log_file.display()
            );
        }
    }

    let result = dispatch(cli.command, quiet_mode);
    if let Err(e) = &result {
        verbose_eprintln!(quiet_mode, "[ERROR] {}", e);
    }

    if !quiet_mode {
        if let Err(e) = logger::flush_global_logger() {
            eprintln!("[WARNING] Failed to perform final flush of the log: {}", e);
        }
    }
    result
}

fn dispatch(command: Command, quiet_mode: bool) -> Result<(), AppError> {
    let lines = match command {
        Command::Latency { source, trace } => {
            let graph = processing::load_graph(&source, quiet_mode)?;
            processing::latency_query(&graph, &trace, quiet_mode)?
        }
        Command::Traces {
            source,
            from,
            to,
            min_hops,
            max_hops,
            max_latency,
            max_rounds,
            max_frontier,
        } => {
            let graph = processing::load_graph(&source, quiet_mode)?
                .with_search_limits(processing::search_limits(max_rounds, max_frontier));
            let query = TraceQuery {
                from,
                to,
                min_hops,
                max_hops: max_hops.into(),
                max_latency,
            };
            processing::traces_query(&graph, &query, quiet_mode)?
        }
        Command::Shortest { source, from, to } => {
            let graph = processing::load_graph(&source, quiet_mode)?;
            processing::shortest_query(&graph, &from, &to, quiet_mode)?
        }
        Command::Report { source } => {
            let graph = processing::load_graph(&source, quiet_mode)?;
            processing::report(&graph, quiet_mode)?
        }
        Command::Fixture { output, no_header } => {
            let csv = processing::fixture_csv(!no_header, quiet_mode)?;
            match output {
                Some(path) => {
                    file_handler::write_content_to_file(&path, &csv)?;
                    verbose_println!(quiet_mode, "\n[INFO] Fixture written to {}", path.display());
                }
                None => print!("{}", csv),
            }
            return Ok(());
        }
    };

    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
