//! Sexagesimal coordinate CLI - entry point and output handling.

mod cli;
mod compute;
mod config;
mod error;
mod input;
mod logging;
mod output;
#[cfg(feature = "parquet")]
mod parquet;
mod planner;
mod table_format;

use error::CliError;

fn main() {
    logging::init_logging();

    let args: Vec<String> = std::env::args().collect();

    match cli::parse_cli(args) {
        Ok((source, command, params)) => {
            // Performance monitoring setup
            let start = if params.perf {
                Some(std::time::Instant::now())
            } else {
                None
            };

            let (compute_plan, output_plan) = match planner::build_job(source, command, &params) {
                Ok(spec) => spec,
                Err(err) => {
                    eprintln!("Error: {}", err);
                    std::process::exit(1);
                }
            };

            let written = match compute_plan {
                planner::ComputePlan::Rows {
                    records,
                    command,
                    filter,
                } => {
                    let rows = compute::compute_rows(records, command, filter, &params);
                    output::dispatch_output(rows, command, &params, &output_plan)
                }
                planner::ComputePlan::Predicate(predicate) => {
                    output::write_predicate(&predicate, &params)
                }
            };

            let record_count = match written {
                Ok(count) => count,
                Err(err) => {
                    eprintln!("Error: {}", err);
                    std::process::exit(1);
                }
            };

            // Report performance if requested
            if let Some(start_time) = start {
                let elapsed = start_time.elapsed();
                eprintln!(
                    "Processed {} records in {:.3}s ({:.0} records/sec)",
                    record_count,
                    elapsed.as_secs_f64(),
                    record_count as f64 / elapsed.as_secs_f64()
                );
            }
        }
        Err(CliError::Exit(message)) => {
            println!("{}", message);
            std::process::exit(0);
        }
        Err(CliError::Message(message)) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    }
}
