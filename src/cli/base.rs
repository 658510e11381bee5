//! Base functionality for the reporting CLI
//!
//! This module provides the pieces shared by both report commands:
//! - Client setup from the command line arguments
//! - Writing the finished report and terminating with a proper exit code
//! - The common trait for command processing

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use crate::client::{print_error, BaseClient};
use crate::error::ReportError;
use crate::report::write_report;

/// Trait for processing CLI subcommands
///
/// Implementors define how to handle their specific subcommand variant.
/// Unlike a plain function table, the trait keeps the dispatch in the
/// binary trivial.
pub trait Matcher {
    /// Process this subcommand
    fn process(self);
}

/// Builds the API client from the command line arguments, or exits.
///
/// # Arguments
/// * `server_url` - Base URL of the Dataverse instance
/// * `api_key` - The API token sent with every authenticated call
pub fn setup_client(server_url: &str, api_key: &str) -> BaseClient {
    match BaseClient::new(server_url, Some(&api_key.to_string())) {
        Ok(client) => client,
        Err(error) => {
            print_error(error.to_string());
            std::process::exit(exitcode::USAGE);
        }
    }
}

/// Writes the collected records and terminates the process.
///
/// A successful run reports the number of rows and exits with `OK`; any
/// collection or serialization failure prints the error and exits with
/// `DATAERR`, leaving no output file behind.
///
/// # Arguments
/// * `records` - The outcome of the collection run
/// * `columns` - Header row for the report
/// * `output_file` - Target path of the CSV file
pub fn finish_report<T: Serialize>(
    records: Result<Vec<T>, ReportError>,
    columns: &[&str],
    output_file: &Path,
) -> ! {
    let written = records.and_then(|records| {
        write_report(output_file, columns, &records)?;
        Ok(records.len())
    });

    match written {
        Ok(count) => {
            println!(
                "\n{} Wrote {} rows to {}\n",
                "🎉 Success!".green().bold(),
                count,
                output_file.display()
            );
            std::process::exit(exitcode::OK);
        }
        Err(error) => {
            print_error(error.to_string());
            std::process::exit(exitcode::DATAERR);
        }
    }
}
