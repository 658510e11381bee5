//! Storage usage command for the reporting CLI
//!
//! Collects the storage usage (in bytes) for the (sub-)collections of a
//! Dataverse instance into a CSV table.

use std::path::PathBuf;

use structopt::StructOpt;
use tokio::runtime::Runtime;

use crate::collect::storage::{collect_storage_usage, StorageRecord};

use super::base::{finish_report, setup_client, Matcher};

/// Collect the storage usage of the collections in a CSV table
#[derive(StructOpt, Debug)]
#[structopt(about = "Collect the storage usage of the collections in a csv table")]
pub struct StorageUsageCommand {
    /// URL of the Dataverse instance
    #[structopt(help = "URL of the Dataverse instance")]
    pub server_url: String,

    /// API key or token to use for the per-collection calls
    #[structopt(long, short = "k", help = "The API key or token to use")]
    pub api_key: String,

    /// Path of the CSV file to write
    #[structopt(
        long,
        short = "o",
        default_value = "storage_usage.csv",
        help = "The file to write the output to"
    )]
    pub output_file: PathBuf,

    /// Deepest level of the hierarchy to visit (direct children sit at 1)
    #[structopt(
        long,
        short = "d",
        default_value = "1",
        help = "The max depth of the hierarchy to traverse"
    )]
    pub depth: u32,

    /// Also record the instance-wide total at depth 0
    #[structopt(
        long,
        short = "g",
        help = "Include the grand total, which almost doubles server processing time"
    )]
    pub include_grand_total: bool,
}

impl Matcher for StorageUsageCommand {
    fn process(self) {
        println!("Start collecting storage usage for: {}", self.server_url);

        let client = setup_client(&self.server_url, &self.api_key);
        let runtime = Runtime::new().expect("Failed to create runtime");

        let records = runtime.block_on(collect_storage_usage(
            &client,
            self.depth,
            self.include_grand_total,
        ));

        finish_report(records, &StorageRecord::COLUMNS, &self.output_file);
    }
}
