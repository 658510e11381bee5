//! Permissions overview command for the reporting CLI
//!
//! Collects the groups, roles and role assignments of every collection in
//! a subtree of a Dataverse instance into a CSV table.

use std::path::PathBuf;

use structopt::StructOpt;
use tokio::runtime::Runtime;

use crate::collect::permissions::{collect_permissions_overview, PermissionsRecord};

use super::base::{finish_report, setup_client, Matcher};

/// Collect a permissions overview of the collections in a CSV table
#[derive(StructOpt, Debug)]
#[structopt(about = "Collect groups, roles and assignments of the collections in a csv table")]
pub struct PermissionsOverviewCommand {
    /// URL of the Dataverse instance
    #[structopt(help = "URL of the Dataverse instance")]
    pub server_url: String,

    /// API key or token to use for the per-collection calls
    #[structopt(long, short = "k", help = "The API key or token to use")]
    pub api_key: String,

    /// Path of the CSV file to write. The default is shared with the
    /// storage usage command and kept for compatibility with earlier
    /// versions of these reports.
    #[structopt(
        long,
        short = "o",
        default_value = "storage_usage.csv",
        help = "The file to write the output to (default shared with storage-usage)"
    )]
    pub output_file: PathBuf,

    /// Slash-separated aliases leading from the root to the collection to
    /// start from; the whole tree is walked when omitted
    #[structopt(
        long,
        short = "s",
        help = "Slash-separated path of collection aliases to start from (defaults to the root)"
    )]
    pub start_path: Option<String>,
}

impl Matcher for PermissionsOverviewCommand {
    fn process(self) {
        println!(
            "Start collecting permissions overview for: {}",
            self.server_url
        );

        let client = setup_client(&self.server_url, &self.api_key);
        let runtime = Runtime::new().expect("Failed to create runtime");

        let start_path: Vec<String> = self
            .start_path
            .as_deref()
            .unwrap_or("")
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        let records = runtime.block_on(collect_permissions_overview(&client, &start_path));

        finish_report(records, &PermissionsRecord::COLUMNS, &self.output_file);
    }
}
