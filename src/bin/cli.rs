use colored::Colorize;
use structopt::StructOpt;

use dataverse_report::cli::base::Matcher;
use dataverse_report::cli::permissions::PermissionsOverviewCommand;
use dataverse_report::cli::storage::StorageUsageCommand;

static HEADER: &str = r#"
--- Dataverse Reporting Command Line Interface (DVREPORT) ---
"#;

#[derive(StructOpt, Debug)]
#[structopt(about = "Collect storage usage and permission overviews from a Dataverse instance")]
#[allow(clippy::upper_case_acronyms)]
struct CLI {
    #[structopt(subcommand)]
    cmd: DVReport,
}

#[derive(StructOpt, Debug)]
#[allow(clippy::upper_case_acronyms)]
enum DVReport {
    /// Collect the storage usage of the collections
    #[structopt(name = "storage-usage")]
    StorageUsage(StorageUsageCommand),

    /// Collect groups, roles and assignments of the collections
    #[structopt(name = "permissions-overview")]
    PermissionsOverview(PermissionsOverviewCommand),
}

fn main() {
    let cli = CLI::from_args();

    if atty::is(atty::Stream::Stdout) {
        println!("{}", HEADER.bold());
    }

    match cli.cmd {
        DVReport::StorageUsage(command) => command.process(),
        DVReport::PermissionsOverview(command) => command.process(),
    }
}
