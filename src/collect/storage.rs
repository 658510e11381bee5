//! Storage usage collection.
//!
//! Walks the collection tree depth-first down to a caller-supplied depth
//! and records the reported storage size of every visited collection.
//! Storing a parent's size next to all of its children is redundant
//! (children are included in the parent's total), so the root's own size
//! is only fetched on request.

use serde::Serialize;

use crate::{
    client::BaseClient,
    error::ReportError,
    native_api::storage::{extract_size_str, get_storage_message},
    native_api::tree::{get_tree, TreeNode},
};

/// One output row of the storage usage report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageRecord {
    /// Distance from the root in edges (the root itself is 0)
    pub depth: u32,

    /// Alias of the collection's parent
    pub parentalias: String,

    /// Alias of the collection
    pub alias: String,

    /// Display name of the collection
    pub name: String,

    /// Reported size in bytes, with readability separators stripped
    pub storagesize: String,
}

impl StorageRecord {
    /// Column order of the CSV report
    pub const COLUMNS: [&'static str; 5] = ["depth", "parentalias", "alias", "name", "storagesize"];
}

struct Pending<'a> {
    node: &'a TreeNode,
    parent_alias: &'a str,
    depth: u32,
}

/// Collects the storage usage of the instance into report rows.
///
/// Fetches the public collection tree, then visits every collection up to
/// `max_depth` edges below the root in pre-order, keeping the sibling
/// order the instance reports. One authenticated storagesize call is made
/// per visited collection; the first failing call aborts the run.
///
/// When `include_grand_total` is set, the root's own total is fetched
/// first and recorded at depth 0. Requesting it makes the server-side
/// processing time increase dramatically (almost double).
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the requests.
/// * `max_depth` - Deepest level to visit; direct children sit at depth 1.
/// * `include_grand_total` - Whether to record the root's own total size.
///
/// # Returns
///
/// A `Result` wrapping the ordered rows of the report, or the first
/// `ReportError` encountered.
pub async fn collect_storage_usage(
    client: &BaseClient,
    max_depth: u32,
    include_grand_total: bool,
) -> Result<Vec<StorageRecord>, ReportError> {
    let tree = get_tree(client).await?;

    println!(
        "Extracted the tree for the toplevel dataverse: {} ({})",
        tree.name, tree.alias
    );

    let mut records = Vec::new();

    if include_grand_total {
        println!("Retrieving total size for this dataverse instance");
        let message = get_storage_message(client, &tree.alias).await?;
        records.push(StorageRecord {
            depth: 0,
            parentalias: tree.alias.clone(),
            alias: tree.alias.clone(),
            name: tree.name.clone(),
            storagesize: extract_size_str(&message)?,
        });
    }

    // Depth-first pre-order over an explicit stack; children are pushed
    // in reverse so siblings pop in their original order
    let mut stack: Vec<Pending> = Vec::new();
    for child in tree.children.iter().rev() {
        stack.push(Pending {
            node: child,
            parent_alias: &tree.alias,
            depth: 1,
        });
    }

    while let Some(pending) = stack.pop() {
        println!(
            "Retrieving size for dataverse: {} / {} ...",
            pending.parent_alias, pending.node.alias
        );

        let message = get_storage_message(client, &pending.node.alias).await?;
        records.push(StorageRecord {
            depth: pending.depth,
            parentalias: pending.parent_alias.to_string(),
            alias: pending.node.alias.clone(),
            name: pending.node.name.clone(),
            storagesize: extract_size_str(&message)?,
        });

        if pending.depth < max_depth {
            for child in pending.node.children.iter().rev() {
                stack.push(Pending {
                    node: child,
                    parent_alias: &pending.node.alias,
                    depth: pending.depth + 1,
                });
            }
        }
    }

    Ok(records)
}
