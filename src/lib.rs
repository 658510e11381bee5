//! A Rust library for collecting reports from a Dataverse installation.
//!
//! This library walks the public collection tree of a Dataverse instance
//! and gathers per-collection metadata (storage usage, groups, roles and
//! role assignments) into flat CSV reports.

#![warn(unused_crate_dependencies)]

/// Client functionality for interacting with Dataverse APIs
pub mod client;

/// Error kinds raised while collecting and writing reports
pub mod error;

/// Types for handling responses from Dataverse APIs
pub mod response;

/// CSV serialization of collected records
pub mod report;

/// Native API functionality
pub mod native_api {
    pub use permissions::{get_assignment_info, get_group_info, get_role_info};
    pub use storage::{extract_size_str, get_storage_message};
    pub use tree::get_tree;

    /// Group, role and assignment retrieval
    pub mod permissions;
    /// Storage size retrieval
    pub mod storage;
    /// Collection tree retrieval and subtree lookup
    pub mod tree;
}

/// Tree walkers that turn the collection hierarchy into report rows
pub mod collect {
    pub use permissions::collect_permissions_overview;
    pub use storage::collect_storage_usage;

    /// Permissions overview collection
    pub mod permissions;
    /// Storage usage collection
    pub mod storage;
}

/// Commonly used types and functions
pub mod prelude {
    pub use super::client::BaseClient;
    pub use super::collect::{collect_permissions_overview, collect_storage_usage};
    pub use super::error::ReportError;
    pub use super::native_api::tree::TreeNode;
    pub use super::report::write_report;
}

/// Command-line interface functionality
pub mod cli {
    /// Base CLI functionality
    pub mod base;
    /// Permissions overview command
    pub mod permissions;
    /// Storage usage command
    pub mod storage;
}
