//! Permissions overview collection.
//!
//! Walks a subtree of the collection hierarchy without a depth bound and
//! records the groups, roles and role assignments of every visited
//! collection. The walk starts at an optional start path below the root,
//! so a single branch of a large instance can be reported on its own.

use std::collections::HashSet;

use serde::Serialize;

use crate::{
    client::BaseClient,
    error::ReportError,
    native_api::permissions::{get_assignment_info, get_group_info, get_role_info},
    native_api::tree::{get_tree, locate_start, TreeNode},
};

/// One output row of the permissions overview report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PermissionsRecord {
    /// Slash-joined path of aliases from the root down to the collection
    pub vpath: String,

    /// Browsable URL of the collection
    pub url: String,

    /// Distance from the root in edges (the root itself is 0)
    pub depth: u32,

    /// Alias of the collection's parent
    pub parentalias: String,

    /// Alias of the collection
    pub alias: String,

    /// Display name of the collection
    pub name: String,

    /// Numeric database id
    pub id: i64,

    /// Summary of the explicit groups, one `identifier (assignees)` entry each
    pub groups: String,

    /// Summary of the roles, one `alias (permissions)` entry each
    pub roles: String,

    /// Summary of the role assignments, one `assignee (role)` entry each
    pub assignments: String,
}

impl PermissionsRecord {
    /// Column order of the CSV report
    pub const COLUMNS: [&'static str; 10] = [
        "vpath",
        "url",
        "depth",
        "parentalias",
        "alias",
        "name",
        "id",
        "groups",
        "roles",
        "assignments",
    ];
}

struct Pending<'a> {
    node: &'a TreeNode,
    parent_vpath: String,
    parent_alias: String,
    depth: u32,
}

/// Collects the permissions overview of a subtree into report rows.
///
/// Fetches the public collection tree, resolves `start_path` against its
/// root (an empty path starts at the root itself) and then visits the
/// start collection and every descendant in pre-order, keeping the
/// sibling order the instance reports. Three authenticated calls are made
/// per visited collection; the first failing call aborts the run.
///
/// The worklist is explicit and visited ids are tracked, so a cyclic
/// tree (which the instance should never report) cannot loop the walk.
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the requests.
/// * `start_path` - Aliases leading from the root to the start collection.
///
/// # Returns
///
/// A `Result` wrapping the ordered rows of the report, or the first
/// `ReportError` encountered.
pub async fn collect_permissions_overview(
    client: &BaseClient,
    start_path: &[String],
) -> Result<Vec<PermissionsRecord>, ReportError> {
    let tree = get_tree(client).await?;

    println!(
        "Extracted the tree for the toplevel dataverse: {} ({})",
        tree.name, tree.alias
    );

    let start = locate_start(&tree, start_path)?;
    let server_url = client.base_url().as_str().trim_end_matches('/').to_string();

    let mut records = Vec::new();
    let mut visited: HashSet<i64> = HashSet::new();
    let mut stack = vec![Pending {
        node: start.node,
        parent_vpath: start.parent_vpath,
        parent_alias: start.parent_alias,
        depth: start.depth,
    }];

    while let Some(pending) = stack.pop() {
        if !visited.insert(pending.node.id) {
            continue;
        }

        let vpath = format!("{}/{}", pending.parent_vpath, pending.node.alias);
        println!("Retrieving info for dataverse, virtual path: {}", vpath);

        let groups = get_group_info(client, &pending.node.alias).await?;
        let roles = get_role_info(client, &pending.node.alias).await?;
        let assignments = get_assignment_info(client, &pending.node.alias).await?;

        records.push(PermissionsRecord {
            vpath: vpath.clone(),
            url: format!("{}/{}", server_url, pending.node.alias),
            depth: pending.depth,
            parentalias: pending.parent_alias.clone(),
            alias: pending.node.alias.clone(),
            name: pending.node.name.clone(),
            id: pending.node.id,
            groups,
            roles,
            assignments,
        });

        // Children are pushed in reverse so siblings pop in their
        // original order
        for child in pending.node.children.iter().rev() {
            stack.push(Pending {
                node: child,
                parent_vpath: vpath.clone(),
                parent_alias: pending.node.alias.clone(),
                depth: pending.depth + 1,
            });
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;

    fn mock_tree(server: &MockServer) {
        server.mock(|when, then| {
            when.method(GET).path("/api/info/metrics/tree");
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "data": {
                    "alias": "root",
                    "name": "Root",
                    "id": 1,
                    "children": [
                        {
                            "alias": "a",
                            "name": "A",
                            "id": 2,
                            "children": [{"alias": "c", "name": "C", "id": 4}]
                        },
                        {"alias": "b", "name": "B", "id": 3}
                    ]
                }
            }));
        });
    }

    fn mock_permissions(server: &MockServer, alias: &str) {
        server.mock(|when, then| {
            when.method(GET)
                .path(format!("/api/dataverses/{}/groups", alias));
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "data": [{"identifier": "g1", "containedRoleAssignees": ["@a"]}]
            }));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path(format!("/api/dataverses/{}/roles", alias));
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "data": [{"alias": "admin", "permissions": ["A", "B"]}]
            }));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path(format!("/api/dataverses/{}/assignments", alias));
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "data": [{"assignee": "@user", "_roleAlias": "admin"}]
            }));
        });
    }

    #[tokio::test]
    async fn test_walks_whole_tree_from_root() {
        // Arrange
        let server = MockServer::start();
        let token = "t".to_string();
        let client = BaseClient::new(&server.base_url(), Some(&token)).unwrap();
        mock_tree(&server);
        for alias in ["root", "a", "b", "c"] {
            mock_permissions(&server, alias);
        }

        // Act
        let records = collect_permissions_overview(&client, &[]).await.unwrap();

        // Assert: pre-order, no depth bound
        let vpaths: Vec<&str> = records.iter().map(|r| r.vpath.as_str()).collect();
        assert_eq!(vpaths, vec!["/root", "/root/a", "/root/a/c", "/root/b"]);

        let depths: Vec<u32> = records.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 1]);

        // The root names itself as parent
        assert_eq!(records[0].parentalias, "root");
        assert_eq!(records[2].parentalias, "a");
        assert_eq!(records[0].groups, "g1 (1)");
        assert_eq!(records[0].roles, "admin (2)");
        assert_eq!(records[0].assignments, "@user (admin)");
        assert!(records[1].url.ends_with("/a"));
    }

    #[tokio::test]
    async fn test_start_path_restricts_the_walk() {
        // Arrange
        let server = MockServer::start();
        let token = "t".to_string();
        let client = BaseClient::new(&server.base_url(), Some(&token)).unwrap();
        mock_tree(&server);
        mock_permissions(&server, "a");
        mock_permissions(&server, "c");

        // Act
        let records = collect_permissions_overview(&client, &["a".to_string()])
            .await
            .unwrap();

        // Assert: only the located subtree is reported
        let vpaths: Vec<&str> = records.iter().map(|r| r.vpath.as_str()).collect();
        assert_eq!(vpaths, vec!["/root/a", "/root/a/c"]);
        assert_eq!(records[0].depth, 1);
        assert_eq!(records[0].parentalias, "root");
    }

    #[tokio::test]
    async fn test_unknown_start_path_fails_before_any_fetch() {
        // Arrange: no permission endpoints mocked at all
        let server = MockServer::start();
        let token = "t".to_string();
        let client = BaseClient::new(&server.base_url(), Some(&token)).unwrap();
        mock_tree(&server);

        // Act
        let result = collect_permissions_overview(&client, &["missing".to_string()]).await;

        // Assert
        assert!(matches!(result, Err(ReportError::SubtreeNotFound { .. })));
    }
}
