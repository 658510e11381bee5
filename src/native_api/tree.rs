//! Collection tree retrieval and subtree lookup.
//!
//! The tree of (sub-)collections is part of the public metrics of a
//! Dataverse instance, so this endpoint needs no authentication and only
//! ever reports published collections.

use serde::Deserialize;

use crate::{
    client::{evaluate_response, BaseClient},
    error::ReportError,
};

/// One collection in the hierarchy, as reported by the metrics tree.
///
/// The walker never mutates nodes; the tree is fetched once per run and
/// discarded afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct TreeNode {
    /// Short unique alias of the collection
    pub alias: String,

    /// Human-readable display name
    pub name: String,

    /// Numeric database id
    pub id: i64,

    /// Child collections, in the order the instance reports them
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Looks up a direct child by its alias.
    pub fn find_child(&self, alias: &str) -> Option<&TreeNode> {
        self.children.iter().find(|child| child.alias == alias)
    }
}

/// A node resolved from a start path, together with the traversal context
/// accumulated on the way down from the root.
#[derive(Debug)]
pub struct StartNode<'a> {
    /// The collection the walk starts from
    pub node: &'a TreeNode,

    /// Virtual path of the node's parent (empty for the root)
    pub parent_vpath: String,

    /// Alias of the node's parent (the root names itself)
    pub parent_alias: String,

    /// Number of edges between the root and the node
    pub depth: u32,
}

/// Retrieves the full collection tree of the instance.
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
///
/// # Returns
///
/// A `Result` wrapping the root `TreeNode` of the hierarchy, or a
/// `ReportError` if the request or the envelope decoding fails.
pub async fn get_tree(client: &BaseClient) -> Result<TreeNode, ReportError> {
    // Endpoint metadata
    let url = "api/info/metrics/tree";

    // Send request
    let response = client.get(url).await;

    evaluate_response::<TreeNode>(response)
        .await?
        .data
        .ok_or_else(|| ReportError::MissingData {
            url: url.to_string(),
        })
}

/// Resolves a slash-separated start path against the root of the tree.
///
/// An empty path yields the root itself, with the root recorded as its own
/// parent. Each segment must name a direct child of the node reached so
/// far; an unknown segment fails the whole run.
pub fn locate_start<'a>(
    root: &'a TreeNode,
    path: &[String],
) -> Result<StartNode<'a>, ReportError> {
    let mut node = root;
    let mut parent_vpath = String::new();
    let mut parent_alias = root.alias.clone();
    let mut depth = 0;

    for segment in path {
        parent_vpath = format!("{}/{}", parent_vpath, node.alias);
        parent_alias = node.alias.clone();
        node = node
            .find_child(segment)
            .ok_or_else(|| ReportError::SubtreeNotFound {
                path: path.join("/"),
            })?;
        depth += 1;
    }

    Ok(StartNode {
        node,
        parent_vpath,
        parent_alias,
        depth,
    })
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;

    fn example_tree() -> TreeNode {
        serde_json::from_value(serde_json::json!({
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
        }))
        .unwrap()
    }

    #[test]
    fn test_children_default_to_empty() {
        let raw = r#"{"alias": "leaf", "name": "Leaf", "id": 9}"#;
        let node = serde_json::from_str::<TreeNode>(raw).unwrap();

        assert!(node.children.is_empty());
    }

    #[test]
    fn test_find_child() {
        let tree = example_tree();

        assert_eq!(tree.find_child("b").unwrap().id, 3);
        assert!(tree.find_child("missing").is_none());
    }

    #[test]
    fn test_locate_start_defaults_to_root() {
        let tree = example_tree();

        let start = locate_start(&tree, &[]).unwrap();

        assert_eq!(start.node.alias, "root");
        assert_eq!(start.parent_vpath, "");
        assert_eq!(start.parent_alias, "root");
        assert_eq!(start.depth, 0);
    }

    #[test]
    fn test_locate_start_descends_path() {
        let tree = example_tree();
        let path = vec!["a".to_string(), "c".to_string()];

        let start = locate_start(&tree, &path).unwrap();

        assert_eq!(start.node.alias, "c");
        assert_eq!(start.parent_vpath, "/root/a");
        assert_eq!(start.parent_alias, "a");
        assert_eq!(start.depth, 2);
    }

    #[test]
    fn test_locate_start_unknown_segment() {
        let tree = example_tree();
        let path = vec!["nope".to_string()];

        let result = locate_start(&tree, &path);

        assert!(matches!(result, Err(ReportError::SubtreeNotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_tree() {
        // Arrange
        let mock_server = MockServer::start();
        let client = BaseClient::new(&mock_server.base_url(), None).unwrap();

        let mock = mock_server.mock(|when, then| {
            when.method(GET).path("/api/info/metrics/tree");
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "data": {
                    "alias": "root",
                    "name": "Root",
                    "id": 1,
                    "children": [{"alias": "a", "name": "A", "id": 2}]
                }
            }));
        });

        // Act
        let tree = get_tree(&client).await.unwrap();

        // Assert
        assert_eq!(tree.alias, "root");
        assert_eq!(tree.children.len(), 1);
        mock.assert();
    }

    #[tokio::test]
    async fn test_get_tree_without_data() {
        // Arrange
        let mock_server = MockServer::start();
        let client = BaseClient::new(&mock_server.base_url(), None).unwrap();

        let _m = mock_server.mock(|when, then| {
            when.method(GET).path("/api/info/metrics/tree");
            then.status(200)
                .json_body(serde_json::json!({"status": "ERROR", "message": "nope"}));
        });

        // Act
        let result = get_tree(&client).await;

        // Assert
        assert!(matches!(result, Err(ReportError::MissingData { .. })));
    }
}
