//! Group, role and assignment retrieval.
//!
//! Each fetcher flattens the returned list into a single comma-joined
//! summary string so one collection fits one report row. All three
//! endpoints require the API token, and each call is preceded by a short
//! fixed pause to avoid hammering the instance during deep walks.

use std::time::Duration;

use serde::Deserialize;

use crate::{
    client::{evaluate_response, BaseClient},
    error::ReportError,
};

/// Pause before each permission-related request.
const REQUEST_PAUSE: Duration = Duration::from_millis(300);

/// An explicit group defined on a collection
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub identifier: String,
    #[serde(default)]
    pub contained_role_assignees: Vec<String>,
}

/// A role defined on a collection
#[derive(Debug, Deserialize)]
pub struct Role {
    pub alias: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// A role assignment scoped to a collection
#[derive(Debug, Deserialize)]
pub struct Assignment {
    pub assignee: String,
    #[serde(rename = "_roleAlias")]
    pub role_alias: String,
}

/// Retrieves the groups of a collection as a flat summary string.
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `alias` - Alias of the collection to get the groups for.
///
/// # Returns
///
/// A `Result` wrapping a string like `"g1 (2), g2 (0)"`, where the braced
/// number counts the contained role assignees, or a `ReportError`.
pub async fn get_group_info(client: &BaseClient, alias: &str) -> Result<String, ReportError> {
    tokio::time::sleep(REQUEST_PAUSE).await;

    // Endpoint metadata
    let url = format!("api/dataverses/{}/groups", alias);

    // Send request
    let response = client.get(url.as_str()).await;

    let groups = evaluate_response::<Vec<Group>>(response)
        .await?
        .data
        .ok_or(ReportError::MissingData { url })?;

    Ok(summarize_groups(&groups))
}

/// Retrieves the roles of a collection as a flat summary string.
///
/// Each entry carries the number of permissions the role grants, e.g.
/// `"admin (14), curator (9)"`.
pub async fn get_role_info(client: &BaseClient, alias: &str) -> Result<String, ReportError> {
    tokio::time::sleep(REQUEST_PAUSE).await;

    let url = format!("api/dataverses/{}/roles", alias);
    let response = client.get(url.as_str()).await;

    let roles = evaluate_response::<Vec<Role>>(response)
        .await?
        .data
        .ok_or(ReportError::MissingData { url })?;

    Ok(summarize_roles(&roles))
}

/// Retrieves the role assignments of a collection as a flat summary
/// string, e.g. `"@user (admin), &explicit/1-group (curator)"`.
pub async fn get_assignment_info(
    client: &BaseClient,
    alias: &str,
) -> Result<String, ReportError> {
    tokio::time::sleep(REQUEST_PAUSE).await;

    let url = format!("api/dataverses/{}/assignments", alias);
    let response = client.get(url.as_str()).await;

    let assignments = evaluate_response::<Vec<Assignment>>(response)
        .await?
        .data
        .ok_or(ReportError::MissingData { url })?;

    Ok(summarize_assignments(&assignments))
}

// Flatten and compact the group list, one entry per group
pub(crate) fn summarize_groups(groups: &[Group]) -> String {
    groups
        .iter()
        .map(|group| {
            format!(
                "{} ({})",
                group.identifier,
                group.contained_role_assignees.len()
            )
        })
        .collect::<Vec<String>>()
        .join(", ")
}

pub(crate) fn summarize_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(|role| format!("{} ({})", role.alias, role.permissions.len()))
        .collect::<Vec<String>>()
        .join(", ")
}

pub(crate) fn summarize_assignments(assignments: &[Assignment]) -> String {
    assignments
        .iter()
        .map(|assignment| format!("{} ({})", assignment.assignee, assignment.role_alias))
        .collect::<Vec<String>>()
        .join(", ")
}
