//! Storage size retrieval.
//!
//! The storage size of a collection is not reported as a number but as a
//! human-readable sentence, e.g. "Total size of the files stored in this
//! dataverse: 43,638,426,561 bytes". The digits are cut out of that
//! sentence and cleaned of their readability separators.

use regress::Regex;
use serde::Deserialize;

use crate::{
    client::{evaluate_response, BaseClient},
    error::ReportError,
};

/// Payload of the storagesize endpoint
#[derive(Debug, Deserialize)]
pub struct StorageSizeMessage {
    pub message: String,
}

/// Retrieves the storage size message for a collection.
///
/// # Arguments
///
/// * `client` - A reference to the `BaseClient` instance used to send the request.
/// * `alias` - Alias of the collection to get the storage size for.
///
/// # Returns
///
/// A `Result` wrapping the raw message string reported by the instance,
/// or a `ReportError` on transport or envelope failures.
pub async fn get_storage_message(
    client: &BaseClient,
    alias: &str,
) -> Result<String, ReportError> {
    // Endpoint metadata
    let url = format!("api/dataverses/{}/storagesize", alias);

    // Send request
    let response = client.get(url.as_str()).await;

    let data = evaluate_response::<StorageSizeMessage>(response)
        .await?
        .data
        .ok_or(ReportError::MissingData { url })?;

    Ok(data.message)
}

/// Extracts the byte count from a storage size message.
///
/// The digits sit between the literal phrase "dataverse: " and the
/// literal suffix " bytes". Both `,` and `.` are stripped from the
/// extracted substring; they are locale-dependent readability separators
/// and never mark a fractional byte.
pub fn extract_size_str(message: &str) -> Result<String, ReportError> {
    let pattern = Regex::new(r"dataverse: (.+?) bytes").expect("valid size pattern");

    let size_range = pattern
        .find(message)
        .and_then(|found| found.group(1))
        .ok_or_else(|| ReportError::SizeFormat {
            message: message.to_string(),
        })?;

    let clean_size: String = message[size_range]
        .chars()
        .filter(|c| !matches!(c, ',' | '.'))
        .collect();

    Ok(clean_size)
}
