use thiserror::Error;

/// Failure kinds that abort a collection run.
///
/// Every variant is terminal: nothing is retried and no output file is
/// written once one of these surfaces. The variants mirror the points
/// where a run can go wrong, so the exit message names the failing stage.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The server URL could not be parsed or extended with an API path
    #[error("invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client could not be constructed
    #[error("failed to set up the http client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a usable response
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not the expected JSON envelope
    #[error("malformed response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The envelope decoded fine but carried no `data` payload,
    /// e.g. an unauthorized response
    #[error("response from {url} carried no data payload")]
    MissingData { url: String },

    /// The storage size message did not contain the expected
    /// "dataverse: ... bytes" phrase
    #[error("storage size message has an unexpected format: {message:?}")]
    SizeFormat { message: String },

    /// A start path segment did not name a child collection
    #[error("start path {path:?} does not name a known collection")]
    SubtreeNotFound { path: String },

    /// Writing the CSV report failed
    #[error("failed to write the report: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
