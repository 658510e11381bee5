/// Represents the status of a response from the Dataverse API.
///
/// We distinguish success and error responses with this enum.
/// Once the response is parsed, we can check if it's an error or not
/// and act accordingly.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub enum Status {
    /// Indicates a successful response
    OK,
    /// Indicates an error response
    ERROR,
}

impl PartialEq for Status {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Status::OK, Status::OK) | (Status::ERROR, Status::ERROR)
        )
    }
}

impl Status {
    /// Returns the string representation of the status
    pub fn as_str(&self) -> &str {
        match self {
            Status::OK => "OK",
            Status::ERROR => "ERROR",
        }
    }

    /// Returns true if the status is OK
    pub fn is_ok(&self) -> bool {
        match self {
            Status::OK => true,
            Status::ERROR => false,
        }
    }

    /// Returns true if the status is ERROR
    pub fn is_err(&self) -> bool {
        !self.is_ok()
    }
}

/// A wrapper struct that models the envelope returned by Dataverse.
///
/// Every consumed endpoint wraps its payload under a `data` key next to
/// the response status. Error responses replace `data` with a `message`,
/// which is why both fields are optional here.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
#[allow(non_snake_case)]
pub struct Response<T> {
    /// The status of the response (OK or ERROR)
    pub status: Status,

    /// Optional data payload returned by the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Optional message providing additional information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Optional URL of the request that generated this response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestUrl: Option<String>,

    /// Optional HTTP method used in the request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requestMethod: Option<String>,
}

impl<T> Response<T> {
    /// Creates a new Response
    pub fn new(status: Status, data: Option<T>, message: Option<String>) -> Response<T> {
        Response::<T> {
            status,
            data,
            message,
            requestUrl: None,
            requestMethod: None,
        }
    }
}
