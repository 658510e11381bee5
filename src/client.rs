use atty::Stream;
use colored::Colorize;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::Client;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::ReportError;
use crate::response::Response;

// This is the base client that is used to make requests to the API.
// It acts as a wrapper around the reqwest::Client and carries the
// base URL plus the API token as a default header. The report
// collectors only ever read, so only GET is exposed.
#[derive(Debug, Clone)]
pub struct BaseClient {
    base_url: Url,
    api_token: Option<String>,
    client: Client,
}

impl BaseClient {
    pub fn new(base_url: &str, api_token: Option<&String>) -> Result<Self, ReportError> {
        let parsed_url = Url::parse(base_url).map_err(|e| ReportError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let default_headers = Self::default_headers(api_token);

        // No request timeout: a run waits as long as the instance takes
        let client = Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(ReportError::Client)?;

        Ok(BaseClient {
            base_url: parsed_url,
            api_token: api_token.map(|s| s.to_owned().to_string()),
            client,
        })
    }

    fn default_headers(api_token: Option<&String>) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Some(api_token) = api_token {
            headers.insert(
                "X-Dataverse-key",
                api_token.parse().expect("Failed to parse API token"),
            );
        }

        // Add the default headers
        headers.insert("Connection", HeaderValue::from_static("keep-alive"));
        headers.insert("Accept", HeaderValue::from_static("*/*"));
        headers.insert("User-Agent", HeaderValue::from_static("dvreport/0.1.0"));

        headers
    }

    /// Get the base URL of the client
    ///
    /// # Returns
    ///
    /// A reference to the base URL of the client
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn has_api_token(&self) -> bool {
        self.api_token.is_some()
    }

    /// Performs a GET request against a path relative to the base URL.
    pub async fn get(&self, path: &str) -> Result<reqwest::Response, ReportError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ReportError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                reason: e.to_string(),
            })?;

        // If the DEBUG environment variable is set, print the URL
        if std::env::var("DEBUG").is_ok() {
            print_call(url.as_str());
        }

        self.client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ReportError::Transport {
                url: url.to_string(),
                source,
            })
    }
}

// Helper function to evaluate a response and decode the envelope
pub async fn evaluate_response<T>(
    response: Result<reqwest::Response, ReportError>,
) -> Result<Response<T>, ReportError>
where
    T: DeserializeOwned,
{
    let response = response?;
    let url = response.url().clone();

    let raw_content = response
        .text()
        .await
        .map_err(|source| ReportError::Transport {
            url: url.to_string(),
            source,
        })?;

    serde_json::from_str::<Response<T>>(&raw_content).map_err(|source| {
        ReportError::MalformedResponse {
            url: url.to_string(),
            source,
        }
    })
}

pub(crate) fn print_error(error: String) {
    println!("\n{} {}\n", "Error:".red().bold(), error,);
}

fn print_call(url: &str) {
    if atty::is(Stream::Stdout) {
        println!("{}: {}", "Calling".to_string().blue().bold(), url);
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use lazy_static::lazy_static;

    use super::*;

    lazy_static! {
        static ref MOCK_SERVER: MockServer = MockServer::start();
    }

    #[tokio::test]
    async fn test_get_request() {
        let client = BaseClient::new(&MOCK_SERVER.base_url(), None).unwrap();

        let _m = MOCK_SERVER.mock(|when, then| {
            when.method(GET).path("/test");
            then.status(200).body("test");
        });

        let response = client.get("test").await;
        assert!(response.is_ok());
    }

    #[tokio::test]
    async fn test_api_token_header() {
        // Arrange
        let token = "abc-123".to_string();
        let client = BaseClient::new(&MOCK_SERVER.base_url(), Some(&token)).unwrap();

        let mock = MOCK_SERVER.mock(|when, then| {
            when.method(GET)
                .path("/test_token")
                .header("X-Dataverse-key", "abc-123");
            then.status(200).body("test");
        });

        // Act
        let response = client.get("test_token").await;

        // Assert
        assert!(response.is_ok());
        assert!(client.has_api_token());
        mock.assert();
    }

    #[tokio::test]
    async fn test_evaluate_response_decodes_envelope() {
        // Arrange
        let client = BaseClient::new(&MOCK_SERVER.base_url(), None).unwrap();

        let _m = MOCK_SERVER.mock(|when, then| {
            when.method(GET).path("/test_envelope");
            then.status(200)
                .json_body(serde_json::json!({"status": "OK", "data": "payload"}));
        });

        // Act
        let response = client.get("test_envelope").await;
        let envelope = evaluate_response::<String>(response).await.unwrap();

        // Assert
        assert!(envelope.status.is_ok());
        assert_eq!(envelope.data.unwrap(), "payload");
    }

    #[tokio::test]
    async fn test_evaluate_response_rejects_non_json() {
        let client = BaseClient::new(&MOCK_SERVER.base_url(), None).unwrap();

        let _m = MOCK_SERVER.mock(|when, then| {
            when.method(GET).path("/test_html");
            then.status(200).body("<html>not json</html>");
        });

        let response = client.get("test_html").await;
        let result = evaluate_response::<String>(response).await;

        assert!(matches!(
            result,
            Err(ReportError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = BaseClient::new("not a url", None);
        assert!(matches!(result, Err(ReportError::InvalidUrl { .. })));
    }
}
