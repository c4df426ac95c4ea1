use crate::core::socrata::credentials::Credentials;
use crate::domain::error::{DataSfError, DataSfResult};
use crate::domain::record::Record;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Capability to run one SoQL query against a bound dataset.
///
/// `Ok(None)` means the endpoint throttled the request; callers treat it as
/// the end of available data rather than a failure.
#[async_trait]
pub trait QueryClient: Send + Sync {
    async fn query(&self, soql: &str) -> DataSfResult<Option<Vec<Record>>>;
}

/// HTTP session bound to one Socrata dataset endpoint.
///
/// The underlying connection pool is released when the client is dropped,
/// so scoping a `SocrataClient` to one pagination run closes it on every
/// exit path.
pub struct SocrataClient {
    host: String,
    dataset_id: String,
    credentials: Credentials,
    timeout: Duration,
    http: reqwest::Client,
}

impl SocrataClient {
    const URI_SCHEME: &'static str = "https";
    const API_PATH: &'static str = "resource";
    const CONTENT_TYPE: &'static str = "json";

    /// Open a session for `dataset_id` on `host`
    pub fn open(
        host: impl Into<String>,
        dataset_id: impl Into<String>,
        credentials: Credentials,
    ) -> DataSfResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("datasf/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let client = Self {
            host: host.into(),
            dataset_id: dataset_id.into(),
            credentials,
            timeout: DEFAULT_TIMEOUT,
            http,
        };
        debug!(
            "Opened session for {} using {}",
            client.request_uri(),
            client.credentials
        );
        Ok(client)
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn request_uri(&self) -> String {
        format!(
            "{}://{}/{}/{}.{}",
            Self::URI_SCHEME,
            self.host,
            Self::API_PATH,
            self.dataset_id,
            Self::CONTENT_TYPE
        )
    }

    /// Build the GET request for a SoQL query without sending it
    pub fn build_request(&self, soql: &str) -> DataSfResult<reqwest::Request> {
        let builder = self
            .http
            .get(self.request_uri())
            .query(&[("$query", soql)])
            .header(ACCEPT, "application/json")
            .timeout(self.timeout);

        let builder = match &self.credentials {
            Credentials::ApiKey(key) => builder.header(AUTHORIZATION, format!("Basic {}", key)),
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
            Credentials::Anonymous => builder,
        };

        Ok(builder.build()?)
    }
}

#[async_trait]
impl QueryClient for SocrataClient {
    async fn query(&self, soql: &str) -> DataSfResult<Option<Vec<Record>>> {
        let request = self.build_request(soql)?;
        debug!("Dataset URI: {}", request.url());

        let response = self.http.execute(request).await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        process_response(status, &body)
    }
}

impl Drop for SocrataClient {
    fn drop(&mut self) {
        debug!("Closing session for {}", self.request_uri());
    }
}

/// Map an endpoint response to query results.
///
/// 200 and 202 decode the body as a JSON array of records, 409 is throttling
/// and yields `None`, anything else fails with `RequestFailed`.
pub fn process_response(status: u16, body: &str) -> DataSfResult<Option<Vec<Record>>> {
    match status {
        200 | 202 => serde_json::from_str::<Vec<Record>>(body)
            .map(Some)
            .map_err(|e| DataSfError::Decode(e.to_string())),
        409 => {
            warn!("You're being rate limited, please use credentials (API_KEY or USERNAME/PASSWORD)");
            Ok(None)
        }
        _ => Err(DataSfError::RequestFailed {
            status,
            body: body.to_string(),
        }),
    }
}
