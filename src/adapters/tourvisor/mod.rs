//! Tourvisor Adapter - [`InventoryProvider`] over the Tourvisor XML API.
//!
//! The API is a plain HTTP GET surface: `search.php` starts an asynchronous
//! search job and `result.php` reads its status counters or the collected
//! hotel records. Credentials ride along as query parameters on every call.
//!
//! # Configuration
//!
//! ```ignore
//! let client = TourvisorClient::new("login@example.com", "password")
//!     .with_base_url("http://tourvisor.ru/xml")
//!     .with_timeout(Duration::from_secs(30));
//! ```

mod wire;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::config::TourvisorConfig;
use crate::domain::dialogue::SearchParameters;
use crate::domain::foundation::RequestId;
use crate::domain::search::{JobStatus, SearchResults};
use crate::ports::{InventoryProvider, ProviderError};

/// Date format the API expects in query parameters.
const WIRE_DATE_FORMAT: &str = "%d.%m.%Y";
/// Result page requested once a job converged.
const RESULT_PAGE: &str = "1";
/// Hotels per result page.
const RESULT_PAGE_SIZE: &str = "25";

/// HTTP client for the Tourvisor XML API.
pub struct TourvisorClient {
    login: String,
    password: Secret<String>,
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl TourvisorClient {
    /// Creates a client with default base URL and timeout.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        let timeout = Duration::from_secs(30);
        Self {
            login: login.into(),
            password: Secret::new(password.into()),
            base_url: "http://tourvisor.ru/xml".to_string(),
            timeout,
            client: Self::http_client(timeout),
        }
    }

    /// Builds a client from the application configuration.
    pub fn from_config(config: &TourvisorConfig) -> Self {
        Self::new(config.login.clone(), config.password.clone())
            .with_base_url(config.base_url.clone())
            .with_timeout(config.timeout())
    }

    /// Sets the API base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.client = Self::http_client(timeout);
        self
    }

    fn http_client(timeout: Duration) -> Client {
        Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client")
    }

    fn auth_query(&self) -> [(&'static str, String); 2] {
        [
            ("authlogin", self.login.clone()),
            ("authpass", self.password.expose_secret().clone()),
        ]
    }

    /// Query parameters of a search submission, in API order.
    fn search_query(params: &SearchParameters) -> [(&'static str, String); 9] {
        [
            ("departure", params.departure().as_str().to_string()),
            ("country", params.country().as_str().to_string()),
            ("datefrom", params.date_from().format(WIRE_DATE_FORMAT).to_string()),
            ("dateto", params.date_to().format(WIRE_DATE_FORMAT).to_string()),
            ("nightsfrom", params.nights_from().to_string()),
            ("nightsto", params.nights_to().to_string()),
            ("adults", params.adults().to_string()),
            ("child", params.children().to_string()),
            ("format", "xml".to_string()),
        ]
    }

    async fn get_body(
        &self,
        endpoint: &str,
        query: &[(&'static str, String)],
    ) -> Result<String, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(&self.auth_query())
            .query(query)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::network(format!(
                "{} answered HTTP {}",
                endpoint, status
            )));
        }

        response.text().await.map_err(request_error)
    }
}

#[async_trait]
impl InventoryProvider for TourvisorClient {
    async fn submit(&self, params: &SearchParameters) -> Result<RequestId, ProviderError> {
        tracing::debug!(
            departure = %params.departure(),
            country = %params.country(),
            adults = params.adults(),
            children = params.children(),
            "submitting search job"
        );

        let body = self
            .get_body("search.php", &Self::search_query(params))
            .await?;
        let request = wire::decode_submit(&body)?;

        tracing::info!(request = %request, "search job accepted");
        Ok(request)
    }

    async fn status(&self, request: &RequestId) -> Result<JobStatus, ProviderError> {
        let query = [
            ("requestid", request.as_str().to_string()),
            ("type", "status".to_string()),
            ("format", "xml".to_string()),
        ];
        let body = self.get_body("result.php", &query).await?;
        wire::decode_status(&body)
    }

    async fn fetch(&self, request: &RequestId) -> Result<SearchResults, ProviderError> {
        let query = [
            ("requestid", request.as_str().to_string()),
            ("type", "result".to_string()),
            ("page", RESULT_PAGE.to_string()),
            ("onpage", RESULT_PAGE_SIZE.to_string()),
            ("format", "xml".to_string()),
        ];
        let body = self.get_body("result.php", &query).await?;
        wire::decode_results(&body)
    }
}

fn request_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else if err.is_connect() {
        ProviderError::network(format!("connection failed: {}", err))
    } else {
        ProviderError::network(err.to_string())
    }
}
