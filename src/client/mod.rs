//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::domain::{
    ApiKey, CreditBalance, DeliveryStatus, Message, PhoneNumber, RequestId, SecretKey,
    ValidationError, normalize,
};
use crate::transport::{
    decode_balance_json_response, decode_delivery_report_json_response,
    decode_send_json_response, encode_delivery_report_query, encode_send_json_body,
};

const DEFAULT_BASE_URL: &str = "https://apisms.beem.africa";
const DEFAULT_DELIVERY_BASE_URL: &str = "https://dlrapi.beem.africa";
const SEND_PATH: &str = "v1/send";
const BALANCE_PATH: &str = "public/v1/vendors/balance";
const DELIVERY_REPORT_PATH: &str = "public/v1/delivery-reports";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    reason: String,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a Url,
        auth: &'a Auth,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;

    fn get<'a>(
        &'a self,
        url: &'a Url,
        auth: &'a Auth,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a Url,
        auth: &'a Auth,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url.clone())
                .basic_auth(auth.api_key.as_str(), Some(auth.secret_key.as_str()))
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;
            Ok(read_response(response).await?)
        })
    }

    fn get<'a>(
        &'a self,
        url: &'a Url,
        auth: &'a Auth,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url.clone())
                .basic_auth(auth.api_key.as_str(), Some(auth.secret_key.as_str()))
                .send()
                .await?;
            Ok(read_response(response).await?)
        })
    }
}

async fn read_response(response: reqwest::Response) -> Result<HttpResponse, reqwest::Error> {
    let status = response.status();
    let reason = status.canonical_reason().unwrap_or_default().to_owned();
    let body = response.text().await?;
    Ok(HttpResponse {
        status: status.as_u16(),
        reason,
        body,
    })
}

#[derive(Debug, Clone)]
/// Beem credentials, sent as HTTP Basic auth (`base64(api_key:secret_key)`).
pub struct Auth {
    api_key: ApiKey,
    secret_key: SecretKey,
}

impl Auth {
    /// Environment variable read by [`Auth::from_env`] for the API key.
    pub const API_KEY_ENV: &'static str = "BEEM_API_KEY";
    /// Environment variable read by [`Auth::from_env`] for the secret key.
    pub const SECRET_KEY_ENV: &'static str = "BEEM_SECRET_KEY";

    /// Validate that both parts are non-empty.
    pub fn new(
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            secret_key: SecretKey::new(secret_key)?,
        })
    }

    /// Read credentials from `BEEM_API_KEY` and `BEEM_SECRET_KEY`.
    ///
    /// A missing variable is reported the same way as an empty one.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::new(
            std::env::var(Self::API_KEY_ENV).unwrap_or_default(),
            std::env::var(Self::SECRET_KEY_ENV).unwrap_or_default(),
        )
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`BeemClient`].
///
/// The `Display` output is the human-readable diagnostic also stored in
/// [`BeemClient::last_error`].
pub enum BeemError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, body serialization).
    #[error("{0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The gateway answered with a status other than 200.
    ///
    /// `reason` is the standard phrase for `status`. For a status without one
    /// it is the trimmed response body, or `Unknown` when the body is empty.
    #[error("Code: {status} - Reason: {reason}")]
    HttpStatus {
        status: u16,
        reason: String,
        body: Option<String>,
    },

    /// A 200 response whose body is not JSON or lacks the expected field.
    #[error("Invalid response")]
    InvalidResponse(#[source] Box<dyn StdError + Send + Sync>),

    /// A domain constructor or pre-flight check rejected an input.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A configured base URL could not be turned into an endpoint.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl BeemError {
    /// HTTP status of the failed call, if the gateway answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`BeemClient`].
///
/// Use this when you need to customize the endpoints, timeout, or user-agent.
pub struct BeemClientBuilder {
    auth: Auth,
    base_url: String,
    delivery_base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl BeemClientBuilder {
    /// Create a builder with the production endpoints and a five minute timeout.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            base_url: DEFAULT_BASE_URL.to_owned(),
            delivery_base_url: DEFAULT_DELIVERY_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Override the base URL serving `v1/send` and `public/v1/vendors/balance`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the base URL serving `public/v1/delivery-reports`.
    pub fn delivery_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.delivery_base_url = base_url.into();
        self
    }

    /// Set the timeout applied to each entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`BeemClient`].
    pub fn build(self) -> Result<BeemClient, BeemError> {
        let mut builder = reqwest::Client::builder().timeout(self.timeout);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| BeemError::Transport(Box::new(err)))?;

        Ok(BeemClient {
            auth: self.auth,
            send_endpoint: endpoint(&self.base_url, SEND_PATH)?,
            balance_endpoint: endpoint(&self.base_url, BALANCE_PATH)?,
            delivery_report_endpoint: endpoint(&self.delivery_base_url, DELIVERY_REPORT_PATH)?,
            http: Arc::new(ReqwestTransport { client }),
            last_error: Arc::default(),
        })
    }
}

fn endpoint(base_url: &str, path: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("{}/{path}", base_url.trim_end_matches('/')))
}

#[derive(Clone)]
/// High-level Beem SMS client.
///
/// Every operation returns its outcome directly as a `Result`. Clones share
/// the HTTP connection pool and the [`BeemClient::last_error`] slot.
pub struct BeemClient {
    auth: Auth,
    send_endpoint: Url,
    balance_endpoint: Url,
    delivery_report_endpoint: Url,
    http: Arc<dyn HttpTransport>,
    last_error: Arc<Mutex<String>>,
}

impl BeemClient {
    /// Create a client using the production endpoints.
    ///
    /// For more customization, use [`BeemClient::builder`].
    pub fn new(auth: Auth) -> Result<Self, BeemError> {
        BeemClientBuilder::new(auth).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> BeemClientBuilder {
        BeemClientBuilder::new(auth)
    }

    /// Send a message to all of its recipients.
    ///
    /// On success returns the gateway's `data` payload untouched. Whether the
    /// gateway accepted every recipient is only visible inside that payload.
    ///
    /// Errors:
    /// - [`BeemError::Validation`] if the message has no recipients (no request is made),
    /// - [`BeemError::HttpStatus`] for any status other than 200,
    /// - [`BeemError::InvalidResponse`] when the body has no `data`.
    pub async fn send(&self, message: Message) -> Result<serde_json::Value, BeemError> {
        let result = self.send_inner(&message).await;
        self.record("send", result)
    }

    async fn send_inner(&self, message: &Message) -> Result<serde_json::Value, BeemError> {
        if message.recipients().is_empty() {
            return Err(ValidationError::Empty {
                field: "recipients",
            }
            .into());
        }

        let body =
            encode_send_json_body(message).map_err(|err| BeemError::Transport(Box::new(err)))?;

        debug!(
            endpoint = %self.send_endpoint,
            recipients = message.recipients().len(),
            "sending message"
        );
        let response = self
            .http
            .post_json(&self.send_endpoint, &self.auth, body)
            .await
            .map_err(BeemError::Transport)?;
        let response = require_ok(response)?;

        decode_send_json_response(&response.body)
            .map_err(|err| BeemError::InvalidResponse(Box::new(err)))
    }

    /// Fetch the account's remaining credit.
    ///
    /// The balance is returned as text exactly as the gateway reported it.
    pub async fn get_balance(&self) -> Result<CreditBalance, BeemError> {
        let result = self.get_balance_inner().await;
        self.record("get_balance", result)
    }

    async fn get_balance_inner(&self) -> Result<CreditBalance, BeemError> {
        debug!(endpoint = %self.balance_endpoint, "fetching balance");
        let response = self
            .http
            .get(&self.balance_endpoint, &self.auth)
            .await
            .map_err(BeemError::Transport)?;
        let response = require_ok(response)?;

        decode_balance_json_response(&response.body)
            .map_err(|err| BeemError::InvalidResponse(Box::new(err)))
    }

    /// Look up the delivery status of `request_id` for one destination.
    ///
    /// `destination` is normalized against `region_hint` when possible;
    /// otherwise it is queried exactly as given. The gateway answers 404 when
    /// it has no report, which is returned as a successful
    /// [`DeliveryStatus::not_found`] rather than an error.
    ///
    /// Errors:
    /// - [`BeemError::Validation`] if `request_id` or the destination is empty
    ///   (no request is made),
    /// - [`BeemError::HttpStatus`] for any status other than 200 or 404,
    /// - [`BeemError::InvalidResponse`] when a 200 body has no `data`.
    pub async fn check_status(
        &self,
        request_id: &str,
        destination: &str,
        region_hint: &str,
    ) -> Result<DeliveryStatus, BeemError> {
        let result = self
            .check_status_inner(request_id, destination, region_hint)
            .await;
        self.record("check_status", result)
    }

    async fn check_status_inner(
        &self,
        request_id: &str,
        destination: &str,
        region_hint: &str,
    ) -> Result<DeliveryStatus, BeemError> {
        let request_id = RequestId::new(request_id)?;
        let destination =
            normalize(destination, region_hint).unwrap_or_else(|| destination.to_owned());
        if destination.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: PhoneNumber::FIELD,
            }
            .into());
        }

        let mut url = self.delivery_report_endpoint.clone();
        url.query_pairs_mut()
            .extend_pairs(encode_delivery_report_query(&destination, &request_id));

        debug!(endpoint = %url, "fetching delivery report");
        let response = self
            .http
            .get(&url, &self.auth)
            .await
            .map_err(BeemError::Transport)?;

        if response.status == 404 {
            debug!(%destination, request_id = request_id.as_str(), "no delivery report");
            return Ok(DeliveryStatus::not_found(destination, request_id));
        }
        let response = require_ok(response)?;

        decode_delivery_report_json_response(&destination, &request_id, &response.body)
            .map_err(|err| BeemError::InvalidResponse(Box::new(err)))
    }

    /// Diagnostic text of the most recent failed operation on this client.
    ///
    /// Returns an empty string until something fails. A later success does
    /// not clear it, so the value can be stale; prefer the `Result` returned
    /// by each operation.
    pub fn last_error(&self) -> String {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record<T>(
        &self,
        operation: &'static str,
        result: Result<T, BeemError>,
    ) -> Result<T, BeemError> {
        if let Err(err) = &result {
            warn!(operation, status = ?err.status(), error = %err, "gateway call failed");
            *self
                .last_error
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = err.to_string();
        }
        result
    }
}

fn require_ok(response: HttpResponse) -> Result<HttpResponse, BeemError> {
    debug!(status = response.status, "gateway responded");
    if response.status == 200 {
        return Ok(response);
    }
    let body = if response.body.trim().is_empty() {
        None
    } else {
        Some(response.body)
    };
    let reason = match (response.reason.trim(), body.as_deref()) {
        ("", Some(body)) => body.trim().to_owned(),
        ("", None) => "Unknown".to_owned(),
        (reason, _) => reason.to_owned(),
    };
    Err(BeemError::HttpStatus {
        status: response.status,
        reason,
        body,
    })
}
