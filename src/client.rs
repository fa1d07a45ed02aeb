use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Method, Response, StatusCode, header};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex as AsyncMutex;
use url::Url;

use crate::client_logger::ClientLogger;
use crate::credentials::{CredentialStore, TokenPair};
use crate::error::{Error, Result};
use crate::observability::{
    AUTH_CREDENTIALS_CLEARED, AUTH_REFRESH_FAILURES, AUTH_REFRESHES, AUTH_REFRESHES_COALESCED,
    CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUEST_RETRIES, CLIENT_REQUESTS,
};
use crate::types::{
    ChatRequest, ChatResponse, GoogleTokenRequest, LoginRequest, ProfileSaved,
    RefreshTokenRequest, RegisterRequest, Schedule, ScheduleCourse, StatusMessage, TokenResponse,
    UserProfile, UserResponse,
};

const DEFAULT_API_URL: &str = "http://localhost:8000";
const API_URL_ENV: &str = "WILDCAT_API_URL";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Error body shape used by the backend (`{"detail": "..."}`).
#[derive(Deserialize)]
struct ErrorDetail {
    detail: Option<String>,
}

/// Client for the Wildcat scheduling API.
///
/// The client owns the session's [`CredentialStore`] and recovers from token
/// expiry transparently: a 401 response triggers exactly one refresh and one
/// retry of the original request. If the refresh fails, the stored
/// credentials are cleared and the caller sees an authentication error.
#[derive(Clone)]
pub struct Wildcat {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
    credentials: CredentialStore,
    refresh_gate: Arc<AsyncMutex<()>>,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl Wildcat {
    /// Create a new Wildcat client with in-memory credential storage.
    ///
    /// The base URL can be provided directly, read from the WILDCAT_API_URL
    /// environment variable, or left to the development default
    /// (`http://localhost:8000`).
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, CredentialStore::in_memory(), None)
    }

    /// Create a new client with a custom credential store and timeout.
    pub fn with_options(
        base_url: Option<String>,
        credentials: CredentialStore,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let base_url = resolve_base_url(base_url)?;
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            credentials,
            refresh_gate: Arc::new(AsyncMutex::new(())),
            logger: None,
        })
    }

    /// Install a [`ClientLogger`] that observes request outcomes and token
    /// refresh activity.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The resolved backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session's credential store.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Create request headers, attaching the bearer token when present.
    fn headers(&self, token: Option<&str>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                Error::authentication("stored access token is not a valid header value")
            })?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Send one HTTP request and map transport-level failures.
    async fn dispatch<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&str>,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method, &url)
            .headers(self.headers(token)?);
        if let Some(body) = body {
            request = request.json(body);
        }

        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = request.send().await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());

        result.map_err(|e| {
            CLIENT_REQUEST_ERRORS.click();
            if e.is_timeout() {
                Error::timeout(
                    format!("request to {} timed out: {}", self.base_url, e),
                    Some(self.timeout.as_secs_f64()),
                )
            } else if e.is_connect() {
                Error::connection(
                    format!(
                        "unable to reach {}; is the backend running?",
                        self.base_url
                    ),
                    Some(Box::new(e)),
                )
            } else {
                Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
            }
        })
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        // FastAPI-style bodies carry a `detail` field; fall back to raw text.
        let detail = serde_json::from_str::<ErrorDetail>(&error_body)
            .ok()
            .and_then(|e| e.detail);
        let message = match detail {
            Some(detail) => detail,
            None if error_body.is_empty() => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
            None => error_body,
        };

        match status_code {
            400 => Error::bad_request(message),
            401 => Error::authentication(message),
            403 => Error::permission(message),
            404 => Error::not_found(message),
            408 => Error::timeout(message, None),
            429 => Error::rate_limit(message, retry_after),
            500 => Error::internal_server(message),
            502..=504 => Error::service_unavailable(message, retry_after),
            _ => Error::api(status_code, message),
        }
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    fn log_request(&self, method: &Method, path: &str, status: StatusCode) {
        if let Some(logger) = &self.logger {
            logger.log_request(method.as_str(), path, status.as_u16());
        }
    }

    fn log_refresh(&self, succeeded: bool) {
        if let Some(logger) = &self.logger {
            logger.log_refresh(succeeded);
        }
    }

    /// Issue a request against a relative endpoint path.
    ///
    /// The request is sent with the stored bearer token when one exists. A
    /// 401 response is recovered by exactly one token refresh and one retry
    /// of the original request; every other failure propagates to the
    /// caller. There is no retry loop.
    pub async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        // Initial attempt.
        let token = self.credentials.access_token();
        let response = self
            .dispatch(method.clone(), path, body, token.as_deref())
            .await?;
        self.log_request(&method, path, response.status());

        if response.status() != StatusCode::UNAUTHORIZED {
            if !response.status().is_success() {
                return Err(Self::process_error_response(response).await);
            }
            return Self::parse_json(response).await;
        }

        // The token may have expired; refresh and retry once.
        if !self.refresh_rejected(token.as_deref()).await {
            self.credentials.clear()?;
            AUTH_CREDENTIALS_CLEARED.click();
            return Err(Error::authentication(
                "session expired and token refresh failed; please log in again",
            ));
        }

        CLIENT_REQUEST_RETRIES.click();
        let token = self.credentials.access_token();
        let retry = self
            .dispatch(method.clone(), path, body, token.as_deref())
            .await?;
        self.log_request(&method, path, retry.status());
        if !retry.status().is_success() {
            return Err(Self::process_error_response(retry).await);
        }
        Self::parse_json(retry).await
    }

    /// Exchange the stored refresh token for a new token pair.
    ///
    /// Reports success as a boolean and never errors: a missing refresh
    /// token, a non-2xx response, or a transport failure all report `false`.
    /// On success the new pair is persisted atomically. At most one refresh
    /// is ever outstanding; see [`Wildcat::request`] for the 401 path.
    pub async fn refresh(&self) -> bool {
        self.refresh_rejected(None).await
    }

    /// Refresh after `rejected_token` was turned away with a 401.
    ///
    /// Concurrent 401s coalesce here: callers serialize on the refresh gate,
    /// and a caller that acquires it after the tokens already rotated skips
    /// the network call.
    async fn refresh_rejected(&self, rejected_token: Option<&str>) -> bool {
        let _gate = self.refresh_gate.lock().await;

        if let Some(rejected) = rejected_token
            && let Some(current) = self.credentials.access_token()
            && current != rejected
        {
            AUTH_REFRESHES_COALESCED.click();
            return true;
        }

        let Some(refresh_token) = self.credentials.refresh_token() else {
            return false;
        };

        AUTH_REFRESHES.click();
        let body = RefreshTokenRequest::new(refresh_token);
        let response = match self
            .dispatch(Method::POST, "/auth/refresh", Some(&body), None)
            .await
        {
            Ok(response) => response,
            Err(_) => return self.refresh_failed(),
        };
        if !response.status().is_success() {
            return self.refresh_failed();
        }
        let Ok(tokens) = response.json::<TokenResponse>().await else {
            return self.refresh_failed();
        };
        if self.credentials.store(TokenPair::from(&tokens)).is_err() {
            return self.refresh_failed();
        }
        self.log_refresh(true);
        true
    }

    fn refresh_failed(&self) -> bool {
        AUTH_REFRESH_FAILURES.click();
        self.log_refresh(false);
        false
    }

    /// POST credentials to an auth endpoint and persist the returned pair.
    async fn token_request<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        default_message: &str,
    ) -> Result<TokenResponse> {
        let response = self.dispatch(Method::POST, path, Some(body), None).await?;
        self.log_request(&Method::POST, path, response.status());

        if !response.status().is_success() {
            let detail = response
                .json::<ErrorDetail>()
                .await
                .ok()
                .and_then(|e| e.detail);
            return Err(Error::authentication(
                detail.unwrap_or_else(|| default_message.to_string()),
            ));
        }

        let tokens: TokenResponse = Self::parse_json(response).await?;
        self.credentials.store(TokenPair::from(&tokens))?;
        Ok(tokens)
    }

    /// Log in with an email and password.
    ///
    /// On success both returned tokens are stored atomically and the pair is
    /// returned. On failure the error carries the response's `detail`
    /// message when present.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        self.token_request(
            "/auth/login",
            &LoginRequest::new(email, password),
            "Login failed",
        )
        .await
    }

    /// Register a new account.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<TokenResponse> {
        self.token_request(
            "/auth/register",
            &RegisterRequest::new(email, password, name),
            "Registration failed",
        )
        .await
    }

    /// Log in with a Google ID token.
    pub async fn login_with_google(&self, google_token: &str) -> Result<TokenResponse> {
        self.token_request(
            "/auth/google/callback",
            &GoogleTokenRequest::new(google_token),
            "Google login failed",
        )
        .await
    }

    /// Log out, clearing both stored tokens.
    ///
    /// Subsequent requests are dispatched without a bearer header.
    pub fn logout(&self) -> Result<()> {
        self.credentials.clear()
    }

    /// Issue a GET request against a relative endpoint path.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<(), T>(Method::GET, path, None).await
    }

    /// Issue a POST request with a JSON body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Issue a PUT request with a JSON body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// Issue a DELETE request against a relative endpoint path.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request::<(), T>(Method::DELETE, path, None).await
    }

    /// Fetch the authenticated user's account summary.
    pub async fn me(&self) -> Result<UserResponse> {
        self.get("/auth/me").await
    }

    /// Fetch the authenticated user's extended profile.
    pub async fn profile(&self) -> Result<UserProfile> {
        self.get("/profile/me").await
    }

    /// Create the authenticated user's profile.
    pub async fn create_profile(&self, profile: &UserProfile) -> Result<ProfileSaved> {
        self.post("/profile", profile).await
    }

    /// Update the authenticated user's profile.
    pub async fn update_profile(&self, profile: &UserProfile) -> Result<ProfileSaved> {
        self.put("/profile/me", profile).await
    }

    /// Send a message to the scheduling assistant.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.post("/chat", request).await
    }

    /// List a student's saved schedules.
    pub async fn schedules(&self, netid: &str) -> Result<Vec<Schedule>> {
        let mut path = String::from("/schedule?netid=");
        path.extend(url::form_urlencoded::byte_serialize(netid.as_bytes()));
        self.get(&path).await
    }

    /// Fetch one schedule by id.
    pub async fn schedule(&self, schedule_id: i64) -> Result<Schedule> {
        self.get(&format!("/schedule/{schedule_id}")).await
    }

    /// Create or update a schedule.
    pub async fn save_schedule(&self, schedule: &Schedule) -> Result<StatusMessage> {
        self.post("/schedule", schedule).await
    }

    /// Delete a schedule by id.
    pub async fn delete_schedule(&self, schedule_id: i64) -> Result<StatusMessage> {
        self.delete(&format!("/schedule/{schedule_id}")).await
    }

    /// Add a course section to a schedule.
    pub async fn add_course(
        &self,
        schedule_id: i64,
        course: &ScheduleCourse,
    ) -> Result<StatusMessage> {
        self.post(&format!("/schedule/{schedule_id}/courses"), course)
            .await
    }

    /// Remove a course section from a schedule.
    pub async fn remove_course(&self, schedule_id: i64, course_id: i64) -> Result<StatusMessage> {
        self.delete(&format!("/schedule/{schedule_id}/courses/{course_id}"))
            .await
    }
}

impl fmt::Debug for Wildcat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wildcat")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("authenticated", &self.credentials.is_authenticated())
            .finish()
    }
}

/// Resolve the backend base URL: explicit override, then the environment,
/// then the development default.
fn resolve_base_url(base_url: Option<String>) -> Result<String> {
    let raw = match base_url {
        Some(url) => url,
        None => env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
    };
    let parsed = Url::parse(&raw)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::url(
            format!("unsupported backend URL scheme: {}", parsed.scheme()),
            None,
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}
