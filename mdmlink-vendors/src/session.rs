//! Shared vendor session: wire profile, auth state, and transport.
//!
//! The three vendor backends differ in payload shapes and success markers
//! but share the same session mechanics: a cache-backed token established
//! once per instance, an auth header injected per the vendor's scheme, and
//! exactly one HTTP request per operation (GET without a payload, POST with
//! a JSON body otherwise). That shared core lives here; the adapters keep
//! only their vendor's wire shapes.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::Response;
use serde_json::Value;
use tracing::{debug, warn};

use mdmlink_core::MdmError;
use mdmlink_store::TokenCache;

/// Cached tokens live for one hour, at or below every vendor's own token
/// lifetime.
pub const TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Placeholder sent after a failed login. Requests carry it to the vendor
/// and fail there (fail-open), surfacing through normal response handling.
pub const FAILED_LOGIN_TOKEN: &str = "error";

/// Converts a transport error into the contract error form.
pub fn http_error(err: reqwest::Error) -> MdmError {
    MdmError::Http(err.to_string())
}

// ============================================================================
// Auth State
// ============================================================================

/// Session authentication state.
///
/// `Authenticated` and `Failed` are terminal for an instance's lifetime;
/// token expiry is handled only by the next fresh instance missing the
/// cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// No login attempted yet; sending in this state is a programming
    /// error (`token_not_found`).
    Unauthenticated,
    /// Holding a vendor token.
    Authenticated(String),
    /// Login failed; requests proceed fail-open with a placeholder token.
    Failed(String),
}

impl AuthState {
    /// True once a login attempt has settled, successfully or not.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Unauthenticated)
    }

    /// The token to put on the wire.
    pub fn wire_token(&self) -> Result<&str, MdmError> {
        match self {
            Self::Unauthenticated => Err(MdmError::TokenNotFound),
            Self::Authenticated(token) => Ok(token),
            Self::Failed(_) => Ok(FAILED_LOGIN_TOKEN),
        }
    }
}

// ============================================================================
// Wire Profile
// ============================================================================

/// How a vendor expects its auth token presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `authorization: <token>` with no prefix.
    Raw,
    /// `authorization: Bearer <token>`.
    Bearer,
    /// `token: <token>`, plus `X-API-Key` on every request.
    TokenHeader,
}

/// Static wire configuration for one vendor backend.
#[derive(Debug, Clone)]
pub struct WireProfile {
    /// Vendor base URL, no trailing slash.
    pub base_url: String,
    /// Token cache key for this vendor.
    pub token_key: &'static str,
    /// Auth header scheme.
    pub scheme: AuthScheme,
    /// Static API key, for schemes that require one.
    pub api_key: Option<String>,
}

// ============================================================================
// Vendor Session
// ============================================================================

/// Per-adapter session: transport plus auth state.
#[derive(Debug)]
pub struct VendorSession {
    profile: WireProfile,
    cache: TokenCache,
    http: reqwest::Client,
    state: AuthState,
}

impl VendorSession {
    /// Creates an unauthenticated session.
    ///
    /// The client is deliberately built without a request timeout: a hung
    /// vendor request hangs the calling chain.
    pub fn new(profile: WireProfile, cache: TokenCache) -> Self {
        Self {
            profile,
            cache,
            http: reqwest::Client::new(),
            state: AuthState::Unauthenticated,
        }
    }

    /// The session's wire profile.
    pub fn profile(&self) -> &WireProfile {
        &self.profile
    }

    /// The session's auth state.
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Bare HTTP client, for vendor login flows that run before any token
    /// exists.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Joins a vendor path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.profile.base_url, path)
    }

    /// Resumes from a settled state or a cached token.
    ///
    /// Returns true when no login is needed: either the session already
    /// settled (a second `init` is a no-op) or the cache held a live token.
    pub fn resume_from_cache(&mut self) -> bool {
        if self.state.is_settled() {
            return true;
        }
        if let Some(token) = self.cache.get(self.profile.token_key) {
            debug!(key = self.profile.token_key, "reusing cached token");
            self.state = AuthState::Authenticated(token);
            return true;
        }
        false
    }

    /// Adopts a freshly issued token and caches it for [`TOKEN_TTL`].
    pub fn store_token(&mut self, token: String) {
        self.cache.set(self.profile.token_key, token.clone(), TOKEN_TTL);
        self.state = AuthState::Authenticated(token);
    }

    /// Records a failed login; the session continues fail-open.
    pub fn mark_failed(&mut self, reason: String) {
        warn!(key = self.profile.token_key, reason, "vendor login failed");
        self.state = AuthState::Failed(reason);
    }

    /// Builds the auth headers for the vendor's scheme.
    pub fn auth_headers(&self) -> Result<HeaderMap, MdmError> {
        let token = self.state.wire_token()?;
        let mut headers = HeaderMap::new();

        match self.profile.scheme {
            AuthScheme::Raw => {
                headers.insert(AUTHORIZATION, header_value(token)?);
            }
            AuthScheme::Bearer => {
                headers.insert(AUTHORIZATION, header_value(&format!("Bearer {token}"))?);
            }
            AuthScheme::TokenHeader => {
                headers.insert(HeaderName::from_static("token"), header_value(token)?);
                if let Some(key) = &self.profile.api_key {
                    headers.insert(HeaderName::from_static("x-api-key"), header_value(key)?);
                }
            }
        }

        Ok(headers)
    }

    /// Issues exactly one request: GET when `body` is absent, POST with a
    /// JSON body otherwise.
    pub async fn send(&self, path: &str, body: Option<&Value>) -> Result<Response, MdmError> {
        let url = self.url(path);
        let headers = self.auth_headers()?;

        let request = match body {
            Some(payload) => self.http.post(&url).headers(headers).json(payload),
            None => self.http.get(&url).headers(headers),
        };

        request.send().await.map_err(http_error)
    }

    /// Issues one GET with URL-encoded query parameters.
    pub async fn send_query(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Response, MdmError> {
        let url = self.url(path);
        let headers = self.auth_headers()?;

        self.http
            .get(&url)
            .headers(headers)
            .query(params)
            .send()
            .await
            .map_err(http_error)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, MdmError> {
    HeaderValue::from_str(value).map_err(|e| MdmError::Http(format!("invalid header value: {e}")))
}

// ============================================================================
// Tests
// ============================================================================
