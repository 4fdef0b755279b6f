//! EZID session implementation.
//!
//! The [`EzidSession`] maps identifier operations onto single HTTP requests
//! against the EZID server and decodes the responses.
//!
//! # Example
//!
//! ```rust,ignore
//! use ezid::api::EzidSession;
//! use ezid::shared::Metadata;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = EzidSession::test("ark")?;
//!
//!     let ark = session.mint(Metadata::new()).await?.into_identifier();
//!     session.modify(&ark, "erc.who", "Karl Popper").await?;
//!     println!("{:?}", session.get(&ark).await?);
//!
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Method};

use crate::api::url;
use crate::auth::Credentials;
use crate::codec;
use crate::error::{ApiError, ApiResult};
use crate::network::{API_VERSION, CONTENT_TYPE, DEFAULT_SERVER_URL};
use crate::shared::{
    is_reserved_field, parse_unix_timestamp, Metadata, Profile, Record, Response, Scheme, Status,
    FIELD_CREATED, FIELD_PROFILE, FIELD_STATUS, FIELD_TARGET, FIELD_UPDATED,
};

/// `User-Agent` sent with every request.
fn user_agent() -> String {
    format!("ezid-rs/{} ({})", env!("CARGO_PKG_VERSION"), API_VERSION)
}

/// Builder for configuring [`EzidSession`].
#[derive(Debug, Clone)]
pub struct EzidSessionBuilder {
    server_url: String,
    credentials: Credentials,
    scheme: String,
    naa: String,
    timeout: Option<Duration>,
    default_headers: Vec<(String, String)>,
}

impl Default for EzidSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EzidSessionBuilder {
    /// Create a builder for the default server, sandbox account, `ark` scheme.
    pub fn new() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            credentials: Credentials::test(),
            scheme: Scheme::Ark.code().to_string(),
            naa: String::new(),
            timeout: None,
            default_headers: Vec::new(),
        }
    }

    /// Set the server base URL.
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the account credentials.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Set the scheme by name. Only the first three characters are used.
    pub fn scheme(mut self, name: impl Into<String>) -> Self {
        self.scheme = name.into();
        self
    }

    /// Set the naming authority / shoulder. Ignored for the sandbox account.
    pub fn naa(mut self, naa: impl Into<String>) -> Self {
        self.naa = naa.into();
        self
    }

    /// Set the request timeout. Without one, reqwest's default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Add a default header to all requests.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Build the session.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::UnknownScheme`] for a scheme other than `ark`
    /// or `doi`, and with [`ApiError::InvalidParameter`] for a bad header.
    pub fn build(self) -> ApiResult<EzidSession> {
        let scheme = Scheme::from_name(&self.scheme)?;

        // The sandbox account may only write under the test shoulders, so the
        // requested naa is replaced outright.
        let test_mode = self.credentials.is_test();
        let naa = if test_mode {
            if !self.naa.is_empty() && self.naa != scheme.test_shoulder() {
                tracing::debug!(
                    requested = %self.naa,
                    shoulder = scheme.test_shoulder(),
                    "Sandbox account: using test shoulder"
                );
            }
            scheme.test_shoulder().to_string()
        } else {
            self.naa
        };

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_str(&user_agent())
                .map_err(|e| ApiError::InvalidParameter(format!("Invalid user agent: {}", e)))?,
        );

        for (name, value) in self.default_headers {
            let header_name = reqwest::header::HeaderName::try_from(name.as_str())
                .map_err(|e| ApiError::InvalidParameter(format!("Invalid header name '{}': {}", name, e)))?;
            let header_value = reqwest::header::HeaderValue::from_str(&value)
                .map_err(|e| ApiError::InvalidParameter(format!("Invalid header value for '{}': {}", name, e)))?;
            headers.insert(header_name, header_value);
        }

        // EZID only accepts the record format, whatever the caller set.
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static(CONTENT_TYPE),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(EzidSession {
            http_client,
            server_url: self.server_url,
            credentials: self.credentials,
            scheme,
            naa,
            test_mode,
        })
    }
}

/// Authenticated session against an EZID server.
///
/// Holds the credentials plus the scheme and naming authority that bare
/// identifier suffixes are resolved against. Each operation issues exactly
/// one request; nothing is retried.
#[derive(Debug, Clone)]
pub struct EzidSession {
    http_client: Client,
    server_url: String,
    credentials: Credentials,
    scheme: Scheme,
    naa: String,
    test_mode: bool,
}

impl EzidSession {
    /// Create a session against the default server.
    ///
    /// `scheme` is a scheme name of which only the first three characters
    /// count. With the sandbox username the password is replaced by the
    /// sandbox password and `naa` by the scheme's test shoulder.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        scheme: impl Into<String>,
        naa: impl Into<String>,
    ) -> ApiResult<Self> {
        EzidSessionBuilder::new()
            .credentials(Credentials::new(username, password))
            .scheme(scheme)
            .naa(naa)
            .build()
    }

    /// Create a sandbox session for the given scheme.
    pub fn test(scheme: impl Into<String>) -> ApiResult<Self> {
        EzidSessionBuilder::new().scheme(scheme).build()
    }

    /// Create a new session builder for custom configuration.
    pub fn builder() -> EzidSessionBuilder {
        EzidSessionBuilder::new()
    }

    /// Get the server base URL.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Account username.
    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    /// Currently selected scheme.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Currently selected naming authority / shoulder.
    pub fn naa(&self) -> &str {
        &self.naa
    }

    /// Whether the session uses the sandbox account.
    pub fn is_test(&self) -> bool {
        self.test_mode
    }

    /// Select the scheme by code (`"ark"` or `"doi"`).
    ///
    /// The naa is left untouched; call [`set_naa`](Self::set_naa) to match.
    pub fn set_scheme(&mut self, code: &str) -> ApiResult<()> {
        self.scheme = Scheme::from_code(code)?;
        Ok(())
    }

    /// Set the naming authority / shoulder.
    pub fn set_naa(&mut self, naa: impl Into<String>) {
        self.naa = naa.into();
    }

    /// URL used by [`mint`](Self::mint).
    pub fn mint_url(&self) -> String {
        url::mint_url(self.scheme, &self.naa, &self.server_url)
    }

    /// URL of `identifier`'s record, qualifying bare suffixes.
    pub fn record_url(&self, identifier: &str) -> String {
        url::record_url(identifier, self.scheme, &self.naa, &self.server_url)
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    /// Send one request and decode the answer.
    async fn send(&self, method: Method, url: &str, body: Option<Vec<u8>>) -> ApiResult<Response> {
        tracing::debug!(method = %method, url = %url, "Sending EZID request");

        let mut request = self
            .http_client
            .request(method, url)
            .basic_auth(self.credentials.username(), Some(self.credentials.password()));
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(status = %status, url = %url, "EZID response");

        if status.is_success() {
            let text = response.text().await?;
            return codec::decode(&text);
        }

        Err(Self::rejection(response).await)
    }

    /// Turn a non-success response into [`ApiError::Rejected`] with its raw body.
    async fn rejection(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Failed to read error response body: {}", e);
                format!("HTTP {} (body unreadable: {})", status, e)
            }
        };
        ApiError::Rejected {
            status: status.as_u16(),
            body,
        }
    }

    // =========================================================================
    // Core operations
    // =========================================================================

    /// Mint a new identifier under the session's scheme and naa.
    ///
    /// Minted identifiers always start out `reserved`; any `_status` in
    /// `metadata` is overwritten.
    pub async fn mint(&self, mut metadata: Metadata) -> ApiResult<Response> {
        metadata.insert(FIELD_STATUS.to_string(), Status::Reserved.as_str().to_string());
        let body = codec::encode(&metadata);
        self.send(Method::POST, &self.mint_url(), Some(body)).await
    }

    /// Create a specific identifier.
    ///
    /// `_status` defaults to `reserved` when `metadata` does not set it. The
    /// server may normalise the identifier (DOIs are uppercased).
    pub async fn create(&self, identifier: &str, mut metadata: Metadata) -> ApiResult<Response> {
        metadata
            .entry(FIELD_STATUS.to_string())
            .or_insert_with(|| Status::Reserved.as_str().to_string());
        let body = codec::encode(&metadata);
        self.send(Method::PUT, &self.record_url(identifier), Some(body)).await
    }

    /// Set a single metadata field.
    ///
    /// Reserved names start with `_` (see [`crate::shared::FIELD_STATUS`] and
    /// friends); descriptive fields use `profile.field`, e.g. `erc.who`,
    /// `dc.title` or `datacite.publicationyear`.
    pub async fn modify(&self, identifier: &str, name: &str, value: &str) -> ApiResult<Response> {
        let metadata = Metadata::from([(name.to_string(), value.to_string())]);
        let body = codec::encode(&metadata);
        self.send(Method::POST, &self.record_url(identifier), Some(body)).await
    }

    /// Fetch an identifier and its metadata.
    pub async fn get(&self, identifier: &str) -> ApiResult<Response> {
        self.send(Method::GET, &self.record_url(identifier), None).await
    }

    /// Delete an identifier. Only reserved identifiers can be deleted.
    pub async fn delete(&self, identifier: &str) -> ApiResult<Response> {
        self.send(Method::DELETE, &self.record_url(identifier), None).await
    }

    // =========================================================================
    // Convenience operations
    // =========================================================================

    /// Fetch an identifier as a [`Record`].
    ///
    /// A `get` answer without metadata lines is a [`ApiError::MalformedResponse`].
    pub async fn get_record(&self, identifier: &str) -> ApiResult<Record> {
        match self.get(identifier).await? {
            Response::Record(record) => Ok(record),
            Response::Identifier(identifier) => Err(ApiError::MalformedResponse(format!(
                "no metadata returned for '{}'",
                identifier
            ))),
        }
    }

    async fn field(&self, identifier: &str, name: &str) -> ApiResult<String> {
        let mut record = self.get_record(identifier).await?;
        record
            .metadata
            .remove(name)
            .ok_or_else(|| ApiError::MissingField(name.to_string()))
    }

    /// Set the default display profile.
    pub async fn change_profile(&self, identifier: &str, profile: Profile) -> ApiResult<Response> {
        self.modify(identifier, FIELD_PROFILE, profile.as_str()).await
    }

    /// Current `_status` of an identifier.
    pub async fn get_status(&self, identifier: &str) -> ApiResult<Status> {
        let value = self.field(identifier, FIELD_STATUS).await?;
        Ok(Status::parse(&value))
    }

    /// Make an identifier public.
    pub async fn make_public(&self, identifier: &str) -> ApiResult<Response> {
        self.modify(identifier, FIELD_STATUS, Status::Public.as_str()).await
    }

    /// Mark an identifier unavailable.
    pub async fn make_unavailable(&self, identifier: &str) -> ApiResult<Response> {
        self.modify(identifier, FIELD_STATUS, Status::Unavailable.as_str()).await
    }

    /// Target URL an identifier resolves to.
    pub async fn get_target(&self, identifier: &str) -> ApiResult<String> {
        self.field(identifier, FIELD_TARGET).await
    }

    /// Change the target URL an identifier resolves to.
    pub async fn modify_target(&self, identifier: &str, target: &str) -> ApiResult<Response> {
        self.modify(identifier, FIELD_TARGET, target).await
    }

    /// Alias of [`modify_target`](Self::modify_target).
    #[deprecated(note = "use `modify_target`")]
    pub async fn change_target(&self, identifier: &str, target: &str) -> ApiResult<Response> {
        self.modify_target(identifier, target).await
    }

    /// Creation time of an identifier.
    pub async fn get_created(&self, identifier: &str) -> ApiResult<DateTime<Utc>> {
        let value = self.field(identifier, FIELD_CREATED).await?;
        parse_unix_timestamp(&value)
    }

    /// Last modification time of an identifier.
    pub async fn get_updated(&self, identifier: &str) -> ApiResult<DateTime<Utc>> {
        let value = self.field(identifier, FIELD_UPDATED).await?;
        parse_unix_timestamp(&value)
    }

    /// Write several fields and return the resulting record.
    ///
    /// EZID has no bulk update, so this issues one `modify` per pair. With
    /// `clear`, every non-reserved field of the current record that `pairs`
    /// does not mention is first set to the empty string. Reserved fields
    /// such as `_target` or `_coowner` are never cleared.
    ///
    /// Stops at the first failing request.
    pub async fn record_modify(
        &self,
        identifier: &str,
        pairs: &Metadata,
        clear: bool,
    ) -> ApiResult<Record> {
        if clear {
            let current = self.get_record(identifier).await?;
            let stale = current
                .metadata
                .keys()
                .filter(|name| !is_reserved_field(name) && !pairs.contains_key(*name));
            for name in stale {
                self.modify(identifier, name, "").await?;
            }
        }

        for (name, value) in pairs {
            self.modify(identifier, name, value).await?;
        }

        self.get_record(identifier).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TEST_USERNAME;

    #[test]
    fn test_session_creation() {
        let session = EzidSession::new("someuser", "s3cret", "ark", "13030/c7").unwrap();
        assert_eq!(session.server_url(), DEFAULT_SERVER_URL);
        assert_eq!(session.username(), "someuser");
        assert_eq!(session.scheme(), Scheme::Ark);
        assert_eq!(session.naa(), "13030/c7");
        assert!(!session.is_test());
    }

    #[test]
    fn test_sandbox_overrides_naa() {
        let session = EzidSession::new(TEST_USERNAME, "wrong", "doi", "10.9999/MINE").unwrap();
        assert!(session.is_test());
        assert_eq!(session.scheme(), Scheme::Doi);
        assert_eq!(session.naa(), "10.5072/FK2");

        let session = EzidSession::test("ark").unwrap();
        assert!(session.is_test());
        assert_eq!(session.naa(), "99999/fk4");
    }

    #[test]
    fn test_scheme_name_truncated() {
        let session = EzidSession::new("someuser", "pw", "arks", "").unwrap();
        assert_eq!(session.scheme(), Scheme::Ark);
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        let err = EzidSession::new("someuser", "pw", "urn", "").unwrap_err();
        assert!(matches!(err, ApiError::UnknownScheme(code) if code == "urn"));
    }

    #[test]
    fn test_session_builder() {
        let session = EzidSession::builder()
            .server_url("https://ezid.example.org/")
            .credentials(Credentials::new("someuser", "pw"))
            .scheme("doi")
            .naa("10.1234/X")
            .timeout_secs(60)
            .header("X-Custom", "test")
            .build()
            .unwrap();

        // Base URL should have trailing slash removed
        assert_eq!(session.server_url(), "https://ezid.example.org");
        assert_eq!(session.mint_url(), "https://ezid.example.org/shoulder/doi:10.1234/X");
    }

    #[test]
    fn test_builder_rejects_bad_header() {
        let err = EzidSession::builder()
            .header("bad header", "x")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter(_)));
    }

    #[test]
    fn test_setters() {
        let mut session = EzidSession::test("ark").unwrap();
        assert_eq!(session.scheme(), Scheme::Ark);

        session.set_scheme("doi").unwrap();
        assert_eq!(session.scheme(), Scheme::Doi);
        session.set_scheme("ark").unwrap();
        assert_eq!(session.scheme(), Scheme::Ark);

        session.set_naa(Scheme::Doi.test_shoulder());
        assert_eq!(session.naa(), "10.5072/FK2");
        session.set_naa(Scheme::Ark.test_shoulder());
        assert_eq!(session.naa(), "99999/fk4");
    }

    #[test]
    fn test_set_scheme_unknown_leaves_state() {
        let mut session = EzidSession::test("doi").unwrap();
        assert!(matches!(
            session.set_scheme("arks"),
            Err(ApiError::UnknownScheme(_))
        ));
        assert_eq!(session.scheme(), Scheme::Doi);
    }

    #[test]
    fn test_record_url_uses_session_state() {
        let session = EzidSession::test("ark").unwrap();
        assert_eq!(
            session.record_url("abc"),
            "https://ezid.cdlib.org/id/ark:/99999/fk4abc"
        );
        assert_eq!(
            session.record_url("doi:10.5072/FK2ABC"),
            "https://ezid.cdlib.org/id/doi:10.5072/FK2ABC"
        );
    }
}
