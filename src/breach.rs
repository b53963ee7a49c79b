//! Breach lookup through the k-anonymity hash-range API.
//!
//! Only the first five hex characters of the password's SHA-1 leave the
//! process. The API answers with every known suffix sharing that prefix,
//! one `SUFFIX:COUNT` record per line, and the match happens locally.

use std::fmt;
use std::net::IpAddr;

use reqwest::Url;
use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};
use sha1::{Digest, Sha1};
use thiserror::Error;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::config::BreachConfig;
use crate::types::{BreachResult, BreachStatus};

/// Number of hex characters sent to the API.
pub const PREFIX_LEN: usize = 5;

const USER_AGENT: &str = concat!("pwd-hygiene/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BreachError {
    #[error("Range request failed: {0}")]
    Transport(String),
    #[error("Range API answered with HTTP {0}")]
    UnexpectedStatus(u16),
    #[error("Malformed range record: {0:?}")]
    MalformedResponse(String),
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Status and text body of a range request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeResponse {
    pub status: u16,
    pub body: String,
}

/// Transport used to issue the range GET request.
///
/// Implementations only report what the server said; interpreting the status
/// and body is left to [`BreachChecker`].
pub trait RangeFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<RangeResponse, BreachError>;
}

/// Blocking HTTP transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpRangeFetcher {
    client: Client,
    add_padding: bool,
}

impl HttpRangeFetcher {
    pub fn new(config: &BreachConfig) -> Result<Self, BreachError> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT);

        // Local mirrors are never reached through a system proxy
        if is_loopback(&config.endpoint) {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| BreachError::Client(e.to_string()))?;

        Ok(Self {
            client,
            add_padding: config.add_padding,
        })
    }
}

fn is_loopback(endpoint: &str) -> bool {
    let Ok(url) = Url::parse(endpoint) else {
        return false;
    };
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_matches(|c| c == '[' || c == ']')
            .parse::<IpAddr>()
            .is_ok_and(|ip| ip.is_loopback()),
        None => false,
    }
}

impl RangeFetcher for HttpRangeFetcher {
    fn fetch(&self, url: &str) -> Result<RangeResponse, BreachError> {
        let mut request = self.client.get(url);
        if self.add_padding {
            request = request.header("Add-Padding", "true");
        }

        let response = request
            .send()
            .map_err(|e| BreachError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| BreachError::Transport(e.to_string()))?;

        Ok(RangeResponse { status, body })
    }
}

/// SHA-1 of a password split at [`PREFIX_LEN`].
#[derive(Clone, PartialEq, Eq)]
pub struct HashRange {
    prefix: String,
    suffix: String,
}

impl HashRange {
    /// Hashes the UTF-8 bytes of `password`, rendering uppercase hex.
    pub fn of(password: &str) -> Self {
        let digest = format!("{:X}", Sha1::digest(password.as_bytes()));
        let (prefix, suffix) = digest.split_at(PREFIX_LEN);
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

// The suffix identifies the password almost as well as the full hash
impl fmt::Debug for HashRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRange")
            .field("prefix", &self.prefix)
            .field("suffix", &"[REDACTED]")
            .finish()
    }
}

/// Finds `suffix` in a range body.
///
/// Lines may end in `\n` or `\r\n`; blank lines are skipped. The comparison
/// is case-sensitive.
///
/// # Returns
/// - `Ok(Some(count))` for a matching record
/// - `Ok(None)` if no record matches
/// - `Err(MalformedResponse)` for a line without `:` or a matching line whose
///   count is not a decimal integer
pub fn find_suffix(body: &str, suffix: &str) -> Result<Option<u64>, BreachError> {
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (candidate, count) = line
            .split_once(':')
            .ok_or_else(|| BreachError::MalformedResponse(line.to_string()))?;

        if candidate == suffix {
            let count = count
                .parse::<u64>()
                .map_err(|_| BreachError::MalformedResponse(line.to_string()))?;
            return Ok(Some(count));
        }
    }
    Ok(None)
}

/// Checks passwords against the range API through a [`RangeFetcher`].
#[derive(Debug)]
pub struct BreachChecker<F = HttpRangeFetcher> {
    config: BreachConfig,
    fetcher: F,
}

impl BreachChecker<HttpRangeFetcher> {
    /// Creates a checker that talks HTTP using `config`.
    pub fn new(config: BreachConfig) -> Result<Self, BreachError> {
        let fetcher = HttpRangeFetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }
}

impl<F: RangeFetcher> BreachChecker<F> {
    pub fn with_fetcher(config: BreachConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &BreachConfig {
        &self.config
    }

    /// Looks the password up, issuing exactly one request.
    pub fn check(&self, password: &SecretString) -> BreachStatus {
        let range = HashRange::of(password.expose_secret());

        #[cfg(feature = "tracing")]
        tracing::debug!("Querying range for prefix {}", range.prefix());

        let response = self.fetcher.fetch(&self.config.range_url(range.prefix()));
        resolve(&self.config, &range, response)
    }
}

/// Turns the outcome of a range request into a status for `range`.
fn resolve(
    config: &BreachConfig,
    range: &HashRange,
    response: Result<RangeResponse, BreachError>,
) -> BreachStatus {
    let found = response.and_then(|response| {
        if response.status != 200 {
            return Err(BreachError::UnexpectedStatus(response.status));
        }
        find_suffix(&response.body, range.suffix())
    });

    match found {
        Ok(found) => {
            #[cfg(feature = "tracing")]
            tracing::info!(
                "Range lookup for prefix {} done: breached={}",
                range.prefix(),
                found.is_some()
            );

            match found {
                Some(0) if config.add_padding => BreachStatus::NotBreached,
                Some(count) => BreachStatus::Breached(count),
                None => BreachStatus::NotBreached,
            }
        }
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Breach lookup failed: {}", e);
            BreachStatus::LookupFailed(e)
        }
    }
}

/// Checks a password against the public API with default settings.
///
/// A failed lookup is reported as not found. Use [`BreachChecker::check`] to
/// tell the two apart.
pub fn check_breach(password: &SecretString) -> BreachResult {
    match BreachChecker::new(BreachConfig::default()) {
        Ok(checker) => checker.check(password).into(),
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Breach checker unavailable: {}", _e);
            BreachResult::default()
        }
    }
}

/// Non-blocking transport used by [`AsyncBreachChecker`].
#[cfg(feature = "async")]
pub trait AsyncRangeFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<RangeResponse, BreachError>> + Send;
}

/// Async HTTP transport backed by `reqwest`, safe to build and drop inside a
/// tokio runtime.
#[cfg(feature = "async")]
#[derive(Debug, Clone)]
pub struct AsyncHttpRangeFetcher {
    client: reqwest::Client,
    add_padding: bool,
}

#[cfg(feature = "async")]
impl AsyncHttpRangeFetcher {
    pub fn new(config: &BreachConfig) -> Result<Self, BreachError> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT);

        if is_loopback(&config.endpoint) {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| BreachError::Client(e.to_string()))?;

        Ok(Self {
            client,
            add_padding: config.add_padding,
        })
    }
}

#[cfg(feature = "async")]
impl AsyncRangeFetcher for AsyncHttpRangeFetcher {
    async fn fetch(&self, url: &str) -> Result<RangeResponse, BreachError> {
        let mut request = self.client.get(url);
        if self.add_padding {
            request = request.header("Add-Padding", "true");
        }

        let response = request
            .send()
            .await
            .map_err(|e| BreachError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| BreachError::Transport(e.to_string()))?;

        Ok(RangeResponse { status, body })
    }
}

/// Async counterpart of [`BreachChecker`].
#[cfg(feature = "async")]
#[derive(Debug)]
pub struct AsyncBreachChecker<F = AsyncHttpRangeFetcher> {
    config: BreachConfig,
    fetcher: F,
}

#[cfg(feature = "async")]
impl AsyncBreachChecker<AsyncHttpRangeFetcher> {
    pub fn new(config: BreachConfig) -> Result<Self, BreachError> {
        let fetcher = AsyncHttpRangeFetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }
}

#[cfg(feature = "async")]
impl<F: AsyncRangeFetcher> AsyncBreachChecker<F> {
    pub fn with_fetcher(config: BreachConfig, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &BreachConfig {
        &self.config
    }

    /// Looks the password up, issuing exactly one request.
    pub async fn check(&self, password: &SecretString) -> BreachStatus {
        let range = HashRange::of(password.expose_secret());

        #[cfg(feature = "tracing")]
        tracing::debug!("Querying range for prefix {}", range.prefix());

        let response = self
            .fetcher
            .fetch(&self.config.range_url(range.prefix()))
            .await;
        resolve(&self.config, &range, response)
    }
}

/// Async version that sends the breach status via channel.
///
/// Nothing is sent if `token` is cancelled first; an in-flight request is
/// dropped.
#[cfg(feature = "async")]
pub async fn check_breach_tx<F: AsyncRangeFetcher>(
    checker: &AsyncBreachChecker<F>,
    password: &SecretString,
    token: CancellationToken,
    tx: mpsc::Sender<BreachStatus>,
) {
    let status = tokio::select! {
        biased;
        _ = token.cancelled() => {
            #[cfg(feature = "tracing")]
            tracing::info!("Breach lookup cancelled");
            return;
        }
        status = checker.check(password) => status,
    };

    if let Err(_e) = tx.send(status).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send breach status: {}", _e);
    }
}


#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;
    use super::tests::{PASSWORD_SUFFIX, body_with, serve_once};

    struct StaticFetcher(&'static str);

    impl AsyncRangeFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<RangeResponse, BreachError> {
            Ok(RangeResponse {
                status: 200,
                body: self.0.to_string(),
            })
        }
    }

    fn static_checker() -> AsyncBreachChecker<StaticFetcher> {
        AsyncBreachChecker::with_fetcher(
            BreachConfig::default(),
            StaticFetcher("1E4C9B93F3F0682250B6CF8331B7EE68FD8:11"),
        )
    }

    fn http_checker(endpoint: &str) -> AsyncBreachChecker {
        let config = BreachConfig::default()
            .with_endpoint(endpoint)
            .expect("valid endpoint");
        AsyncBreachChecker::new(config).expect("client builds")
    }

    #[tokio::test]
    async fn test_check_breach_tx() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        let pwd = SecretString::new("password".to_string().into());

        check_breach_tx(&static_checker(), &pwd, token, tx).await;

        let status = rx.recv().await.expect("Should receive status");
        assert_eq!(status, BreachStatus::Breached(11));
    }

    #[tokio::test]
    async fn test_check_breach_tx_cancelled() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        token.cancel();
        let pwd = SecretString::new("password".to_string().into());

        check_breach_tx(&static_checker(), &pwd, token, tx).await;

        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_check_breach_tx_over_http() {
        let (endpoint, server) = serve_once("200 OK", body_with(PASSWORD_SUFFIX, 42));
        let checker = http_checker(&endpoint);
        let (tx, mut rx) = mpsc::channel(1);
        let pwd = SecretString::new("password".to_string().into());

        check_breach_tx(&checker, &pwd, CancellationToken::new(), tx).await;

        let status = rx.recv().await.expect("Should receive status");
        let request = server.join().expect("server thread");
        assert_eq!(status, BreachStatus::Breached(42));
        assert!(request.starts_with("GET /range/5BAA6 HTTP/1.1"), "{request}");

        // Dropping the HTTP client inside the runtime must not panic
        drop(checker);
    }

    #[tokio::test]
    async fn test_async_checker_http_404() {
        let (endpoint, server) = serve_once("404 Not Found", String::new());
        let checker = http_checker(&endpoint);

        let status = checker.check(&SecretString::new("password".to_string().into())).await;
        server.join().expect("server thread");

        assert_eq!(status, BreachStatus::LookupFailed(BreachError::UnexpectedStatus(404)));
    }

    #[tokio::test]
    async fn test_async_checker_connection_refused() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind local port");
            listener.local_addr().expect("local addr")
        };
        let checker = http_checker(&format!("http://{addr}/range/"));

        let status = checker.check(&SecretString::new("password".to_string().into())).await;
        assert!(matches!(status, BreachStatus::LookupFailed(BreachError::Transport(_))));
    }
}
