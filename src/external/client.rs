use std::sync::LazyLock;
use std::time::Duration;

/// `User-Agent` sent with every webhook call
pub const USER_AGENT: &str = concat!("slack-error-notifier/", env!("CARGO_PKG_VERSION"));

/// Global HTTP client instance
///
/// Initialized lazily on first access and shared by every plugin instance in
/// the process, so concurrent notifications reuse pooled connections.
///
/// # Features
/// - **Timeouts**: 30s request ceiling, 10s connect timeout (the dispatcher
///   applies a tighter per-request timeout from configuration)
/// - **Connection pooling**: keeps a few idle connections to the webhook host
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
///
/// # Example
/// ```ignore
/// use crate::external::client::HTTP_CLIENT;
///
/// async fn post(url: &str, body: &serde_json::Value) -> Result<u16, reqwest::Error> {
///     let response = HTTP_CLIENT.post(url).json(body).send().await?;
///     Ok(response.status().as_u16())
/// }
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to build HTTP client")
});
