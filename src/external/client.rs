use std::sync::LazyLock;
use std::time::Duration;

/// Global HTTP client shared by every HTTP-based provider
///
/// Built lazily on first access and reused for the process lifetime, so
/// connections to vendor endpoints are pooled across sends. Request and
/// connect timeouts live here; providers do not impose their own deadlines.
///
/// # Example
/// ```ignore
/// use crate::external::client::HTTP_CLIENT;
///
/// async fn post_form(url: &str) -> Result<String, reqwest::Error> {
///     HTTP_CLIENT
///         .post(url)
///         .form(&[("uid", "42"), ("content", "hello")])
///         .send()
///         .await?
///         .text()
///         .await
/// }
/// ```
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client")
});
