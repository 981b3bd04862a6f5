//! Fluent request builder.
//!
//! [`Request`] only accumulates options. [`Request::execute`] turns them into
//! a `reqwest` client and request, runs the transfer and wraps the result in a
//! [`Response`].

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, REFERER};
use reqwest::redirect::Policy;
use reqwest::{Client, Method};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::constants::MAX_REDIRECTS;
use super::error::RequestError;
use super::proxy::Proxy;
use super::response::{Response, TransferInfo};
use crate::user_agent;

/// Timeout and pool settings handed to the HTTP engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Limit for the whole transfer.
    pub timeout: Option<Duration>,
    /// Limit for establishing the connection.
    pub connect_timeout: Option<Duration>,
    /// Maximum idle connections kept per host.
    pub max_connects: Option<usize>,
}

/// Builder for a single HTTP transfer.
///
/// Setters consume and return the builder; [`execute`](Self::execute) borrows
/// it, so one configured request can be run several times.
///
/// # Example
///
/// ```no_run
/// use fetcher_core::request::Request;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let response = Request::new_with_url("https://example.com/")
///     .header("Accept", "text/html")
///     .follow_location(true)
///     .fail_on_error(true)
///     .timeout(30)
///     .execute()
///     .await?;
/// println!("{} ({} bytes)", response.status_code, response.bytes_written);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Request {
    url: Option<String>,
    method: Method,
    body: Option<Vec<u8>>,
    headers: Vec<(String, String)>,
    fail_on_error: bool,
    follow_location: bool,
    auto_referrer: bool,
    referrer: Option<String>,
    user_agent: Option<String>,
    output_file: Option<PathBuf>,
    collect_info: bool,
    proxy: Option<Proxy>,
    connection: ConnectionOptions,
}

impl Request {
    /// Creates an empty GET request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a GET request for `url`.
    #[must_use]
    pub fn new_with_url(url: impl Into<String>) -> Self {
        Self::new().url(url)
    }

    /// Sets the target URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Switches to POST without changing the body.
    #[must_use]
    pub fn post(mut self) -> Self {
        self.method = Method::POST;
        self
    }

    /// Switches to POST and sets the body.
    #[must_use]
    pub fn post_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.method = Method::POST;
        self.body = Some(body.into());
        self
    }

    /// Switches to DELETE.
    #[must_use]
    pub fn delete(mut self) -> Self {
        self.method = Method::DELETE;
        self
    }

    /// Treats HTTP status >= 400 as an error.
    #[must_use]
    pub fn fail_on_error(mut self, fail_on_error: bool) -> Self {
        self.fail_on_error = fail_on_error;
        self
    }

    /// Follows redirects (up to 10 hops).
    #[must_use]
    pub fn follow_location(mut self, follow_location: bool) -> Self {
        self.follow_location = follow_location;
        self
    }

    /// Sends `Referer` automatically when following a redirect.
    #[must_use]
    pub fn auto_referrer(mut self, auto_referrer: bool) -> Self {
        self.auto_referrer = auto_referrer;
        self
    }

    /// Sets the `Referer` header.
    #[must_use]
    pub fn referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    /// Overrides the default tool User-Agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets one header, replacing an earlier value for the same name.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    /// Sets several headers, in order.
    #[must_use]
    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |request, (name, value)| request.header(name, value))
    }

    /// Writes the body to `path` instead of keeping it in memory.
    ///
    /// Also turns on [`follow_location`](Self::follow_location). The file is
    /// created (or truncated) when the response arrives.
    #[must_use]
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self.follow_location = true;
        self
    }

    /// Attaches [`TransferInfo`] to the response.
    #[must_use]
    pub fn collect_info(mut self, collect_info: bool) -> Self {
        self.collect_info = collect_info;
        self
    }

    /// Routes the transfer through a proxy.
    #[must_use]
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Limits the whole transfer, in seconds.
    #[must_use]
    pub fn timeout(self, secs: u64) -> Self {
        self.timeout_duration(Duration::from_secs(secs))
    }

    /// Limits the whole transfer, in milliseconds.
    #[must_use]
    pub fn timeout_ms(self, millis: u64) -> Self {
        self.timeout_duration(Duration::from_millis(millis))
    }

    fn timeout_duration(mut self, timeout: Duration) -> Self {
        self.connection.timeout = Some(timeout);
        self
    }

    /// Limits connection setup, in seconds.
    #[must_use]
    pub fn connect_timeout(self, secs: u64) -> Self {
        self.connect_timeout_duration(Duration::from_secs(secs))
    }

    /// Limits connection setup, in milliseconds.
    #[must_use]
    pub fn connect_timeout_ms(self, millis: u64) -> Self {
        self.connect_timeout_duration(Duration::from_millis(millis))
    }

    fn connect_timeout_duration(mut self, timeout: Duration) -> Self {
        self.connection.connect_timeout = Some(timeout);
        self
    }

    /// Caps idle pooled connections per host.
    #[must_use]
    pub fn max_connects(mut self, max_connects: usize) -> Self {
        self.connection.max_connects = Some(max_connects);
        self
    }

    /// The request method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The accumulated timeout and pool settings.
    #[must_use]
    pub fn connection(&self) -> &ConnectionOptions {
        &self.connection
    }

    /// Whether redirects will be followed.
    #[must_use]
    pub fn follows_location(&self) -> bool {
        self.follow_location
    }

    /// Runs the transfer.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` if:
    /// - no URL is set or it does not parse
    /// - a header, the proxy or the client configuration is rejected
    /// - the transfer fails or times out
    /// - fail-on-error is set and the status is 400 or above
    /// - the output file cannot be written
    #[instrument(skip(self), fields(method = %self.method, url = self.url.as_deref().unwrap_or_default()))]
    pub async fn execute(&self) -> Result<Response, RequestError> {
        let started = Instant::now();

        let raw_url = self.url.as_deref().ok_or(RequestError::MissingUrl)?;
        let url = Url::parse(raw_url).map_err(|_| RequestError::invalid_url(raw_url))?;

        let client = self.build_client()?;
        let mut request = client
            .request(self.method.clone(), url)
            .headers(self.header_map()?);
        if let Some(body) = &self.body {
            request = request.body(body.clone());
        }

        debug!("sending request");
        let response = request
            .send()
            .await
            .map_err(|e| RequestError::transfer(raw_url, e))?;

        let status_code = response.status().as_u16();
        if self.fail_on_error && status_code >= 400 {
            return Err(RequestError::http_status(raw_url, status_code));
        }

        let mut info = self
            .collect_info
            .then(|| TransferInfo::from_response(raw_url, &response));

        let (body, bytes_written) = match &self.output_file {
            Some(path) => (Vec::new(), write_body_to_file(response, raw_url, path).await?),
            None => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| RequestError::transfer(raw_url, e))?;
                let len = bytes.len() as u64;
                (bytes.to_vec(), len)
            }
        };

        let duration = started.elapsed();
        if let Some(info) = info.as_mut() {
            info.size_download = bytes_written;
            info.total_time = duration.as_secs_f64();
        }

        info!(
            status = status_code,
            bytes = bytes_written,
            elapsed_ms = duration.as_millis(),
            "request complete"
        );

        Ok(Response {
            status_code,
            body,
            bytes_written,
            file: self.output_file.clone(),
            info,
            duration,
        })
    }

    fn build_client(&self) -> Result<Client, RequestError> {
        let redirect = if self.follow_location {
            Policy::limited(MAX_REDIRECTS)
        } else {
            Policy::none()
        };
        let user_agent = self
            .user_agent
            .clone()
            .unwrap_or_else(user_agent::default_user_agent);

        let mut builder = Client::builder()
            .redirect(redirect)
            .referer(self.auto_referrer)
            .gzip(true)
            .user_agent(user_agent);
        if let Some(timeout) = self.connection.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connection.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(max) = self.connection.max_connects {
            builder = builder.pool_max_idle_per_host(max);
        }
        if let Some(proxy) = &self.proxy {
            debug!(proxy = %proxy.url(), "routing through proxy");
            builder = builder.proxy(proxy.to_reqwest()?);
        }

        builder.build().map_err(RequestError::client)
    }

    fn header_map(&self) -> Result<HeaderMap, RequestError> {
        let mut map = HeaderMap::with_capacity(self.headers.len() + 1);
        if let Some(referrer) = &self.referrer {
            let value = HeaderValue::from_str(referrer)
                .map_err(|_| RequestError::invalid_header(REFERER.as_str()))?;
            map.insert(REFERER, value);
        }
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| RequestError::invalid_header(name.clone()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|_| RequestError::invalid_header(name.clone()))?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}

/// Streams the response body into `path`, removing the file on failure.
async fn write_body_to_file(
    response: reqwest::Response,
    url: &str,
    path: &Path,
) -> Result<u64, RequestError> {
    let file = File::create(path)
        .await
        .map_err(|e| RequestError::io(path, e))?;

    let result = stream_to_file(file, response, url, path).await;
    if result.is_err() {
        debug!(path = %path.display(), "cleaning up partial file after error");
        let _ = tokio::fs::remove_file(path).await;
    }
    result
}

async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    path: &Path,
) -> Result<u64, RequestError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| RequestError::transfer(url, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| RequestError::io(path, e))?;
        bytes_written += chunk.len() as u64;
    }

    writer.flush().await.map_err(|e| RequestError::io(path, e))?;
    Ok(bytes_written)
}
