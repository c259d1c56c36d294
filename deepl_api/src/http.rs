//! Authenticated request dispatcher shared by every endpoint.

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::Request;
use serde::Serialize;
use url::Url;

use crate::errors::ApiError;
use crate::query::Query;
use crate::shape::{Shape, JSON_MEDIA_TYPE};
use crate::Error;

/// Scheme of the `Authorization` header.
pub const AUTH_SCHEME: &str = "DeepL-Auth-Key";

/// Whole-request deadline used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Sends requests with the credential attached and turns responses into
/// typed values or an [`Error`].
///
/// Holds one pooled `reqwest::Client`; cloning it or sharing it between tasks
/// is cheap. Nothing is retried.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    api_key: String,
    authorization: HeaderValue,
}

impl HttpClient {
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_key: &str, timeout: Duration) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            authorization: authorization_header(api_key)?,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Replaces the credential used by subsequent calls.
    pub fn set_api_key(&mut self, api_key: &str) -> Result<(), Error> {
        self.authorization = authorization_header(api_key)?;
        self.api_key = api_key.to_string();
        Ok(())
    }

    /// Sends a built request and interprets the response according to `S`.
    ///
    /// The `Authorization` header is always overwritten with the client's
    /// credential and `Accept` is set from the shape.
    pub async fn send<S: Shape>(&self, mut request: Request) -> Result<S::Output, Error> {
        let headers = request.headers_mut();
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert(ACCEPT, HeaderValue::from_static(S::ACCEPT));

        let method = request.method().clone();
        let path = request.url().path().to_string();
        let started = Instant::now();

        let resp = self.client.execute(request).await?;
        let status = resp.status();
        tracing::debug!(
            %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "DeepL response received"
        );

        if !S::is_success(status) {
            // The error body is optional; failing to read it keeps the base text.
            let body = resp.bytes().await.unwrap_or_default();
            return Err(Error::Api(ApiError::from_response(status.as_u16(), &body)));
        }

        let body = resp.bytes().await?;
        tracing::trace!(bytes = body.len(), "decoding response body");
        S::decode(&body)
    }

    pub async fn get<S, Q>(&self, url: Url, query: Option<&Q>) -> Result<S::Output, Error>
    where
        S: Shape,
        Q: Query + ?Sized,
    {
        let url = match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        };
        let request = self.client.get(url).build()?;
        self.send::<S>(request).await
    }

    pub async fn post_json<S, B>(&self, url: Url, body: &B) -> Result<S::Output, Error>
    where
        S: Shape,
        B: Serialize + ?Sized,
    {
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE)
            .json(body)
            .build()?;
        self.send::<S>(request).await
    }

    pub async fn post_multipart<S: Shape>(&self, url: Url, form: Form) -> Result<S::Output, Error> {
        let request = self.client.post(url).multipart(form).build()?;
        self.send::<S>(request).await
    }

    pub async fn delete<S: Shape>(&self, url: Url) -> Result<S::Output, Error> {
        let request = self.client.delete(url).build()?;
        self.send::<S>(request).await
    }
}

fn authorization_header(api_key: &str) -> Result<HeaderValue, Error> {
    let mut value = HeaderValue::from_str(&format!("{} {}", AUTH_SCHEME, api_key))
        .map_err(|_| Error::InvalidApiKey)?;
    value.set_sensitive(true);
    Ok(value)
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("api_key", &"<redacted>")
            .finish()
    }
}
