//! Native HTTP client using reqwest.
//!
//! Requests are driven on a private current-thread tokio runtime so callers
//! stay synchronous: one request is sent and fully read before `send`
//! returns.

use super::config::ExecutionConfig;
use super::error::RequestError;
use super::HttpClient;
use crate::models::{HttpRequest, HttpResponse};
use log::{debug, info};
use std::time::Instant;
use tokio::runtime::{Builder, Runtime};

/// [`HttpClient`] backed by reqwest.
pub struct NativeClient {
    client: reqwest::Client,
    runtime: Runtime,
}

impl NativeClient {
    pub fn new(config: &ExecutionConfig) -> Result<Self, RequestError> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects as usize)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(redirect)
            .danger_accept_invalid_certs(!config.validate_ssl)
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))?;

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))?;

        Ok(Self { client, runtime })
    }

    async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        let start_time = Instant::now();

        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|_| RequestError::InvalidMethod(request.method.clone()))?;
        let url = url::Url::parse(&request.url)?;

        let mut req_builder = self.client.request(method, url);
        for (name, value) in request.headers.iter() {
            req_builder = req_builder.header(name, value);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let response = req_builder.send().await?;

        let status = response.status();
        let mut result = HttpResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
        );
        result.url = response.url().to_string();

        for (name, value) in response.headers() {
            match value.to_str() {
                Ok(value) => result.add_header(name.as_str(), value),
                Err(_) => debug!("Skipping non-text response header {}", name),
            }
        }

        result.body = response.bytes().await?.to_vec();
        result.duration = start_time.elapsed();
        Ok(result)
    }
}

impl HttpClient for NativeClient {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        info!("{} {}", request.method, request.url);
        let response = self.runtime.block_on(self.execute(request))?;
        info!(
            "{} {} in {:?}",
            response.status_code, response.status_text, response.duration
        );
        Ok(response)
    }
}
