use async_trait::async_trait;
use client::error::Result;
use client::{ApiError, HttpRequest, HttpResponse, Method, Transport};
use gloo_net::http::Request;

/// Browser `fetch` transport.
///
/// Every response the server produced comes back as `Ok`, whatever its
/// status; only failures to get a response at all become `ApiError::Network`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        log::debug!("{} request to: {}", request.method, request.url);

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Patch => Request::patch(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        let prepared = match &request.body {
            Some(body) => builder.body(body.as_str()),
            None => builder.build(),
        }
        .map_err(|e| {
            log::error!("{} {} - Failed to build request: {}", request.method, request.url, e);
            ApiError::Network(e.to_string())
        })?;

        let response = prepared.send().await.map_err(|e| {
            log::error!("{} {} - Request failed: {}", request.method, request.url, e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            log::error!("{} {} - Failed to read response body: {}", request.method, request.url, e);
            ApiError::Network(e.to_string())
        })?;

        log::trace!("{} {} - HTTP {} ({} bytes)", request.method, request.url, status, body.len());
        Ok(HttpResponse::new(status, body))
    }
}
