use async_trait::async_trait;
use client::error::Result;
use client::{ApiError, HttpRequest, HttpResponse, Method, Transport};
use std::time::Duration;
use tracing::{error, trace};

/// Native transport backed by reqwest.
///
/// The configured timeout is the transport's own default; the executor adds
/// no timeout or retry on top of it.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> std::result::Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.request(to_reqwest(request.method), &request.url);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(|e| {
            error!("{} {} - no response: {}", request.method, request.url, e);
            ApiError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        trace!("{} {} - status {}", request.method, request.url, status);
        let body = response.text().await.map_err(|e| {
            error!("{} {} - failed to read body: {}", request.method, request.url, e);
            ApiError::Network(e.to_string())
        })?;

        Ok(HttpResponse { status, body })
    }
}
