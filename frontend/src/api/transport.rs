use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use log::debug;
use shared::api::{HttpResponse, Transport};
use shared::{DashboardError, Result};

use crate::api::api_url;

/// `fetch`-backed transport. The admin session rides on the browser's
/// same-origin cookie, so no headers are added here.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl GlooTransport {
    pub fn new() -> Self {
        Self
    }
}

fn network_error(error: gloo_net::Error) -> DashboardError {
    DashboardError::Network(error.to_string())
}

async fn read(response: Response) -> Result<HttpResponse> {
    let status = response.status();
    let body = response.text().await.map_err(network_error)?;
    debug!("{} {} ({} bytes)", status, response.url(), body.len());
    Ok(HttpResponse { status, body })
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn get(&self, path: &str) -> Result<HttpResponse> {
        let response = Request::get(&api_url(path))
            .send()
            .await
            .map_err(network_error)?;
        read(response).await
    }

    async fn post_json(&self, path: &str, body: String) -> Result<HttpResponse> {
        let response = Request::post(&api_url(path))
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;
        read(response).await
    }
}
