//! networking module
//! function:
//! - one request per call against the device web server, each with its own timeout
//! - classify failures: timeout / transport; non-2xx replies are returned to the caller untouched
//! - `HttpReply::success_body` turns a non-2xx reply into HttpStatusError

use std::time::Duration;
use async_trait::async_trait;
use serde_json::Value;
use super::error::SyncError;
use crate::{debug, trace};

const LOG_TAG: &str = "http";

/// a response that reached us, whatever its status
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: &str) -> Self {
        HttpReply { status, body: body.to_string() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// body of a 2xx reply, otherwise HttpStatusError
    pub fn success_body(self) -> Result<String, SyncError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(SyncError::http_status(self.status, format!("server returned status {}", self.status)))
        }
    }
}

/// transport seam between the sync cycles and the device
/// `path` is relative to the device root and may carry a query string
#[async_trait]
pub trait DeviceApi: Send + Sync {
    async fn get(&self, path: &str, timeout: Duration) -> Result<HttpReply, SyncError>;

    async fn post_json(&self, path: &str, body: Value, timeout: Duration) -> Result<HttpReply, SyncError>;
}

/// reqwest backed transport
pub struct ReqwestDeviceApi {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestDeviceApi {
    pub fn new(base_url: &str) -> Self {
        ReqwestDeviceApi {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn read_reply(path: &str, resp: reqwest::Response) -> Result<HttpReply, SyncError> {
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| classify(path, e))?;
        trace!(LOG_TAG, "{} -> {} {}", path, status, body);
        Ok(HttpReply::new(status, &body))
    }
}

#[async_trait]
impl DeviceApi for ReqwestDeviceApi {
    async fn get(&self, path: &str, timeout: Duration) -> Result<HttpReply, SyncError> {
        debug!(LOG_TAG, "GET {}", path);
        let resp = self.client
            .get(self.url(path))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(path, e))?;
        Self::read_reply(path, resp).await
    }

    async fn post_json(&self, path: &str, body: Value, timeout: Duration) -> Result<HttpReply, SyncError> {
        debug!(LOG_TAG, "POST {} {}", path, body);
        let resp = self.client
            .post(self.url(path))
            .json(&body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(path, e))?;
        Self::read_reply(path, resp).await
    }
}

/// reqwest error -> timeout or transport failure
fn classify(path: &str, e: reqwest::Error) -> SyncError {
    if e.is_timeout() {
        SyncError::timeout(format!("request to {} timed out", path))
    } else {
        SyncError::transport(format!("request to {} failed: {}", path, e))
    }
}
