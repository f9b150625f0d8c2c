use std::time::{Duration, SystemTime, UNIX_EPOCH};

use reqwest::header::HeaderMap;

use crate::error::{Error, RpcError};
use crate::jsonrpc;
use crate::params::Params;
use crate::Result;

/// One request/response exchange per call; nothing is kept between calls.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
}

impl Transport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Millisecond timestamp. Collisions are harmless since every call
    /// owns its own HTTP exchange.
    pub fn next_id() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default()
    }

    pub async fn call(
        &self,
        url: &str,
        headers: HeaderMap,
        id: i64,
        method: &str,
        params: Params,
    ) -> Result<serde_json::Value> {
        let body = serde_json::to_vec(&jsonrpc::Request {
            jsonrpc: "2.0",
            method,
            id: Some(id),
            params: Some(params),
        })
        .map_err(Error::Encode)?;

        tracing::debug!(method, url, id, "sending request");
        let response = self
            .http
            .post(url)
            .headers(headers)
            .body(body)
            .send()
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let resp = Self::check_and_parse(status, &bytes)?;
        if let Some(resp_id) = resp.id.as_ref().and_then(serde_json::Value::as_i64) {
            if resp_id != id {
                tracing::warn!(method, id, resp_id, "response id does not match request");
            }
        }
        Self::into_result(resp)
    }

    fn check_and_parse(status: reqwest::StatusCode, body: &[u8]) -> Result<jsonrpc::Response> {
        let parsed = serde_json::from_slice::<jsonrpc::Response>(body);
        if status.is_success() {
            return parsed.map_err(|e| Error::Protocol(format!("invalid response body: {e}")));
        }
        match parsed {
            Ok(resp) => match resp.error.filter(|e| !e.is_null()) {
                Some(error) => Err(RpcError::from_payload(error).into()),
                None => Err(Error::protocol_unknown_signature()),
            },
            Err(e) => Err(Error::Protocol(format!("HTTP {status}: {e}"))),
        }
    }

    fn into_result(resp: jsonrpc::Response) -> Result<serde_json::Value> {
        if let Some(error) = resp.error() {
            return Err(RpcError::from_payload(error.clone()).into());
        }
        match resp.result {
            Some(result) => Ok(result.unwrap_or(serde_json::Value::Null)),
            None => Err(Error::protocol_unknown_signature()),
        }
    }
}
