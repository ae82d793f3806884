use std::io::{Read, Write};
use std::sync::Arc;

use anyhow::Context;
use base64::Engine;
use serde_json::Value;

use crate::cli::ClientConfig;
use crate::config;
use crate::error::DispatchError;
use crate::protocol;

/// Status and body text of one HTTP exchange, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

/// One POST of a JSON payload to the RPC endpoint.
pub trait RpcTransport {
    fn post_json(&self, payload: &str) -> Result<RawReply, DispatchError>;
}

/// Blocking HTTP transport with Basic auth, built once per run.
pub struct HttpTransport {
    agent: ureq::Agent,
    endpoint: String,
    authorization: String,
}

impl HttpTransport {
    pub fn new(cfg: &ClientConfig) -> anyhow::Result<Self> {
        let mut builder = ureq::AgentBuilder::new().timeout(cfg.timeout);

        if cfg.accept_invalid_certs {
            log::warn!("TLS certificate validation is disabled for {}", cfg.endpoint);
            let connector = native_tls::TlsConnector::builder()
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true)
                .build()
                .context("failed building TLS connector")?;
            builder = builder.tls_connector(Arc::new(connector));
        }

        Ok(Self {
            agent: builder.build(),
            endpoint: cfg.endpoint.clone(),
            authorization: basic_auth_header(&cfg.user, &cfg.password),
        })
    }
}

impl RpcTransport for HttpTransport {
    fn post_json(&self, payload: &str) -> Result<RawReply, DispatchError> {
        log::debug!("POST {} ({} bytes)", self.endpoint, payload.len());

        let resp = match self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &self.authorization)
            .set("Content-Type", "application/json")
            .send_string(payload)
        {
            Ok(resp) => resp,
            // ureq reports 4xx/5xx as errors; for us they are just another status.
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(ureq::Error::Transport(t)) => {
                log::info!("Transport error talking to {}: {}", self.endpoint, t);
                return Err(DispatchError::Transport(t.to_string()));
            }
        };

        let status = resp.status();
        // into_string() caps bodies at 10 MB; large config dumps exceed that.
        let mut raw = Vec::new();
        resp.into_reader()
            .read_to_end(&mut raw)
            .map_err(|e| DispatchError::Transport(format!("failed reading response body: {e}")))?;
        let body = String::from_utf8_lossy(&raw).into_owned();
        log::debug!("Reply: HTTP {} ({} bytes)", status, body.len());
        Ok(RawReply { status, body })
    }
}

pub fn basic_auth_header(user: &str, password: &str) -> String {
    let token = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{password}"));
    format!("Basic {token}")
}

/// Sends one request and prints the server's answer to `out`.
///
/// On success the pretty-printed response is all that is written. On failure the
/// status line or raw body is written and the caller prints the error line.
pub fn send_request(
    transport: &dyn RpcTransport,
    request: &Value,
    out: &mut dyn Write,
) -> Result<(), DispatchError> {
    let payload = serde_json::to_string(request)?;
    let reply = transport.post_json(&payload)?;

    if reply.status != config::server::EXPECTED_STATUS {
        log::debug!("Unexpected HTTP status {}", reply.status);
        let _ = writeln!(out, "Status code {}", reply.status);
        return Err(DispatchError::UnexpectedStatus(reply.status));
    }

    match serde_json::from_str::<Value>(&reply.body) {
        Ok(v) => {
            let pretty = protocol::to_pretty_sorted(&v)?;
            let _ = writeln!(out, "{pretty}");
            Ok(())
        }
        Err(e) => {
            log::debug!("Response is not JSON: {}", e);
            let _ = writeln!(out, "{}", reply.body);
            Err(DispatchError::MalformedResponse)
        }
    }
}
