// src/health/probe.rs
use reqwest::{Client, StatusCode};
use std::fmt;

/// Result of a single GET against an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success(StatusCode),
    HttpError(StatusCode),
    TransportError(String),
}

impl ProbeOutcome {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(status) => write!(f, "up (HTTP {})", status),
            Self::HttpError(status) => write!(f, "down (HTTP {})", status),
            Self::TransportError(message) => write!(f, "down ({})", message),
        }
    }
}

#[derive(Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn probe(&self, url: &str) -> ProbeOutcome {
        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    ProbeOutcome::Success(status)
                } else {
                    ProbeOutcome::HttpError(status)
                }
            }
            Err(e) if e.is_timeout() => ProbeOutcome::TransportError("request timeout".to_string()),
            Err(e) => ProbeOutcome::TransportError(e.to_string()),
        }
    }
}
