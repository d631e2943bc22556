//! Reputation Client
//!
//! Mục đích: Query reputation service (VirusTotal v3 API shape) để lấy
//! aggregate verdict counts cho một file hash.
//!
//! Một request duy nhất cho mỗi digest - không retry, không backoff, không
//! rate limiting, không cache. Caller cần resilience phải tự thêm.

use std::time::Duration;

use serde::Deserialize;

use super::config::ScanConfig;
use super::types::VerdictStats;

// ============================================================================
// ERRORS
// ============================================================================

/// Lookup error types
#[derive(Debug, Clone)]
pub enum LookupError {
    /// Service trả về status code ngoài 2xx/404
    Status(u16),
    /// Không reach được service (DNS, connect, timeout)
    Network(String),
    /// Response body không parse được
    Parse(String),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::Status(code) => write!(f, "Unexpected HTTP status {}", code),
            LookupError::Network(message) => write!(f, "Network error: {}", message),
            LookupError::Parse(message) => write!(f, "Parse error: {}", message),
        }
    }
}

impl std::error::Error for LookupError {}

// ============================================================================
// API RESPONSE TYPES (for parsing)
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiResponse {
    data: ApiData,
}

#[derive(Debug, Deserialize)]
struct ApiData {
    attributes: ApiAttributes,
}

#[derive(Debug, Deserialize)]
struct ApiAttributes {
    last_analysis_stats: Option<VerdictStats>,
}

// ============================================================================
// VERDICT SOURCE
// ============================================================================

/// Seam cho scanner: cho phép stub service trong tests
pub trait VerdictSource {
    /// `Ok(None)` = service chưa từng thấy digest ("no data").
    /// Khác với `Ok(Some)` chứa toàn zero counts.
    fn lookup(&self, digest: &str) -> Result<Option<VerdictStats>, LookupError>;
}

// ============================================================================
// REPUTATION CLIENT
// ============================================================================

pub struct ReputationClient {
    agent: ureq::Agent,
    api_base: String,
    api_key: String,
}

impl ReputationClient {
    pub fn new(config: &ScanConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();

        Self {
            agent,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

impl VerdictSource for ReputationClient {
    fn lookup(&self, digest: &str) -> Result<Option<VerdictStats>, LookupError> {
        let url = format!("{}/files/{}", self.api_base, digest);

        let response = self
            .agent
            .get(&url)
            .set("x-apikey", &self.api_key)
            .call();

        match response {
            Ok(resp) => {
                let body = resp
                    .into_string()
                    .map_err(|e| LookupError::Parse(e.to_string()))?;

                let api_response: ApiResponse = serde_json::from_str(&body)
                    .map_err(|e| LookupError::Parse(e.to_string()))?;

                Ok(api_response.data.attributes.last_analysis_stats)
            }
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(ureq::Error::Status(code, _)) => Err(LookupError::Status(code)),
            Err(e) => Err(LookupError::Network(e.to_string())),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
