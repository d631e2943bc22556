//! Scan Configuration
//!
//! Một scan run dùng đúng một `ScanConfig`, đọc từ environment với fallback
//! defaults. Không có CLI flags.

use std::path::PathBuf;

const DEFAULT_API_BASE: &str = "https://www.virustotal.com/api/v3";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const REPORT_FILE_NAME: &str = "process_scan_report.txt";

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Reputation service base URL
    pub api_base: String,
    /// API key gửi trong `x-apikey` header
    pub api_key: String,
    /// Timeout cho mỗi lookup request
    pub timeout_secs: u64,
    /// Đường dẫn report artifact (overwritten mỗi run)
    pub report_path: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            report_path: default_report_path(),
        }
    }
}

impl ScanConfig {
    /// Đọc config từ environment, fallback về defaults
    pub fn from_env() -> Self {
        Self {
            api_base: std::env::var("REPUTATION_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            api_key: std::env::var("VT_API_KEY").unwrap_or_default(),
            timeout_secs: std::env::var("SCAN_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            report_path: std::env::var("SCAN_REPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_report_path()),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

fn default_report_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ProcSentinel")
        .join(REPORT_FILE_NAME)
}

// ============================================================================
// TESTS
// ============================================================================
