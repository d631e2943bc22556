//! Scan Data Types - Shared Types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

// ============================================================================
// PROCESS TYPES
// ============================================================================

/// Snapshot của một process tại thời điểm enumerate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    pub pid: u32,
    pub name: String,
    pub exe_path: Option<PathBuf>,
}

/// Kết quả inspect một process (immutable sau khi tạo)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    pub exe_path: Option<PathBuf>,
    /// SHA256 của executable, None nếu hash không có
    pub digest: Option<String>,
    /// None = service chưa từng phân tích digest này (khác với all-zero)
    pub verdict_stats: Option<VerdictStats>,
}

// ============================================================================
// VERDICT TYPES
// ============================================================================

/// Aggregate engine verdict counts từ reputation service.
///
/// Open mapping: các category khác ngoài malicious/suspicious/harmless được
/// giữ lại nhưng không dùng để classify.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerdictStats {
    #[serde(flatten)]
    pub counts: HashMap<String, u32>,
}

impl VerdictStats {
    pub fn count(&self, category: &str) -> u32 {
        self.counts.get(category).copied().unwrap_or(0)
    }

    pub fn malicious(&self) -> u32 {
        self.count("malicious")
    }

    pub fn suspicious(&self) -> u32 {
        self.count("suspicious")
    }

    pub fn harmless(&self) -> u32 {
        self.count("harmless")
    }
}

// ============================================================================
// DISPOSITION
// ============================================================================

/// Binary disposition - không có bucket thứ ba
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    Suspicious,
    Clean,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Suspicious => "Suspicious",
            Disposition::Clean => "Clean",
        }
    }
}

// ============================================================================
// SCAN ERROR
// ============================================================================

/// Lỗi per-process, append-only trong một scan run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanError {
    pub pid: u32,
    pub message: String,
}

impl ScanError {
    pub fn new(pid: u32, message: impl Into<String>) -> Self {
        Self {
            pid,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[PID {}] {}", self.pid, self.message)
    }
}

// ============================================================================
// TESTS
// ============================================================================
