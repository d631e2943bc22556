//! Process Scanner
//!
//! Mục đích: Enumerate running processes (sysinfo), hash executable của từng
//! process và query reputation service. Strictly sequential - một process
//! được xử lý xong hoàn toàn trước khi sang process tiếp theo.
//!
//! Per-process handling trả về `ScanOutcome` tường minh thay vì ném lỗi;
//! driver fold các outcome vào owned record/error lists.

use std::io::ErrorKind;

use sysinfo::System;

use super::hasher::FileDigest;
use super::reputation::VerdictSource;
use super::types::{ProcessRecord, ProcessSnapshot, ScanError};

// ============================================================================
// OUTCOME TYPES
// ============================================================================

/// Kết quả inspect một process
#[derive(Debug)]
pub enum ScanOutcome {
    /// Executable đọc được và đã hash. `error` được set khi reputation lookup
    /// thất bại - record vẫn được giữ, verdict_stats để trống.
    Record {
        record: ProcessRecord,
        error: Option<ScanError>,
    },
    /// Không có executable path resolve được - bỏ qua không comment
    /// (kernel threads, zombies, binaries đã bị xóa)
    Skipped,
    /// Process biến mất / access denied / file unreadable khi inspect
    Failed(ScanError),
}

/// Accumulated output của một scan run
#[derive(Debug, Default)]
pub struct ScanRun {
    pub records: Vec<ProcessRecord>,
    pub errors: Vec<ScanError>,
}

// ============================================================================
// SCANNER
// ============================================================================

pub struct ProcessScanner<'a> {
    hasher: &'a dyn FileDigest,
    verdicts: &'a dyn VerdictSource,
}

impl<'a> ProcessScanner<'a> {
    pub fn new(hasher: &'a dyn FileDigest, verdicts: &'a dyn VerdictSource) -> Self {
        Self { hasher, verdicts }
    }

    /// Một scan run hoàn chỉnh: enumerate, inspect từng process theo thứ tự,
    /// in progress ra stdout.
    pub fn scan(&self) -> ScanRun {
        let snapshots = enumerate_processes();
        log::info!("Enumerated {} running processes", snapshots.len());

        let total = snapshots.len();
        let mut run = ScanRun::default();

        for (index, snapshot) in snapshots.iter().enumerate() {
            println!("[{}/{}] {} (PID {})", index + 1, total, snapshot.name, snapshot.pid);
            self.accumulate(&mut run, self.inspect(snapshot));
        }

        log::info!(
            "Scan complete: {} records, {} errors",
            run.records.len(),
            run.errors.len()
        );

        run
    }

    /// Inspect các snapshot đã cho (không đụng sysinfo) - dùng cho tests và
    /// là core của `scan`.
    pub fn scan_snapshots(&self, snapshots: &[ProcessSnapshot]) -> ScanRun {
        let mut run = ScanRun::default();
        for snapshot in snapshots {
            self.accumulate(&mut run, self.inspect(snapshot));
        }
        run
    }

    fn accumulate(&self, run: &mut ScanRun, outcome: ScanOutcome) {
        match outcome {
            ScanOutcome::Record { record, error } => {
                run.records.push(record);
                if let Some(error) = error {
                    log::warn!("{}", error);
                    run.errors.push(error);
                }
            }
            ScanOutcome::Skipped => {}
            ScanOutcome::Failed(error) => {
                log::warn!("{}", error);
                run.errors.push(error);
            }
        }
    }

    /// Xử lý một process: resolve exe -> hash -> lookup.
    pub fn inspect(&self, snapshot: &ProcessSnapshot) -> ScanOutcome {
        let path = match &snapshot.exe_path {
            Some(path) => path,
            None => return ScanOutcome::Skipped,
        };

        // Executable đã biến mất hoặc không phải regular file
        if !path.is_file() {
            return ScanOutcome::Skipped;
        }

        let digest = match self.hasher.digest_file(path) {
            Ok(digest) => digest,
            Err(e) => {
                let message = match e.kind() {
                    ErrorKind::NotFound | ErrorKind::PermissionDenied => format!(
                        "process vanished or access denied while reading {}: {}",
                        path.display(),
                        e
                    ),
                    _ => format!("failed to hash {}: {}", path.display(), e),
                };
                return ScanOutcome::Failed(ScanError::new(snapshot.pid, message));
            }
        };

        match self.verdicts.lookup(&digest) {
            Ok(verdict_stats) => ScanOutcome::Record {
                record: ProcessRecord {
                    pid: snapshot.pid,
                    name: snapshot.name.clone(),
                    exe_path: Some(path.clone()),
                    digest: Some(digest),
                    verdict_stats,
                },
                error: None,
            },
            Err(e) => ScanOutcome::Record {
                record: ProcessRecord {
                    pid: snapshot.pid,
                    name: snapshot.name.clone(),
                    exe_path: Some(path.clone()),
                    digest: Some(digest),
                    verdict_stats: None,
                },
                error: Some(ScanError::new(
                    snapshot.pid,
                    format!("reputation lookup failed: {}", e),
                )),
            },
        }
    }
}

// ============================================================================
// ENUMERATION
// ============================================================================

/// Snapshot toàn bộ process table, sorted theo PID cho reproducible order
fn enumerate_processes() -> Vec<ProcessSnapshot> {
    let system = System::new_all();

    let mut snapshots: Vec<ProcessSnapshot> = system
        .processes()
        .iter()
        .map(|(pid, process)| ProcessSnapshot {
            pid: pid.as_u32(),
            name: process.name().to_string(),
            exe_path: process.exe().map(|p| p.to_path_buf()),
        })
        .collect();

    snapshots.sort_by_key(|s| s.pid);
    snapshots
}

// ============================================================================
// TESTS
// ============================================================================
