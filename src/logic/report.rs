//! Report Writer
//!
//! Render scan run thành một text artifact duy nhất: header + summary +
//! aligned table + error section. Đây là bước terminal của một run - lỗi ghi
//! file là fatal, mọi lỗi khác đã được nuốt trước đó.
//!
//! Table renderer chạy hai pass: pass một tính per-column max width trên
//! header + toàn bộ cell values (missing values đã substitute), pass hai pad
//! và in. Record set rỗng dùng fixed default widths thay vì fail.

use std::path::Path;

use chrono::Local;

use super::classifier;
use super::scanner::ScanRun;
use super::types::{Disposition, ProcessRecord};

// ============================================================================
// CONSTANTS
// ============================================================================

const COLUMN_COUNT: usize = 8;

const COLUMN_HEADERS: [&str; COLUMN_COUNT] = [
    "Process Name",
    "PID",
    "File Path",
    "SHA256 Hash",
    "Malicious",
    "Suspicious",
    "Harmless",
    "Status",
];

/// Fallback widths khi không có record nào để đo
const DEFAULT_COLUMN_WIDTHS: [usize; COLUMN_COUNT] = [20, 8, 40, 64, 9, 10, 8, 10];

const MISSING_VALUE: &str = "N/A";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// RENDERING
// ============================================================================

/// Render report với generation time hiện tại
pub fn render(run: &ScanRun) -> String {
    let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    render_with_timestamp(run, &timestamp)
}

fn render_with_timestamp(run: &ScanRun, timestamp: &str) -> String {
    let mut out = String::new();

    // Header block
    out.push_str(&"=".repeat(80));
    out.push('\n');
    out.push_str(" PROCESS SENTINEL - MALWARE SCAN REPORT\n");
    out.push_str(&format!(" Generated: {}\n", timestamp));
    out.push_str(&"=".repeat(80));
    out.push_str("\n\n");

    out.push_str(&render_summary(run));
    out.push('\n');
    out.push_str(&render_table(&run.records));

    if !run.errors.is_empty() {
        out.push('\n');
        out.push_str("ERRORS\n");
        out.push_str(&"-".repeat(6));
        out.push('\n');
        for error in &run.errors {
            out.push_str(&format!("{}\n", error));
        }
    }

    out
}

fn render_summary(run: &ScanRun) -> String {
    let total = run.records.len();
    let suspicious = run
        .records
        .iter()
        .filter(|r| classifier::classify(r.verdict_stats.as_ref()) == Disposition::Suspicious)
        .count();
    // Đúng hai buckets: mọi record không suspicious là clean
    let clean = total - suspicious;

    let mut out = String::new();
    out.push_str("SUMMARY\n");
    out.push_str(&"-".repeat(7));
    out.push('\n');
    out.push_str(&format!("Total processes scanned : {}\n", total));
    out.push_str(&format!("Suspicious              : {}\n", suspicious));
    out.push_str(&format!("Clean                   : {}\n", clean));
    out.push_str(&format!("Scan errors             : {}\n", run.errors.len()));
    out
}

fn render_table(records: &[ProcessRecord]) -> String {
    let rows: Vec<[String; COLUMN_COUNT]> = records.iter().map(row_cells).collect();
    let widths = column_widths(&rows);

    let mut out = String::new();
    out.push_str(&render_row(&COLUMN_HEADERS.map(String::from), &widths));
    out.push_str(&render_separator(&widths));
    for row in &rows {
        out.push_str(&render_row(row, &widths));
    }
    out
}

/// Pass một: max width per column trên header + values
fn column_widths(rows: &[[String; COLUMN_COUNT]]) -> [usize; COLUMN_COUNT] {
    if rows.is_empty() {
        return DEFAULT_COLUMN_WIDTHS;
    }

    let mut widths = [0usize; COLUMN_COUNT];
    for (i, header) in COLUMN_HEADERS.iter().enumerate() {
        widths[i] = header.len();
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }
    widths
}

fn render_row(cells: &[String; COLUMN_COUNT], widths: &[usize; COLUMN_COUNT]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    format!("{}\n", padded.join(" | ").trim_end())
}

fn render_separator(widths: &[usize; COLUMN_COUNT]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    format!("{}\n", segments.join("-+-"))
}

/// Substitute missing values trước khi đo width
fn row_cells(record: &ProcessRecord) -> [String; COLUMN_COUNT] {
    let stats = record.verdict_stats.as_ref();
    let disposition = classifier::classify(stats);

    [
        record.name.clone(),
        record.pid.to_string(),
        record
            .exe_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| MISSING_VALUE.to_string()),
        record
            .digest
            .clone()
            .unwrap_or_else(|| MISSING_VALUE.to_string()),
        stats.map(|s| s.malicious()).unwrap_or(0).to_string(),
        stats.map(|s| s.suspicious()).unwrap_or(0).to_string(),
        stats.map(|s| s.harmless()).unwrap_or(0).to_string(),
        disposition.as_str().to_string(),
    ]
}

// ============================================================================
// PERSISTENCE
// ============================================================================

/// Ghi report ra disk, overwrite artifact cũ.
///
/// Lỗi ở đây là fatal cho cả run - caller phải báo failure ra ngoài.
pub fn write_report(run: &ScanRun, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = render(run);
    std::fs::write(path, content)?;

    log::info!(
        "Report written: {} records, {} errors -> {}",
        run.records.len(),
        run.errors.len(),
        path.display()
    );
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::types::{ScanError, VerdictStats};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn record(pid: u32, name: &str, stats: Option<&[(&str, u32)]>) -> ProcessRecord {
        ProcessRecord {
            pid,
            name: name.to_string(),
            exe_path: Some(PathBuf::from(format!("/usr/bin/{}", name))),
            digest: Some("cd".repeat(32)),
            verdict_stats: stats.map(|pairs| VerdictStats {
                counts: pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), *v))
                    .collect::<HashMap<_, _>>(),
            }),
        }
    }

    #[test]
    fn test_empty_run_renders_well_formed_report() {
        let run = ScanRun::default();
        let report = render_with_timestamp(&run, "2024-01-01 00:00:00");

        assert!(report.contains("Total processes scanned : 0"));
        assert!(report.contains("Suspicious              : 0"));
        assert!(report.contains("Clean                   : 0"));
        assert!(report.contains("Scan errors             : 0"));
        // Table header vẫn xuất hiện, dùng default widths
        assert!(report.contains("Process Name"));
        assert!(report.contains("SHA256 Hash"));
        assert!(!report.contains("ERRORS"));
    }

    #[test]
    fn test_detected_record_shows_counts_and_status() {
        let run = ScanRun {
            records: vec![record(
                99,
                "evil",
                Some(&[("malicious", 2), ("suspicious", 0), ("harmless", 70)]),
            )],
            errors: vec![],
        };
        let report = render_with_timestamp(&run, "2024-01-01 00:00:00");

        let row = report
            .lines()
            .find(|l| l.starts_with("evil"))
            .expect("row for record");
        let cells: Vec<&str> = row.split('|').map(str::trim).collect();
        assert_eq!(cells[4], "2");
        assert_eq!(cells[5], "0");
        assert_eq!(cells[6], "70");
        assert_eq!(cells[7], "Suspicious");
        assert!(report.contains("Suspicious              : 1"));
        assert!(report.contains("Clean                   : 0"));
    }

    #[test]
    fn test_missing_stats_render_as_zero_and_clean() {
        let run = ScanRun {
            records: vec![record(7, "unknown", None)],
            errors: vec![],
        };
        let report = render_with_timestamp(&run, "2024-01-01 00:00:00");

        let row = report.lines().find(|l| l.starts_with("unknown")).unwrap();
        let cells: Vec<&str> = row.split('|').map(str::trim).collect();
        assert_eq!(cells[4], "0");
        assert_eq!(cells[5], "0");
        assert_eq!(cells[6], "0");
        assert_eq!(cells[7], "Clean");
    }

    #[test]
    fn test_missing_path_and_digest_render_na() {
        let mut rec = record(5, "partial", None);
        rec.exe_path = None;
        rec.digest = None;

        let cells = row_cells(&rec);
        assert_eq!(cells[2], "N/A");
        assert_eq!(cells[3], "N/A");
    }

    #[test]
    fn test_column_width_covers_longest_value() {
        let long_name = "a-process-with-a-very-long-name-indeed";
        let rows = vec![row_cells(&record(1, long_name, None))];
        let widths = column_widths(&rows);

        assert_eq!(widths[0], long_name.len());
        // PID column không bao giờ hẹp hơn header
        assert_eq!(widths[1], "PID".len());
    }

    #[test]
    fn test_errors_section_lists_every_error() {
        let run = ScanRun {
            records: vec![],
            errors: vec![
                ScanError::new(11, "process vanished"),
                ScanError::new(22, "reputation lookup failed: Unexpected HTTP status 500"),
            ],
        };
        let report = render_with_timestamp(&run, "2024-01-01 00:00:00");

        assert!(report.contains("ERRORS"));
        assert!(report.contains("[PID 11] process vanished"));
        assert!(report.contains("[PID 22] reputation lookup failed"));
        assert!(report.contains("Scan errors             : 2"));
    }

    #[test]
    fn test_summary_buckets_are_exhaustive() {
        let run = ScanRun {
            records: vec![
                record(1, "flagged", Some(&[("malicious", 3)])),
                record(2, "clean", Some(&[("harmless", 50)])),
                record(3, "unknown", None),
            ],
            errors: vec![],
        };
        let report = render_with_timestamp(&run, "2024-01-01 00:00:00");

        // Suspicious + Clean == total, không có bucket thứ ba
        assert!(report.contains("Total processes scanned : 3"));
        assert!(report.contains("Suspicious              : 1"));
        assert!(report.contains("Clean                   : 2"));
    }

    #[test]
    fn test_render_is_stable_for_identical_input() {
        let run = ScanRun {
            records: vec![record(3, "stable", Some(&[("harmless", 10)]))],
            errors: vec![],
        };

        let first = render_with_timestamp(&run, "2024-01-01 00:00:00");
        let second = render_with_timestamp(&run, "2024-01-01 00:00:00");
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_report_creates_parent_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.txt");

        let run = ScanRun::default();
        write_report(&run, &path).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(first.contains("PROCESS SENTINEL"));

        // Second run overwrites, no append
        write_report(&run, &path).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert_eq!(first.lines().count(), second.lines().count());
    }

    #[test]
    fn test_write_report_to_directory_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let run = ScanRun::default();

        assert!(write_report(&run, dir.path()).is_err());
    }
}
