//! Process Sentinel - Main Entry Point
//!
//! Một lần chạy = đúng một scan-and-report cycle: enumerate processes, hash
//! executables, query reputation service, ghi text report.

mod logic;

use logic::config::ScanConfig;
use logic::hasher::Sha256Hasher;
use logic::reputation::ReputationClient;
use logic::scanner::ProcessScanner;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Process Sentinel scan...");

    let config = ScanConfig::from_env();
    if !config.has_api_key() {
        log::warn!("VT_API_KEY is not set - reputation lookups will fail and be logged per process");
    }

    let hasher = Sha256Hasher;
    let client = ReputationClient::new(&config);
    let scanner = ProcessScanner::new(&hasher, &client);

    println!("Scanning running processes...");
    let run = scanner.scan();

    // Report write failure là lỗi duy nhất abort cả run
    if let Err(e) = logic::report::write_report(&run, &config.report_path) {
        log::error!("Failed to write report to {}: {}", config.report_path.display(), e);
        std::process::exit(1);
    }

    println!(
        "Scan complete: {} processes recorded, {} errors.",
        run.records.len(),
        run.errors.len()
    );
    println!("Report written to {}", config.report_path.display());
}
