//! Logic Module - Scan Pipeline
//!
//! Chứa pipeline của một scan run: enumerate -> hash -> lookup -> classify
//! -> report.

pub mod classifier;
pub mod config;
pub mod hasher;
pub mod report;
pub mod reputation;
pub mod scanner;
pub mod types;
