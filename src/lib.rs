//! autoed report
//!
//! autoed_database.json からテキストレポートと静的HTMLテーブルを生成する。

pub mod cli;
pub mod config;
pub mod error;
pub mod report;

pub use autoed_report_common as common;
