//! Bib Reconcile
//!
//! スプレッドシートの書誌一覧を data.bn.org.pl と照合し、
//! 一致したレコードのMARCを出力ファイルに追記する。

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod sheet;

pub use catalog::{Catalog, CatalogClient};
pub use config::{Config, RunConfig, TransportPolicy};
pub use error::{ReconcileError, Result};
pub use pipeline::{run_pipeline, run_rows, RowOutcome};
