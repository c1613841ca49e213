//! Bib Reconcile Common Library
//!
//! 通信・ファイル入出力を含まない純粋なロジック:
//! 検索条件の組み立て、検索結果の正規化、ページ数による絞り込み

pub mod types;
pub mod error;
pub mod query;
pub mod normalizer;
pub mod disambiguate;

pub use types::{CandidateRecord, CellValue, MatchResult, MatchTier, RunStats, SourceRow};
pub use error::{Error, Result};
pub use query::{RecordBatch, SearchQuery, FETCH_LIMIT};
pub use normalizer::normalize;
pub use disambiguate::disambiguate;
