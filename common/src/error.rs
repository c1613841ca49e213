//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 行データが不正（年が数値でない、列が足りない等）
    #[error("Invalid row: {0}")]
    InvalidRow(String),

    /// 検索レスポンスの構造が想定と異なる
    #[error("Normalization error: {0}")]
    Normalization(String),

    #[error("Fetch limit exceeded: {requested} ids requested, at most {limit} allowed")]
    FetchLimitExceeded { requested: usize, limit: usize },

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 行単位でスキップすべきエラーか
    pub fn is_row_level(&self) -> bool {
        matches!(self, Error::InvalidRow(_) | Error::Normalization(_))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
