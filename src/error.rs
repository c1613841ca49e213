use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    Spreadsheet(String),

    #[error("CSV読み込みエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("通信エラー: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("カタログAPIがエラーを返しました (HTTP {status}): {url}")]
    HttpStatus { status: u16, url: String },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] bib_reconcile_common::Error),
}

impl ReconcileError {
    /// 行単位でスキップするエラー（入力不正・正規化失敗）
    pub fn is_row_level(&self) -> bool {
        match self {
            ReconcileError::Common(e) => e.is_row_level(),
            _ => false,
        }
    }

    /// カタログとの通信に起因するエラー
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ReconcileError::Transport(_) | ReconcileError::HttpStatus { .. } | ReconcileError::JsonParse(_)
        )
    }
}

impl From<calamine::Error> for ReconcileError {
    fn from(e: calamine::Error) -> Self {
        ReconcileError::Spreadsheet(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
