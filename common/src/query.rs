//! カタログAPIへのリクエスト組み立て
//!
//! - 検索: `{base}/bibs.json?title=..&publicationYear=..&author=..`
//! - 取得: `{base}/bibs.marc?id=<id1>%2C<id2>&limit=100`

use crate::error::{Error, Result};
use crate::types::{CellValue, SourceRow};
use url::Url;

/// 1回の取得リクエストで指定できるIDの上限
pub const FETCH_LIMIT: usize = 100;

/// 1行分の検索条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub title: String,
    pub author: String,
    pub publication_year: i64,
}

impl SearchQuery {
    /// 行から検索条件を作る
    ///
    /// 出版年は "1999.0" のような浮動小数表記も整数に丸める。
    /// 数値でなければ `Error::InvalidRow`（行スキップ扱い）。
    pub fn from_row(row: &SourceRow) -> Result<Self> {
        let author = required(row, SourceRow::AUTHOR, "author")?;
        let title = required(row, SourceRow::TITLE, "title")?;
        let year_cell = required(row, SourceRow::PUBLICATION_YEAR, "publication year")?;

        let publication_year = year_cell.as_integer().ok_or_else(|| {
            Error::InvalidRow(format!("publication year is not numeric: {}", year_cell))
        })?;

        Ok(Self {
            title: title.as_text(),
            author: author.as_text(),
            publication_year,
        })
    }

    /// 検索エンドポイントのURL
    pub fn url(&self, base: &str) -> Result<Url> {
        let mut url = endpoint(base, "bibs.json")?;
        url.query_pairs_mut()
            .append_pair("title", &self.title)
            .append_pair("publicationYear", &self.publication_year.to_string())
            .append_pair("author", &self.author);
        Ok(url)
    }
}

fn required<'a>(row: &'a SourceRow, index: usize, name: &str) -> Result<&'a CellValue> {
    row.get(index)
        .ok_or_else(|| Error::InvalidRow(format!("missing {} (column {})", name, index)))
}

fn endpoint(base: &str, path: &str) -> Result<Url> {
    Ok(Url::parse(&format!("{}/{}", base.trim_end_matches('/'), path))?)
}

/// 上限チェック済みの取得対象IDの集合
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordBatch {
    ids: Vec<String>,
}

impl RecordBatch {
    /// `FETCH_LIMIT` を超える場合は `Error::FetchLimitExceeded`
    pub fn new(ids: Vec<String>) -> Result<Self> {
        if ids.len() > FETCH_LIMIT {
            return Err(Error::FetchLimitExceeded {
                requested: ids.len(),
                limit: FETCH_LIMIT,
            });
        }
        Ok(Self { ids })
    }

    /// 任意個のIDを上限ごとのバッチに分割（順序は維持）
    pub fn chunked(ids: &[String]) -> Vec<Self> {
        ids.chunks(FETCH_LIMIT)
            .map(|chunk| Self { ids: chunk.to_vec() })
            .collect()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// 取得エンドポイントのURL（IDはカンマ区切り、`%2C` にエンコードされる）
    pub fn url(&self, base: &str) -> Result<Url> {
        let mut url = endpoint(base, "bibs.marc")?;
        url.query_pairs_mut()
            .append_pair("id", &self.ids.join(","))
            .append_pair("limit", &FETCH_LIMIT.to_string());
        Ok(url)
    }
}
