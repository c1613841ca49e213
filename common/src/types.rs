//! 共通データ型
//!
//! スプレッドシートの行と、カタログ検索結果の候補レコード。

use std::fmt;

/// スプレッドシートの1セル
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// 空セル・空白文字列か
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 整数として解釈する（"1999.0" → 1999、小数は切り捨て）
    pub fn as_integer(&self) -> Option<i64> {
        let value = match self {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Bool(b) => return Some(i64::from(*b)),
            CellValue::Empty => return None,
        };

        // i64 に収まらない値は数値として扱わない
        let value = value.trunc();
        if value.is_finite() && (i64::MIN as f64..i64::MAX as f64).contains(&value) {
            Some(value as i64)
        } else {
            None
        }
    }

    /// クエリに埋め込む文字列表現
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, "''"),
            CellValue::Text(s) => write!(f, "'{}'", s),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// 入力スプレッドシートの1データ行
///
/// 列位置: 0=ローカルID, 1=著者, 2=タイトル, 3=出版年, 4=ページ数ヒント
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceRow(pub Vec<CellValue>);

impl SourceRow {
    pub const AUTHOR: usize = 1;
    pub const TITLE: usize = 2;
    pub const PUBLICATION_YEAR: usize = 3;
    pub const PAGE_COUNT_HINT: usize = 4;

    pub fn new(cells: Vec<CellValue>) -> Self {
        Self(cells)
    }

    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.0.get(index)
    }

    /// ページ数ヒント（列がない場合は空セル扱い）
    pub fn page_count_hint(&self) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.0.get(Self::PAGE_COUNT_HINT).unwrap_or(&EMPTY)
    }
}

impl fmt::Display for SourceRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, cell) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell)?;
        }
        write!(f, "]")
    }
}

impl<T: Into<CellValue>> FromIterator<T> for SourceRow {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// カタログ検索の候補レコード
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CandidateRecord {
    pub id: String,
    pub author: String,
    pub title: String,
    pub publisher: String,
    pub publication_year: String,
    /// MARC 300$a（例: "xii, 345 p."）。タグがなければ None
    pub page_count: Option<String>,
}

impl fmt::Display for CandidateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CandidateRecord(id='{}', author='{}', title='{}', publisher='{}', publication_year='{}', page_count={})",
            self.id,
            self.author,
            self.title,
            self.publisher,
            self.publication_year,
            match &self.page_count {
                Some(p) => format!("'{}'", p),
                None => "None".to_string(),
            }
        )
    }
}

/// どの規則で一致したか（小さいほど優先）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchTier {
    /// ページ数表記中の数値がヒントと完全一致
    Numeric,
    /// ヒントの数字列を部分文字列として含む
    Contains,
    /// ヒント±1の数字列を部分文字列として含む
    Adjacent,
}

/// 絞り込み結果（0件の場合は Option::None で表す）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub id: String,
    pub tier: MatchTier,
    /// 候補リスト内の位置
    pub index: usize,
}

/// 実行統計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// 一致してMARCを書き出した行数
    pub matched: usize,
    /// 全データ行数（スキップ行を含む）
    pub total: usize,
    /// エラーでスキップした行数
    pub skipped: usize,
    /// 候補なし・絞り込めなかった行数
    pub no_match: usize,
}

impl RunStats {
    /// 統計ファイルに書く1行
    pub fn summary_line(&self) -> String {
        format!("Found {} of {} records.", self.matched, self.total)
    }
}
