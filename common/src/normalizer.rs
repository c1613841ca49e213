//! 検索レスポンスの正規化
//!
//! `bibs.json` の各ヒットを [`CandidateRecord`] に変換する。
//! ページ数は MARC フィールド 300 のサブフィールド a から取る。

use crate::error::{Error, Result};
use crate::types::CandidateRecord;
use serde_json::Value;

/// ページ数を持つ MARC タグ
pub const PAGE_COUNT_TAG: &str = "300";

/// 検索レスポンスを候補レコード列に変換（順序は維持）
pub fn normalize(payload: &Value) -> Result<Vec<CandidateRecord>> {
    let bibs = payload
        .get("bibs")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Normalization("response has no \"bibs\" array".into()))?;

    bibs.iter()
        .enumerate()
        .map(|(i, hit)| normalize_hit(hit).map_err(|e| match e {
            Error::Normalization(msg) => Error::Normalization(format!("bibs[{}]: {}", i, msg)),
            other => other,
        }))
        .collect()
}

/// 1件のヒットを変換
pub fn normalize_hit(hit: &Value) -> Result<CandidateRecord> {
    let id = hit
        .get("id")
        .and_then(scalar_to_string)
        .ok_or_else(|| Error::Normalization("hit has no id".into()))?;

    Ok(CandidateRecord {
        id,
        author: text_field(hit, "author"),
        title: text_field(hit, "title"),
        publisher: text_field(hit, "publisher"),
        publication_year: text_field(hit, "publicationYear"),
        page_count: page_count(hit),
    })
}

/// MARC 300$a を取り出す
///
/// 最初の "300" フィールドの先頭サブフィールドの "a"。
/// タグ・構造がなければ None（エラーにはしない）。
pub fn page_count(hit: &Value) -> Option<String> {
    let fields = hit.get("marc")?.get("fields")?.as_array()?;
    let field = fields.iter().find_map(|f| f.get(PAGE_COUNT_TAG))?;

    field
        .get("subfields")?
        .as_array()?
        .first()?
        .get("a")?
        .as_str()
        .map(str::to_string)
}

fn text_field(hit: &Value, key: &str) -> String {
    hit.get(key).and_then(scalar_to_string).unwrap_or_default()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
