//! ページ数による候補の絞り込み
//!
//! 行のページ数ヒント N に対して、候補のページ数表記（MARC 300$a）を調べる。
//!
//! ## 判定順
//! 1. 表記中の数値が N と一致（"xii, 345 p." の 345）
//! 2. N の数字列を部分文字列として含む
//! 3. N-1 / N+1 の数字列を部分文字列として含む
//!
//! 同じ段階では候補リストの先頭に近いものを採用する。

use crate::error::{Error, Result};
use crate::types::{CandidateRecord, CellValue, MatchResult, MatchTier};
use regex::Regex;

/// 候補を0件または1件に絞り込む
///
/// ヒントが空・0 の場合は `Ok(None)`。数値でないヒントは `Error::InvalidRow`。
/// ページ数のない候補は黙って読み飛ばす。
pub fn disambiguate(hint: &CellValue, candidates: &[CandidateRecord]) -> Result<Option<MatchResult>> {
    let Some(n) = parse_hint(hint)? else {
        return Ok(None);
    };

    let mut best: Option<MatchResult> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let Some(pages) = candidate.page_count.as_deref() else {
            continue;
        };
        let Some(tier) = match_tier(n, pages) else {
            continue;
        };

        if best.as_ref().map_or(true, |b| tier < b.tier) {
            best = Some(MatchResult {
                id: candidate.id.clone(),
                tier,
                index,
            });
        }

        if tier == MatchTier::Numeric {
            break;
        }
    }

    Ok(best)
}

/// ヒントを整数に変換。空・0以下は None
fn parse_hint(hint: &CellValue) -> Result<Option<i64>> {
    if hint.is_blank() || matches!(hint, CellValue::Bool(false)) {
        return Ok(None);
    }

    let n = hint
        .as_integer()
        .ok_or_else(|| Error::InvalidRow(format!("page count hint is not numeric: {}", hint)))?;

    Ok((n > 0).then_some(n))
}

/// 1件のページ数表記がヒントにどの段階で一致するか
pub fn match_tier(n: i64, pages: &str) -> Option<MatchTier> {
    lazy_static::lazy_static! {
        static ref NUMBER_RE: Regex = Regex::new(r"\d+").unwrap();
    }

    if NUMBER_RE
        .find_iter(pages)
        .any(|m| m.as_str().parse::<i64>().ok() == Some(n))
    {
        return Some(MatchTier::Numeric);
    }

    if pages.contains(&n.to_string()) {
        return Some(MatchTier::Contains);
    }

    let adjacent = [n.checked_sub(1), n.checked_add(1)];
    if adjacent
        .iter()
        .flatten()
        .any(|m| pages.contains(&m.to_string()))
    {
        return Some(MatchTier::Adjacent);
    }

    None
}
