//! 入力スプレッドシートの読み込み
//!
//! xlsx/xls/xlsb/ods は calamine、csv は csv クレートで読む。
//! 各シートの先頭行は見出しとして読み飛ばす。

use crate::error::{ReconcileError, Result};
use bib_reconcile_common::{CellValue, SourceRow};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::debug;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "xla", "ods"];

/// 全シートのデータ行を順に返す（見出し行は除く）
pub fn read_rows(path: &Path) -> Result<Vec<SourceRow>> {
    if !path.exists() {
        return Err(ReconcileError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if ext == "csv" {
        read_csv(path)
    } else if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
        read_workbook(path)
    } else {
        Err(ReconcileError::Spreadsheet(format!(
            "未対応の形式です: {} (xlsx/xls/xlsb/ods/csv)",
            path.display()
        )))
    }
}

fn read_workbook(path: &Path) -> Result<Vec<SourceRow>> {
    let mut workbook = open_workbook_auto(path)?;
    let mut rows = Vec::new();

    for sheet_name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&sheet_name)?;
        let before = rows.len();

        // 見出し行を除外
        for cells in range.rows().skip(1) {
            rows.push(cells.iter().map(cell_from_data).collect::<SourceRow>());
        }

        debug!(sheet = %sheet_name, rows = rows.len() - before, "sheet read");
    }

    Ok(rows)
}

fn read_csv(path: &Path) -> Result<Vec<SourceRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect::<SourceRow>(),
        );
    }

    Ok(rows)
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
