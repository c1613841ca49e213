//! スプレッドシート読み込みテスト
//!
//! rust_xlsxwriter で作った xlsx を読み、見出し行の除外と値の型を検証

mod common;

use bib_reconcile::pipeline::run_pipeline;
use bib_reconcile::sheet::read_rows;
use bib_reconcile_common::CellValue;
use common::{bibs, run_config, FakeCatalog};
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::tempdir;

const HEADER: [&str; 5] = ["id", "author", "title", "year", "pages"];

fn write_sheet(path: &Path, sheets: &[&[(&str, &str, &str, f64, Option<f64>)]]) {
    let mut workbook = Workbook::new();

    for rows in sheets {
        let worksheet = workbook.add_worksheet();
        for (col, name) in HEADER.iter().enumerate() {
            worksheet.write_string(0, col as u16, *name).unwrap();
        }
        for (i, (id, author, title, year, pages)) in rows.iter().enumerate() {
            let r = i as u32 + 1;
            worksheet.write_string(r, 0, *id).unwrap();
            worksheet.write_string(r, 1, *author).unwrap();
            worksheet.write_string(r, 2, *title).unwrap();
            worksheet.write_number(r, 3, *year).unwrap();
            if let Some(p) = pages {
                worksheet.write_number(r, 4, *p).unwrap();
            }
        }
    }

    workbook.save(path).unwrap();
}

/// 見出し1行 + データR行 → R行
#[test]
fn test_header_row_is_skipped() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("books.xlsx");
    write_sheet(
        &path,
        &[&[
            ("1", "Smith, J.", "Title", 1999.0, Some(345.0)),
            ("2", "Nowak, A.", "Other", 2001.0, Some(120.0)),
            ("3", "Kowalski", "Third", 1985.0, None),
        ]],
    );

    let rows = read_rows(&path).unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.get(0) != Some(&CellValue::from("id"))));
    assert_eq!(rows[0].get(3), Some(&CellValue::Number(1999.0)));
    assert_eq!(rows[0].page_count_hint(), &CellValue::Number(345.0));
    assert!(rows[2].page_count_hint().is_blank());
}

/// 全シートを順に読み、各シートの見出し行を除く
#[test]
fn test_all_sheets_are_read() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("books.xlsx");
    write_sheet(
        &path,
        &[
            &[("1", "A", "First", 1999.0, Some(10.0))],
            &[
                ("2", "B", "Second", 2000.0, Some(20.0)),
                ("3", "C", "Third", 2001.0, Some(30.0)),
            ],
        ],
    );

    let rows = read_rows(&path).unwrap();
    let titles: Vec<String> = rows.iter().map(|r| r.get(2).unwrap().as_text()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

/// xlsx 入力からパイプライン全体を実行
#[tokio::test]
async fn test_run_pipeline_from_xlsx() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = run_config(dir.path());
    write_sheet(
        &config.input,
        &[&[
            ("x", "Smith, J.", "Title", 1999.0, Some(345.0)),
            ("y", "Nowak, A.", "Missing", 2001.0, Some(120.0)),
        ]],
    );
    let catalog = FakeCatalog::default().with_response("Title", bibs(&[(42, Some("xii, 345 p."))]));

    let stats = run_pipeline(&config, &catalog).await.unwrap();

    assert_eq!(stats.matched, 1);
    assert_eq!(stats.total, 2);
    assert_eq!(catalog.searches.borrow()[0].publication_year, 1999);
    assert_eq!(std::fs::read(&config.output).unwrap(), b"<MARC 42>");
    assert_eq!(
        std::fs::read_to_string(&config.stats_file).unwrap(),
        "Found 1 of 2 records."
    );

    let log = std::fs::read_to_string(&config.run_log).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert!(lines[0].starts_with("['x', 'Smith, J.', 'Title', 1999, 345] || "));
    assert_eq!(lines[1], "['y', 'Nowak, A.', 'Missing', 2001, 120] || No records found.");
}
