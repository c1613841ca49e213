//! 統合テスト用のカタログスタブ

#![allow(dead_code)]

use bib_reconcile::config::{RunConfig, TransportPolicy};
use bib_reconcile::{Catalog, ReconcileError, Result};
use bib_reconcile_common::{RecordBatch, SearchQuery};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

/// タイトルごとに決まったレスポンスを返すカタログ
#[derive(Default)]
pub struct FakeCatalog {
    pub responses: HashMap<String, Value>,
    pub failing_titles: Vec<String>,
    pub failing_fetch_ids: Vec<String>,
    pub empty_fetch_ids: Vec<String>,
    pub searches: RefCell<Vec<SearchQuery>>,
    pub fetches: RefCell<Vec<Vec<String>>>,
}

impl FakeCatalog {
    pub fn with_response(mut self, title: &str, payload: Value) -> Self {
        self.responses.insert(title.to_string(), payload);
        self
    }

    pub fn failing(mut self, title: &str) -> Self {
        self.failing_titles.push(title.to_string());
        self
    }

    /// この id を含む MARC 取得を 503 で失敗させる
    pub fn failing_fetch(mut self, id: &str) -> Self {
        self.failing_fetch_ids.push(id.to_string());
        self
    }

    /// この id の MARC 取得は空のボディを返す
    pub fn empty_fetch(mut self, id: &str) -> Self {
        self.empty_fetch_ids.push(id.to_string());
        self
    }
}

impl Catalog for FakeCatalog {
    async fn search(&self, query: &SearchQuery) -> Result<Value> {
        self.searches.borrow_mut().push(query.clone());

        if self.failing_titles.contains(&query.title) {
            return Err(ReconcileError::HttpStatus {
                status: 503,
                url: format!("http://catalog.test/bibs.json?title={}", query.title),
            });
        }

        Ok(self
            .responses
            .get(&query.title)
            .cloned()
            .unwrap_or_else(|| json!({ "bibs": [] })))
    }

    async fn fetch_records(&self, batch: &RecordBatch) -> Result<Vec<u8>> {
        self.fetches.borrow_mut().push(batch.ids().to_vec());

        if batch.ids().iter().any(|id| self.failing_fetch_ids.contains(id)) {
            return Err(ReconcileError::HttpStatus {
                status: 503,
                url: format!("http://catalog.test/bibs.marc?id={}", batch.ids().join("%2C")),
            });
        }

        Ok(batch
            .ids()
            .iter()
            .filter(|id| !self.empty_fetch_ids.contains(*id))
            .flat_map(|id| format!("<MARC {}>", id).into_bytes())
            .collect())
    }
}

/// 検索レスポンス（1件 = (id, ページ数)）
pub fn bibs(hits: &[(u64, Option<&str>)]) -> Value {
    let bibs: Vec<Value> = hits
        .iter()
        .map(|(id, pages)| {
            let fields = match pages {
                Some(p) => json!([
                    {"245": {"subfields": [{"a": "Title"}]}},
                    {"300": {"subfields": [{"a": p}, {"c": "24 cm"}]}}
                ]),
                None => json!([{"245": {"subfields": [{"a": "Title"}]}}]),
            };
            json!({
                "id": id,
                "author": "Smith, J.",
                "title": "Title",
                "publisher": "PWN",
                "publicationYear": "1999",
                "marc": {"leader": "00000nam", "fields": fields}
            })
        })
        .collect();
    json!({ "bibs": bibs })
}

pub fn run_config(dir: &Path) -> RunConfig {
    RunConfig {
        input: dir.join("books.xlsx"),
        output: dir.join("out.mrc"),
        run_log: dir.join("records.txt"),
        stats_file: dir.join("stats.txt"),
        transport_policy: TransportPolicy::SkipRow,
        overwrite: false,
        progress: false,
    }
}
