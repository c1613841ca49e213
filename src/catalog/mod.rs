//! 書誌カタログ（data.bn.org.pl）との通信

mod client;

pub use client::CatalogClient;

use crate::error::Result;
use bib_reconcile_common::{RecordBatch, SearchQuery};
use serde_json::Value;

/// カタログ操作
///
/// パイプラインはこのトレイト越しに通信するので、テストでは差し替えられる。
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// 書誌検索（JSON）。リトライはしない
    async fn search(&self, query: &SearchQuery) -> Result<Value>;

    /// MARCレコード取得。レスポンスのバイト列をそのまま返す
    async fn fetch_records(&self, batch: &RecordBatch) -> Result<Vec<u8>>;
}

/// 任意個のIDを上限ごとに分割して取得し、順に連結する
pub async fn fetch_all<C: Catalog>(catalog: &C, ids: &[String]) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    for batch in RecordBatch::chunked(ids) {
        bytes.extend(catalog.fetch_records(&batch).await?);
    }
    Ok(bytes)
}
