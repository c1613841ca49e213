//! 照合パイプライン
//!
//! 1行ずつ順に処理する:
//! 検索条件作成 → 検索 → 正規化 → 絞り込み → (MARC取得・追記 | 該当なし記録)
//!
//! 入力不正・正規化失敗はその行だけスキップする。
//! 通信エラーは `TransportPolicy` に従う（既定は行スキップ）。

use crate::catalog::{self, Catalog};
use crate::config::{RunConfig, TransportPolicy};
use crate::error::Result;
use crate::export::{self, RunLog};
use crate::sheet;
use bib_reconcile_common::{
    disambiguate, normalize, CandidateRecord, MatchTier, RecordBatch, RunStats, SearchQuery, SourceRow,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{debug, info, warn};

/// 1行の処理結果
#[derive(Debug)]
pub enum RowOutcome {
    Matched {
        record: CandidateRecord,
        tier: MatchTier,
        marc: Vec<u8>,
    },
    NoMatch,
}

/// 入力ファイルを読み込んでパイプラインを実行する
pub async fn run_pipeline<C: Catalog>(config: &RunConfig, catalog: &C) -> Result<RunStats> {
    let rows = sheet::read_rows(&config.input)?;
    info!(rows = rows.len(), input = %config.input.display(), "rows loaded");
    run_rows(config, catalog, &rows).await
}

/// 読み込み済みの行に対してパイプラインを実行する
pub async fn run_rows<C: Catalog>(
    config: &RunConfig,
    catalog: &C,
    rows: &[SourceRow],
) -> Result<RunStats> {
    if config.overwrite {
        export::truncate(&config.output)?;
        export::truncate(&config.run_log)?;
    }

    let mut log = RunLog::open(&config.run_log)?;
    let mut stats = RunStats {
        total: rows.len(),
        ..Default::default()
    };

    let pb = progress_bar(rows.len(), config.progress);

    for (i, row) in rows.iter().enumerate() {
        match process_row(catalog, row).await {
            Ok(RowOutcome::Matched { record, tier, marc }) => {
                if marc.is_empty() {
                    warn!(row = i + 1, id = %record.id, "catalog returned an empty MARC body");
                }
                export::append(&config.output, &marc)?;
                log.record_match(row, &record)?;
                stats.matched += 1;
                info!(row = i + 1, id = %record.id, ?tier, "{} || {}", row, record);
            }
            Ok(RowOutcome::NoMatch) => {
                log.record_no_match(row)?;
                stats.no_match += 1;
                info!(row = i + 1, "{} || {}", row, export::run_log::NO_RECORDS_FOUND);
            }
            Err(e) if e.is_row_level() => {
                stats.skipped += 1;
                debug!(row = i + 1, error = %e, "row skipped");
            }
            Err(e) if e.is_transport() && config.transport_policy == TransportPolicy::SkipRow => {
                stats.skipped += 1;
                warn!(row = i + 1, error = %e, "row skipped after catalog error");
            }
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    export::write_stats(&config.stats_file, &stats)?;
    info!(
        matched = stats.matched,
        no_match = stats.no_match,
        skipped = stats.skipped,
        "{}",
        stats.summary_line()
    );

    Ok(stats)
}

/// 1行を処理する
pub async fn process_row<C: Catalog>(catalog: &C, row: &SourceRow) -> Result<RowOutcome> {
    let query = SearchQuery::from_row(row)?;
    let payload = catalog.search(&query).await?;
    let candidates = normalize(&payload)?;

    let Some(found) = disambiguate(row.page_count_hint(), &candidates)? else {
        return Ok(RowOutcome::NoMatch);
    };

    let batch = RecordBatch::new(vec![found.id.clone()])?;
    let marc = catalog.fetch_records(&batch).await?;

    let record = candidates
        .into_iter()
        .nth(found.index)
        .unwrap_or_default();

    Ok(RowOutcome::Matched {
        record,
        tier: found.tier,
        marc,
    })
}

/// IDを指定してMARCレコードを取得し追記する。書き込んだバイト数を返す
pub async fn fetch_to_file<C: Catalog>(catalog: &C, ids: &[String], output: &Path) -> Result<usize> {
    let bytes = catalog::fetch_all(catalog, ids).await?;
    export::append(output, &bytes)?;
    Ok(bytes.len())
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb
}
