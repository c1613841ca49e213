pub mod run_log;

pub use run_log::RunLog;

use crate::error::Result;
use bib_reconcile_common::RunStats;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// MARCバイト列を出力ファイルの末尾に追記する
///
/// 一致した行ごとに呼ばれる。ファイルはスコープを抜けると閉じられる。
pub fn append(output_path: &Path, bytes: &[u8]) -> Result<()> {
    if bytes.is_empty() {
        return Ok(());
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output_path)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(())
}

/// ファイルを空にする（存在しなければ作成）
pub fn truncate(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::File::create(path)?;
    Ok(())
}

/// 統計ファイルを書き出す（実行終了時に1回だけ）
pub fn write_stats(path: &Path, stats: &RunStats) -> Result<()> {
    std::fs::write(path, stats.summary_line())?;
    Ok(())
}
