//! 行ごとの処理結果ログ
//!
//! 1行 = 入力行 + " || " + 一致したレコード、または "No records found."

use crate::error::Result;
use bib_reconcile_common::{CandidateRecord, SourceRow};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

pub const NO_RECORDS_FOUND: &str = "No records found.";

pub struct RunLog {
    writer: BufWriter<File>,
}

impl RunLog {
    /// 追記モードで開く
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    pub fn record_match(&mut self, row: &SourceRow, record: &CandidateRecord) -> Result<()> {
        self.write_line(&format!("{} || {}", row, record))
    }

    pub fn record_no_match(&mut self, row: &SourceRow) -> Result<()> {
        self.write_line(&format!("{} || {}", row, NO_RECORDS_FOUND))
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        // 中断されても処理済みの行は残す
        self.writer.flush()?;
        Ok(())
    }
}
