use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bib-reconcile")]
#[command(about = "Reconcile a spreadsheet of books against data.bn.org.pl and export MARC records", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力（行スキップの理由など）
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// スプレッドシートの各行をカタログと照合し、MARCを追記
    Run {
        /// 入力スプレッドシート (xlsx/xls/xlsb/ods/csv)
        #[arg(required = true)]
        input: PathBuf,

        /// 出力MARCファイル（追記）
        #[arg(short, long, default_value = "output.mrc")]
        output: PathBuf,

        /// カタログAPIのベースURL
        #[arg(long)]
        catalog_url: Option<String>,

        /// 行ごとの結果ログ
        #[arg(long)]
        run_log: Option<PathBuf>,

        /// 集計結果ファイル
        #[arg(long)]
        stats_file: Option<PathBuf>,

        /// 開始時に出力ファイルとログを空にする
        #[arg(long)]
        overwrite: bool,

        /// 通信エラーで実行全体を中断する（既定はその行だけスキップ）
        #[arg(long)]
        abort_on_transport_error: bool,

        /// 進捗バーを表示しない
        #[arg(long)]
        no_progress: bool,
    },

    /// IDを指定してMARCレコードを取得し追記
    Fetch {
        /// レコードID
        #[arg(required = true)]
        ids: Vec<String>,

        /// 出力MARCファイル（追記）
        #[arg(short, long, default_value = "output.mrc")]
        output: PathBuf,

        /// カタログAPIのベースURL
        #[arg(long)]
        catalog_url: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// カタログAPIのベースURLを設定
        #[arg(long)]
        set_catalog_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::parse_from([
            "bib-reconcile", "run", "books.xlsx", "-o", "out.mrc", "--overwrite", "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Run { input, output, overwrite, abort_on_transport_error, .. } => {
                assert_eq!(input, PathBuf::from("books.xlsx"));
                assert_eq!(output, PathBuf::from("out.mrc"));
                assert!(overwrite);
                assert!(!abort_on_transport_error);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_fetch_ids() {
        let cli = Cli::parse_from(["bib-reconcile", "fetch", "42", "43"]);
        match cli.command {
            Commands::Fetch { ids, output, .. } => {
                assert_eq!(ids, vec!["42", "43"]);
                assert_eq!(output, PathBuf::from("output.mrc"));
            }
            _ => panic!("expected fetch"),
        }
    }
}
