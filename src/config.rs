use crate::error::{ReconcileError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// カタログURLを上書きする環境変数
pub const CATALOG_URL_ENV: &str = "BIB_RECONCILE_CATALOG_URL";

pub const DEFAULT_CATALOG_URL: &str = "http://data.bn.org.pl/api";

/// 通信エラー時の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportPolicy {
    /// その行だけスキップして続行
    #[default]
    SkipRow,
    /// 実行全体を中断
    Abort,
}

/// 永続化される設定（~/.config/bib-reconcile/config.json）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog_url: String,
    pub timeout_seconds: u64,
    pub run_log: PathBuf,
    pub stats_file: PathBuf,
    pub transport_policy: TransportPolicy,
    pub overwrite: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.into(),
            timeout_seconds: 60,
            run_log: PathBuf::from("reconcile_records.txt"),
            stats_file: PathBuf::from("reconcile_stats.txt"),
            transport_policy: TransportPolicy::SkipRow,
            overwrite: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str(&content)?
        } else {
            Self::default()
        };

        // 環境変数を優先
        if let Ok(url) = std::env::var(CATALOG_URL_ENV) {
            if !url.trim().is_empty() {
                config.catalog_url = url;
            }
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ReconcileError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("bib-reconcile").join("config.json"))
    }

    pub fn set_catalog_url(&mut self, url: String) -> Result<()> {
        reqwest::Url::parse(&url)
            .map_err(|e| ReconcileError::Config(format!("不正なURL {}: {}", url, e)))?;
        self.catalog_url = url;
        self.save()
    }
}

/// 1回の実行に必要な設定一式（パイプラインに明示的に渡す）
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub run_log: PathBuf,
    pub stats_file: PathBuf,
    pub transport_policy: TransportPolicy,
    /// 開始時に出力ファイルとログを空にする
    pub overwrite: bool,
    /// 進捗バーを表示する
    pub progress: bool,
}

impl RunConfig {
    /// 永続設定を既定値として実行設定を作る
    pub fn from_config(config: &Config, input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output,
            run_log: config.run_log.clone(),
            stats_file: config.stats_file.clone(),
            transport_policy: config.transport_policy,
            overwrite: config.overwrite,
            progress: true,
        }
    }
}
