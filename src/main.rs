use anyhow::Context;
use bib_reconcile::{cli, config, pipeline, CatalogClient};
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, RunConfig, TransportPolicy};
use std::time::Duration;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load().context("設定の読み込みに失敗しました")?;

    match cli.command {
        Commands::Run {
            input,
            output,
            catalog_url,
            run_log,
            stats_file,
            overwrite,
            abort_on_transport_error,
            no_progress,
        } => {
            println!("📚 bib-reconcile - 書誌照合\n");

            let mut run = RunConfig::from_config(&config, input, output);
            if let Some(path) = run_log {
                run.run_log = path;
            }
            if let Some(path) = stats_file {
                run.stats_file = path;
            }
            run.overwrite |= overwrite;
            if abort_on_transport_error {
                run.transport_policy = TransportPolicy::Abort;
            }
            run.progress = !no_progress;

            let catalog_url = catalog_url.unwrap_or_else(|| config.catalog_url.clone());
            let client = CatalogClient::new(catalog_url, Duration::from_secs(config.timeout_seconds))?;

            println!("[1/2] 照合中... ({})", client.base_url());
            let stats = pipeline::run_pipeline(&run, &client)
                .await
                .with_context(|| format!("照合を中断しました: {}", run.input.display()))?;
            println!(
                "✔ 一致 {} / 該当なし {} / スキップ {}\n",
                stats.matched, stats.no_match, stats.skipped
            );

            println!("[2/2] 結果");
            println!("  MARC: {}", run.output.display());
            println!("  ログ: {}", run.run_log.display());
            println!("  集計: {}", run.stats_file.display());
            println!("\n✅ {}", stats.summary_line());
        }

        Commands::Fetch { ids, output, catalog_url } => {
            let catalog_url = catalog_url.unwrap_or_else(|| config.catalog_url.clone());
            let client = CatalogClient::new(catalog_url, Duration::from_secs(config.timeout_seconds))?;

            let written = pipeline::fetch_to_file(&client, &ids, &output).await?;
            println!("✔ {}件のID → {} bytes を追記: {}", ids.len(), written, output.display());
        }

        Commands::Config { set_catalog_url, show } => {
            let mut config = config;

            if let Some(url) = set_catalog_url {
                config.set_catalog_url(url)?;
                println!("✔ カタログURLを設定しました");
            }

            if show {
                println!("設定: {}", Config::config_path()?.display());
                println!("  カタログURL: {}", config.catalog_url);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  ログ: {}", config.run_log.display());
                println!("  集計: {}", config.stats_file.display());
                println!("  通信エラー時: {:?}", config.transport_policy);
                println!("  上書き: {}", config.overwrite);
            }
        }
    }

    Ok(())
}
