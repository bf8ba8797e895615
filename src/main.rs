use anyhow::Context;
use clap::Parser;
use potato_leaf_rust::{cli, client, config, image_file, render, session};
use cli::{Cli, Commands};
use client::PredictClient;
use config::Config;
use image_file::ImageFile;
use session::Session;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load().context("設定の読み込みに失敗")?;

    match cli.command {
        Commands::Classify { image, endpoint, json } => {
            let form_config = config.form_config(endpoint.as_deref())?;
            let client = PredictClient::new(&form_config, Duration::from_secs(config.timeout_seconds))?;
            let image = ImageFile::load(&image)?;

            let mut session = Session::new(form_config, client).with_spinner(!json);
            let outcome = session.classify(image).await;

            if json {
                let prediction = outcome.as_ref().ok();
                println!("{}", serde_json::to_string_pretty(&prediction)?);
            } else {
                println!("{}", render::render(&session.view()));
            }

            outcome?;
        }

        Commands::Interactive { endpoint } => {
            let form_config = config.form_config(endpoint.as_deref())?;
            let client = PredictClient::new(&form_config, Duration::from_secs(config.timeout_seconds))?;
            let mut session = Session::new(form_config, client).with_spinner(true);
            session::run_interactive(&mut session).await?;
        }

        Commands::Labels => {
            println!("{}", render::render_disease_table());
        }

        Commands::Config { set_endpoint, error_banner, timeout, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(url) = set_endpoint {
                config.set_endpoint(url)?;
                changed = true;
            }
            if let Some(flag) = error_banner {
                config.show_error_banner = flag;
                changed = true;
            }
            if let Some(seconds) = timeout {
                config.set_timeout(seconds)?;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  判定URL: {}", config.form_config(None)?.predict_url());
                println!("  エラー表示: {}", if config.show_error_banner { "有効" } else { "無効" });
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
