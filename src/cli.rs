use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "potato-leaf")]
#[command(about = "ジャガイモの葉の病害判定クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を1枚判定して結果を表示
    Classify {
        /// 葉の画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// 判定サービスのベースURL（設定値より優先）
        #[arg(short, long)]
        endpoint: Option<String>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 対話モードで選択・再送信・クリアを繰り返す
    Interactive {
        /// 判定サービスのベースURL（設定値より優先）
        #[arg(short, long)]
        endpoint: Option<String>,
    },

    /// 病害情報テーブルを表示
    Labels,

    /// 設定の表示・変更
    Config {
        /// 判定サービスのベースURLを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 送信失敗時にエラーを表示するか
        #[arg(long)]
        error_banner: Option<bool>,

        /// リクエストのタイムアウト（秒）
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classify() {
        let cli = Cli::try_parse_from([
            "potato-leaf",
            "classify",
            "leaf.jpg",
            "--endpoint",
            "http://10.0.0.2:8080",
            "--json",
        ])
        .expect("パース失敗");

        match cli.command {
            Commands::Classify { image, endpoint, json } => {
                assert_eq!(image, PathBuf::from("leaf.jpg"));
                assert_eq!(endpoint.as_deref(), Some("http://10.0.0.2:8080"));
                assert!(json);
            }
            _ => panic!("classifyではない"),
        }
    }

    #[test]
    fn test_classify_requires_image() {
        assert!(Cli::try_parse_from(["potato-leaf", "classify"]).is_err());
    }

    #[test]
    fn test_parse_config() {
        let cli = Cli::try_parse_from([
            "potato-leaf",
            "-v",
            "config",
            "--error-banner",
            "true",
            "--timeout",
            "10",
            "--show",
        ])
        .expect("パース失敗");

        assert!(cli.verbose);
        match cli.command {
            Commands::Config { set_endpoint, error_banner, timeout, show } => {
                assert!(set_endpoint.is_none());
                assert_eq!(error_banner, Some(true));
                assert_eq!(timeout, Some(10));
                assert!(show);
            }
            _ => panic!("configではない"),
        }
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        assert!(Cli::try_parse_from(["potato-leaf", "config", "--timeout", "0"]).is_err());
    }
}
