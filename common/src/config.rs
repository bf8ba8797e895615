//! フォーム設定
//!
//! 判定エンドポイントのベースURLとエラーバナー表示の有無。

use crate::error::{Error, Result};

/// デフォルトのベースURL
pub const DEFAULT_PREDICT_BASE_URL: &str = "http://localhost:8080";

/// フォーム設定
///
/// 永続化はしない。CLIは自前の `Config` から、webはmetaタグから組み立てる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub predict_base_url: String,

    /// 送信失敗時にバナーを出すか（オフならログのみ）
    pub show_error_banner: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            predict_base_url: DEFAULT_PREDICT_BASE_URL.to_string(),
            show_error_banner: false,
        }
    }
}

impl FormConfig {
    pub fn new(predict_base_url: impl Into<String>) -> Self {
        Self {
            predict_base_url: predict_base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_error_banner(mut self, show: bool) -> Self {
        self.show_error_banner = show;
        self
    }

    /// `<base>/predict`
    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.predict_base_url.trim().trim_end_matches('/'))
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.predict_base_url.trim();
        if base.is_empty() {
            return Err(Error::Config("predict base URL is empty".into()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::Config(format!(
                "predict base URL must start with http:// or https://: {}",
                base
            )));
        }
        Ok(())
    }
}
