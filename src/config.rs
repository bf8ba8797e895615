use crate::error::{LeafError, Result};
use potato_leaf_common::FormConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub predict_base_url: String,
    pub show_error_banner: bool,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        let form = FormConfig::default();
        Self {
            predict_base_url: form.predict_base_url,
            show_error_banner: form.show_error_banner,
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LeafError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("potato-leaf").join("config.json"))
    }

    /// フォーム設定を作る（`endpoint` 指定があれば保存値より優先）
    pub fn form_config(&self, endpoint: Option<&str>) -> Result<FormConfig> {
        let base_url = endpoint.unwrap_or(&self.predict_base_url);
        let form = FormConfig::new(base_url).with_error_banner(self.show_error_banner);
        form.validate()
            .map_err(|e| LeafError::Config(e.to_string()))?;
        Ok(form)
    }

    /// タイムアウト0秒は全リクエストが即失敗するので受け付けない
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(LeafError::Config("タイムアウトは1秒以上にしてください".into()));
        }
        Ok(())
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        let previous = self.timeout_seconds;
        self.timeout_seconds = seconds;
        if let Err(e) = self.validate() {
            self.timeout_seconds = previous;
            return Err(e);
        }
        Ok(())
    }

    pub fn set_endpoint(&mut self, url: String) -> Result<()> {
        FormConfig::new(url.as_str())
            .validate()
            .map_err(|e| LeafError::Config(e.to_string()))?;
        self.predict_base_url = url;
        Ok(())
    }
}
