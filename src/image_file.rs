//! 選択画像の読み込み
//!
//! 中身から画像形式を判定し、multipartのファイル名・MIMEタイプを決める。

use crate::error::{LeafError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 選択された画像ファイル
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
    /// 元データ（送信・プレビューで共有）
    pub bytes: Arc<[u8]>,
}

impl ImageFile {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(LeafError::FileNotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path)?;
        let format = image::guess_format(&bytes)
            .map_err(|_| LeafError::NotAnImage(path.display().to_string()))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            mime_type: format.to_mime_type().to_string(),
            bytes: bytes.into(),
        })
    }

    /// 画像形式の拡張子（プレビューの一時ファイル名に使う）
    pub fn extension(&self) -> &'static str {
        image::ImageFormat::from_mime_type(&self.mime_type)
            .and_then(|f| f.extensions_str().first().copied())
            .unwrap_or("img")
    }
}
