//! 一時ファイルによるプレビュー
//!
//! 選択画像を一時ファイルにコピーし、外部ビューアで開けるパスを渡す。
//! 解放時に削除する。

use crate::image_file::ImageFile;
use potato_leaf_common::{Error, PreviewStore, Result};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// プレビューハンドル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    pub id: u64,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct TempPreviewStore {
    next_id: u64,
    live: HashMap<u64, NamedTempFile>,
}

impl TempPreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解放されていないプレビュー数
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl PreviewStore for TempPreviewStore {
    type File = ImageFile;
    type Handle = PreviewFile;

    fn allocate(&mut self, file: &ImageFile) -> Result<PreviewFile> {
        let suffix = format!(".{}", file.extension());
        let mut temp = tempfile::Builder::new()
            .prefix("potato-leaf-preview-")
            .suffix(&suffix)
            .tempfile()
            .map_err(|e| Error::Preview(e.to_string()))?;
        temp.write_all(&file.bytes)
            .map_err(|e| Error::Preview(e.to_string()))?;

        self.next_id += 1;
        let handle = PreviewFile {
            id: self.next_id,
            path: temp.path().to_path_buf(),
        };
        tracing::debug!(path = %handle.path.display(), "preview allocated");

        self.live.insert(handle.id, temp);
        Ok(handle)
    }

    fn release(&mut self, handle: PreviewFile) {
        match self.live.remove(&handle.id) {
            Some(temp) => {
                if let Err(e) = temp.close() {
                    tracing::warn!(path = %handle.path.display(), "failed to remove preview: {}", e);
                } else {
                    tracing::debug!(path = %handle.path.display(), "preview released");
                }
            }
            None => tracing::warn!(id = handle.id, "release of unknown preview handle"),
        }
    }
}
