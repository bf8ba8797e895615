//! プレビューハンドル管理
//!
//! 選択されたファイルをアップロード前に表示するための一時的な参照。
//! Webではオブジェクト URL、CLIでは一時ファイル。

use crate::error::Result;

/// プレビューハンドルの確保と解放
///
/// `UploadForm` は同時に1つのハンドルしか保持せず、差し替え・クリア・破棄の
/// たびに必ず `release` を呼ぶ。
pub trait PreviewStore {
    /// 選択ファイルの型
    type File;

    /// 表示用ハンドル
    type Handle: Clone;

    fn allocate(&mut self, file: &Self::File) -> Result<Self::Handle>;

    fn release(&mut self, handle: Self::Handle);
}
