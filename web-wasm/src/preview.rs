//! オブジェクトURLによるプレビュー
//!
//! `URL.createObjectURL` で確保し、`URL.revokeObjectURL` で解放する。

use potato_leaf_common::{Error, PreviewStore, Result};
use web_sys::{File, Url};

#[derive(Debug, Default)]
pub struct ObjectUrlStore;

impl PreviewStore for ObjectUrlStore {
    type File = File;
    type Handle = String;

    fn allocate(&mut self, file: &File) -> Result<String> {
        Url::create_object_url_with_blob(file)
            .map_err(|e| Error::Preview(format!("createObjectURL failed: {:?}", e)))
    }

    fn release(&mut self, handle: String) {
        if let Err(e) = Url::revoke_object_url(&handle) {
            gloo::console::error!(format!("revokeObjectURL failed: {:?}", e));
        }
    }
}
