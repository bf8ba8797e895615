//! 判定サービス呼び出し
//!
//! 選択ファイルを multipart (`file` フィールド) で `/predict` にPOSTする。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};
use potato_leaf_common::{parse_predict_response, Error, PredictionResult, Result};

/// multipartのフィールド名
const FILE_FIELD: &str = "file";

/// 画像を送信して判定結果を得る
///
/// 送信できない場合は `Error::Network`、それ以外の判定は
/// `parse_predict_response` に任せる。
pub async fn post_image(url: &str, file: &File) -> Result<PredictionResult> {
    let form_data = FormData::new().map_err(network_error)?;
    form_data
        .append_with_blob_and_filename(FILE_FIELD, file, &file.name())
        .map_err(network_error)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form_data);

    let request = Request::new_with_str_and_init(url, &opts).map_err(network_error)?;

    let window = web_sys::window().ok_or_else(|| Error::Network("window is unavailable".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network_error)?;
    let resp: Response = resp_value.dyn_into().map_err(network_error)?;

    let status = resp.status();
    if status != potato_leaf_common::parser::SUCCESS_STATUS {
        return Err(Error::Service { status });
    }

    let text = JsFuture::from(resp.text().map_err(network_error)?)
        .await
        .map_err(network_error)?;
    let body = text
        .as_string()
        .ok_or_else(|| Error::MalformedResponse("response body is not text".into()))?;

    parse_predict_response(status, &body)
}

fn network_error(value: JsValue) -> Error {
    Error::Network(describe_js_error(&value))
}

/// JSの例外値を文字列にする
fn describe_js_error(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}
