//! 判定サービスクライアント
//!
//! 画像を multipart (`file` フィールド) で `POST <base>/predict` に送る。

use crate::error::{LeafError, Result};
use crate::image_file::ImageFile;
use potato_leaf_common::parser::SUCCESS_STATUS;
use potato_leaf_common::{parse_predict_response, Error, FormConfig, PredictionResult};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

/// multipartのフィールド名
const FILE_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct PredictClient {
    http: reqwest::Client,
    url: String,
}

impl PredictClient {
    pub fn new(form: &FormConfig, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LeafError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            url: form.predict_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// 1回だけ送信する（再試行はしない）
    pub async fn predict(&self, image: &ImageFile) -> potato_leaf_common::Result<PredictionResult> {
        let part = Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)
            .map_err(|e| Error::Network(e.to_string()))?;
        let form = Form::new().part(FILE_FIELD, part);

        tracing::debug!(url = %self.url, file = %image.file_name, bytes = image.bytes.len(), "POST");

        let response = self
            .http
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Network(describe_reqwest_error(&e)))?;

        let status = response.status().as_u16();
        if status != SUCCESS_STATUS {
            return Err(Error::Service { status });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(describe_reqwest_error(&e)))?;
        tracing::debug!(body = %body, "API Response");

        parse_predict_response(status, &body)
    }
}

fn describe_reqwest_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {}", e)
    } else if e.is_connect() {
        format!("could not connect: {}", e)
    } else {
        e.to_string()
    }
}
