//! 判定結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - PredictResponse: `/predict` のレスポンス本文（ワイヤ形式）
//! - PredictionResult: 画面に出す判定結果

use serde::{Deserialize, Serialize};

/// `/predict` のレスポンス本文
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    pub class: String,
    pub confidence: f64,
}

/// 判定結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub label: String,

    /// 0.0〜1.0
    pub confidence: f64,
}

impl From<PredictResponse> for PredictionResult {
    fn from(response: PredictResponse) -> Self {
        Self {
            label: response.class,
            confidence: response.confidence,
        }
    }
}
