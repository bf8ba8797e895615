//! 判定サービスのレスポンスパーサー
//!
//! HTTPステータスと本文から判定結果を取り出す。
//! 成功は「200 かつ `{class: string, confidence: number}`」のみ。

use crate::error::{Error, Result};
use crate::types::{PredictResponse, PredictionResult};

/// 成功とみなすステータス
pub const SUCCESS_STATUS: u16 = 200;

/// `/predict` のレスポンスをパース
///
/// # Arguments
/// * `status` - HTTPステータスコード
/// * `body` - レスポンス本文
///
/// # Returns
/// * `Ok(PredictionResult)` - 200かつ本文が期待通り
/// * `Err(Error::Service)` - 200以外
/// * `Err(Error::MalformedResponse)` - 本文の形が違う、または信頼度が範囲外
///
/// # Examples
/// ```
/// use potato_leaf_common::parse_predict_response;
///
/// let result = parse_predict_response(200, r#"{"class":"Healthy","confidence":0.97}"#).unwrap();
/// assert_eq!(result.label, "Healthy");
/// ```
pub fn parse_predict_response(status: u16, body: &str) -> Result<PredictionResult> {
    if status != SUCCESS_STATUS {
        return Err(Error::Service { status });
    }

    let response: PredictResponse = serde_json::from_str(body.trim())
        .map_err(|e| Error::MalformedResponse(e.to_string()))?;

    if !response.confidence.is_finite() || !(0.0..=1.0).contains(&response.confidence) {
        return Err(Error::MalformedResponse(format!(
            "confidence out of range: {}",
            response.confidence
        )));
    }

    Ok(response.into())
}
