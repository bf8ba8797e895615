//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 送信境界で捕捉される失敗種別。UIには伝播させない。
#[derive(Error, Debug)]
pub enum Error {
    /// リクエストが送れなかった、またはタイムアウトした
    #[error("Network failure: {0}")]
    Network(String),

    /// 200以外のステータス
    #[error("Prediction service returned HTTP {status}")]
    Service { status: u16 },

    /// 200だが本文が `{class, confidence}` の形をしていない
    #[error("Malformed prediction response: {0}")]
    MalformedResponse(String),

    /// DiseaseInfoに存在しないラベル
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// プレビューハンドルの確保に失敗
    #[error("Preview error: {0}")]
    Preview(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// 送信パイプラインの失敗（再試行で回復しうるもの）かどうか
    pub fn is_submission_failure(&self) -> bool {
        matches!(
            self,
            Error::Network(_) | Error::Service { .. } | Error::MalformedResponse(_)
        )
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_service() {
        let error = Error::Service { status: 503 };
        assert_eq!(format!("{}", error), "Prediction service returned HTTP 503");
    }

    #[test]
    fn test_error_display_network() {
        let error = Error::Network("connection refused".to_string());
        let display = format!("{}", error);
        assert!(display.contains("Network failure"));
        assert!(display.contains("connection refused"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_is_submission_failure() {
        assert!(Error::Network("x".into()).is_submission_failure());
        assert!(Error::Service { status: 500 }.is_submission_failure());
        assert!(Error::MalformedResponse("x".into()).is_submission_failure());
        assert!(!Error::UnknownLabel("Rust".into()).is_submission_failure());
        assert!(!Error::Config("x".into()).is_submission_failure());
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Config("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Config"));
        assert!(debug.contains("テスト"));
    }
}
