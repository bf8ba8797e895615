//! 表示用フォーマット

/// 信頼度(0.0〜1.0)をパーセント表記にする
///
/// 小数第2位までを四捨五入（0から遠い方へ丸める）。
///
/// # Examples
/// ```
/// use potato_leaf_common::format_confidence;
///
/// assert_eq!(format_confidence(0.9704), "97.04%");
/// assert_eq!(format_confidence(1.0), "100.00%");
/// ```
pub fn format_confidence(confidence: f64) -> String {
    if !confidence.is_finite() {
        return "--%".to_string();
    }

    // 1万分率の整数に丸めてから組み立てる（f64::roundは0から遠い方へ丸める）
    let hundredths = (confidence * 10_000.0).round() as i64;
    let sign = if hundredths < 0 { "-" } else { "" };
    let abs = hundredths.unsigned_abs();
    format!("{}{}.{:02}%", sign, abs / 100, abs % 100)
}
