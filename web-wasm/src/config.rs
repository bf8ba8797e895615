//! ページからのフォーム設定読み込み
//!
//! `index.html` の `<meta name="predict-base-url">` / `<meta name="show-error-banner">`
//! を読む。無ければデフォルト。

use potato_leaf_common::{FormConfig, Result};

const META_PREDICT_BASE_URL: &str = "predict-base-url";
const META_SHOW_ERROR_BANNER: &str = "show-error-banner";

/// ページのメタ情報から設定を作る（不正なURLはデフォルトに戻す）
pub fn form_config_from_document() -> FormConfig {
    let base_url = meta_content(META_PREDICT_BASE_URL);
    let show_error_banner = meta_content(META_SHOW_ERROR_BANNER);

    build_form_config(base_url.as_deref(), show_error_banner.as_deref()).unwrap_or_else(|e| {
        gloo::console::error!(format!("{}; falling back to defaults", e));
        FormConfig::default()
            .with_error_banner(show_error_banner.as_deref().is_some_and(parse_flag))
    })
}

/// メタ値から設定を組み立てる
pub fn build_form_config(
    base_url: Option<&str>,
    show_error_banner: Option<&str>,
) -> Result<FormConfig> {
    let mut config = match base_url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => FormConfig::new(url),
        None => FormConfig::default(),
    };
    config.validate()?;

    if let Some(flag) = show_error_banner {
        config.show_error_banner = parse_flag(flag);
    }

    Ok(config)
}

pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    document
        .query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()
        .flatten()?
        .get_attribute("content")
}
